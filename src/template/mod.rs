mod convert;
mod engine;
mod filters;
mod partials;

pub use convert::{file_object, metadata_to_liquid, metadata_value_to_liquid};
pub use engine::LiquidEngine;
pub use partials::SiteIncludes;

use std::path::Path;

use crate::builder::SiteFile;
use crate::utils::error::SiteResult;

/// A template engine, seen from the processor chain.
///
/// `parse` turns an in-memory source into a template; `render` evaluates it
/// with the `file` variable bound to the file being processed. Both report
/// failures as [`SiteError::Template`](crate::utils::error::SiteError::Template).
pub trait TemplateEngine {
    type Template;

    fn parse(&self, path: &Path, source: &str) -> SiteResult<Self::Template>;

    fn render(&self, template: &Self::Template, file: &SiteFile) -> SiteResult<Vec<u8>>;
}
