mod metadata;
mod template;

pub use metadata::MetadataProcessor;
pub use template::{TemplateNaming, TemplateProcessor, DEFAULT_TEMPLATE_MARKER};

use crate::builder::site_file::SiteFile;
use crate::utils::error::SiteResult;

/// A step of the processor chain.
///
/// `process` inspects and mutates a file in place. Files a processor does not
/// recognise are left untouched rather than rejected, so unrelated processors
/// can run over every file. `process_output_file_name` maps a file name (not a
/// path) to the name this processor wants in the output tree.
pub trait FileProcessor {
    fn process(&self, file: &mut SiteFile) -> SiteResult<()>;

    fn process_output_file_name(&self, name: &str) -> String;
}
