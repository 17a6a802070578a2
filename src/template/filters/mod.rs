mod format_date;
mod list_files;
mod sort_files;

use liquid::ParserBuilder;
use liquid_core::runtime::Expression;
use liquid_core::{Runtime, ValueView};

use crate::builder::OutputPaths;

pub use format_date::FormatDateFilterParser;
pub use list_files::ListFilesFilterParser;
pub use sort_files::SortFilesFilterParser;

/// Register the site helper filters for use in Liquid templates
pub fn register_filters(parser_builder: ParserBuilder, paths: &OutputPaths) -> ParserBuilder {
    parser_builder
        .filter(ListFilesFilterParser {
            paths: paths.clone(),
        })
        .filter(SortFilesFilterParser)
        .filter(FormatDateFilterParser)
}

/// Evaluate an optional flag argument; absent flags use `default`
fn evaluate_flag(
    argument: Option<&Expression>,
    runtime: &dyn Runtime,
    default: bool,
) -> liquid_core::Result<bool> {
    match argument {
        Some(expression) => {
            let value = expression.evaluate(runtime)?;
            Ok(value.query_state(liquid_core::model::State::Truthy))
        }
        None => Ok(default),
    }
}
