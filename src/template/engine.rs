use std::path::Path;

use liquid::model::Value;
use liquid::partials::OnDemandCompiler;
use liquid::{Object, Parser, ParserBuilder};
use log::debug;

use crate::builder::{OutputPaths, SiteFile};
use crate::template::convert::file_object;
use crate::template::filters;
use crate::template::partials::SiteIncludes;
use crate::template::TemplateEngine;
use crate::utils::error::{SiteError, SiteResult};

/// [`TemplateEngine`] backed by Liquid.
///
/// Templates get the Liquid standard library, the site helper filters
/// (`list_files`, `sort_files`, `format_date`) and `{% include %}` partials
/// resolved against the input root. Partials are read and compiled on every
/// include, so an engine reused across passes sees edited partials.
pub struct LiquidEngine {
    parser: Parser,
    paths: OutputPaths,
}

impl LiquidEngine {
    pub fn new(paths: OutputPaths) -> SiteResult<Self> {
        let parser_builder = filters::register_filters(ParserBuilder::with_stdlib(), &paths);
        let parser = parser_builder
            .partials(OnDemandCompiler::new(SiteIncludes::new(paths.input_dir())))
            .build()
            .map_err(|e| SiteError::Config(format!("Failed to build Liquid parser: {}", e)))?;

        Ok(LiquidEngine { parser, paths })
    }

    /// Variables bound for a render: just `file`
    fn globals(&self, file: &SiteFile) -> Object {
        let mut globals = Object::new();
        globals.insert(
            "file".into(),
            Value::Object(file_object(file.input(), file.output(), file.metadata(), &self.paths)),
        );
        globals
    }
}

impl TemplateEngine for LiquidEngine {
    type Template = liquid::Template;

    fn parse(&self, path: &Path, source: &str) -> SiteResult<liquid::Template> {
        self.parser.parse(source).map_err(|e| SiteError::Template {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn render(&self, template: &liquid::Template, file: &SiteFile) -> SiteResult<Vec<u8>> {
        let globals = self.globals(file);
        match template.render(&globals) {
            Ok(rendered) => Ok(rendered.into_bytes()),
            Err(e) => {
                debug!("Error rendering {}: {}", file.input().display(), e);
                Err(SiteError::Template {
                    path: file.input().to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }
}
