use log::debug;

use crate::builder::processor::FileProcessor;
use crate::builder::site::NameTransform;
use crate::builder::site_file::SiteFile;
use crate::template::TemplateEngine;
use crate::utils::error::{SiteError, SiteResult};

/// File name infix that marks a file as a template
pub const DEFAULT_TEMPLATE_MARKER: &str = ".tmpl.";

/// Naming rule for template files: a name containing the marker infix is a
/// template, and its output name has the infix collapsed to a single dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNaming {
    marker: String,
}

impl TemplateNaming {
    pub fn new(marker: impl Into<String>) -> Self {
        TemplateNaming {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_template(&self, name: &str) -> bool {
        name.contains(&self.marker)
    }

    /// `page.tmpl.html` becomes `page.html`; other names are returned as is
    pub fn output_name(&self, name: &str) -> String {
        if self.is_template(name) {
            name.replace(&self.marker, ".")
        } else {
            name.to_string()
        }
    }
}

impl Default for TemplateNaming {
    fn default() -> Self {
        TemplateNaming::new(DEFAULT_TEMPLATE_MARKER)
    }
}

impl NameTransform for TemplateNaming {
    fn transform(&self, name: &str) -> String {
        self.output_name(name)
    }
}

/// Renders template files through a [`TemplateEngine`].
///
/// The current content is handed to the engine as an in-memory source, since an
/// earlier processor may already have changed it. On failure the content is left
/// as it was and the error propagates.
pub struct TemplateProcessor<E> {
    engine: E,
    naming: TemplateNaming,
}

impl<E: TemplateEngine> TemplateProcessor<E> {
    pub fn new(engine: E, naming: TemplateNaming) -> Self {
        TemplateProcessor { engine, naming }
    }
}

impl<E: TemplateEngine> FileProcessor for TemplateProcessor<E> {
    fn process(&self, file: &mut SiteFile) -> SiteResult<()> {
        if !self.naming.is_template(&file.input_name()) {
            return Ok(());
        }

        let source = file.text().ok_or_else(|| SiteError::Template {
            path: file.input().to_path_buf(),
            message: "template source is not valid UTF-8".to_string(),
        })?;

        debug!("Rendering template {}", file.input().display());
        let template = self.engine.parse(file.input(), source)?;
        let rendered = self.engine.render(&template, file)?;

        file.set_content(rendered);
        Ok(())
    }

    fn process_output_file_name(&self, name: &str) -> String {
        self.naming.output_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    /// Engine that upper-cases the source and appends the title metadata
    struct ShoutEngine;

    impl TemplateEngine for ShoutEngine {
        type Template = String;

        fn parse(&self, path: &Path, source: &str) -> SiteResult<String> {
            if source.contains("{%") {
                return Err(SiteError::Template {
                    path: path.to_path_buf(),
                    message: "unclosed tag".to_string(),
                });
            }
            Ok(source.to_uppercase())
        }

        fn render(&self, template: &String, file: &SiteFile) -> SiteResult<Vec<u8>> {
            let title = file
                .metadata()
                .get("title")
                .map(|value| value.to_string())
                .unwrap_or_default();
            Ok(format!("{}{}", template, title).into_bytes())
        }
    }

    fn processor() -> TemplateProcessor<ShoutEngine> {
        TemplateProcessor::new(ShoutEngine, TemplateNaming::default())
    }

    #[test]
    fn test_template_naming() {
        let naming = TemplateNaming::default();
        assert!(naming.is_template("index.tmpl.html"));
        assert!(!naming.is_template("index.html"));
        assert_eq!(naming.output_name("index.tmpl.html"), "index.html");
        assert_eq!(naming.output_name("style.css"), "style.css");

        let custom = TemplateNaming::new(".bt.");
        assert_eq!(custom.output_name("feed.bt.xml"), "feed.xml");
        assert_eq!(custom.output_name("feed.tmpl.xml"), "feed.tmpl.xml");
    }

    #[test]
    fn test_template_processor_renders_in_memory_content() {
        let mut file = SiteFile::new("/in/a.tmpl.txt", "/out/a.txt", b"hello ".to_vec());
        file.metadata_mut().insert(
            "title".to_string(),
            crate::metadata::MetadataValue::String("Home".to_string()),
        );
        processor().process(&mut file).unwrap();
        assert_eq!(file.text(), Some("HELLO Home"));
    }

    #[test]
    fn test_template_processor_skips_non_templates() {
        let mut file = SiteFile::new("/in/a.txt", "/out/a.txt", b"hello".to_vec());
        processor().process(&mut file).unwrap();
        assert_eq!(file.text(), Some("hello"));
    }

    #[test]
    fn test_template_processor_failure_keeps_content() {
        let mut file = SiteFile::new("/in/a.tmpl.txt", "/out/a.txt", b"{% if".to_vec());
        let err = processor().process(&mut file).unwrap_err();

        match err {
            SiteError::Template { path, .. } => assert_eq!(path, PathBuf::from("/in/a.tmpl.txt")),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(file.text(), Some("{% if"));
    }

    #[test]
    fn test_template_processor_output_name() {
        assert_eq!(processor().process_output_file_name("page.tmpl.html"), "page.html");
        assert_eq!(processor().process_output_file_name("page.html"), "page.html");
    }
}
