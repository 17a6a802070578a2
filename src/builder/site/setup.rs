use log::debug;

use crate::builder::processor::{MetadataProcessor, TemplateProcessor};
use crate::builder::site::{OutputPaths, SiteGenerator};
use crate::config::Config;
use crate::template::LiquidEngine;
use crate::utils::error::SiteResult;

/// Assemble the generator for a configuration: metadata blocks are read first,
/// then templates are rendered with Liquid.
///
/// The template filters derive output paths from the same naming rule the
/// generator applies, so links they produce match the files written.
pub fn create_site_generator(config: &Config) -> SiteResult<SiteGenerator> {
    let naming = config.template_naming();
    let paths = OutputPaths::new(&config.input, &config.output).with_naming(naming.clone());
    let engine = LiquidEngine::new(paths)?;

    debug!("Template marker: {}", naming.marker());
    Ok(SiteGenerator::new(&config.input, &config.output)
        .with_processor(MetadataProcessor)
        .with_processor(TemplateProcessor::new(engine, naming)))
}
