use std::ops::ControlFlow;

use log::{error, info};

use crate::builder::{create_site_generator, DirectoryWatcher, GenerationStats, SiteGenerator};
use crate::config::{self, Config, ConfigOverrides};
use crate::directory;
use crate::utils::error::SiteResult;

/// Handle the build command.
///
/// A failed pass is fatal unless watching; while watching it is logged and
/// the next change batch triggers a new attempt.
pub fn handle_build_command(overrides: &ConfigOverrides) -> SiteResult<()> {
    let config = config::load_config(overrides)?;
    config::validate_config(&config)?;

    let generator = create_site_generator(&config)?;

    match run_generation(&config, &generator) {
        Ok(_) => {}
        Err(e) if config.watch => error!("Failed to generate site: {}", e),
        Err(e) => return Err(e),
    }

    if !config.watch {
        return Ok(());
    }

    let watcher = DirectoryWatcher::new(&config.input)
        .with_settle_delay(config.settle_delay())
        .ignoring(&config.output);

    watcher.watch(|| regenerate(&config, &generator))
}

/// Reaction to one change batch. A failed pass is logged and watching goes on.
pub fn regenerate(config: &Config, generator: &SiteGenerator) -> ControlFlow<()> {
    info!("Change detected, regenerating...");
    if let Err(e) = run_generation(config, generator) {
        error!("Failed to generate site: {}", e);
    }
    ControlFlow::Continue(())
}

/// One full pass: optionally empty the output directory, then generate everything
pub fn run_generation(config: &Config, generator: &SiteGenerator) -> SiteResult<GenerationStats> {
    if config.delete_output {
        directory::delete_and_create_output(&config.output)?;
    }

    let stats = generator.generate()?;
    info!(
        "Generated {} files in {} directories in {} ms",
        stats.files,
        stats.directories,
        stats.duration.as_millis()
    );
    Ok(stats)
}
