use log::info;

use crate::config::{self, ConfigOverrides};
use crate::directory;
use crate::utils::error::SiteResult;

/// Handle the clean command
pub fn handle_clean_command(overrides: &ConfigOverrides) -> SiteResult<()> {
    let config = config::load_config(overrides)?;
    config::validate_directory_nesting(&config)?;

    info!("Cleaning site at {}", config.output.display());
    directory::delete_and_create_output(&config.output)?;
    info!("Site cleaned successfully");
    Ok(())
}
