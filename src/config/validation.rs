use std::fs;
use std::path::{Component, Path};

use log::{info, warn};

use crate::config::Config;
use crate::utils::error::{SiteError, SiteResult};
use crate::utils::path::{absolute_path, is_excluded_name};

/// Validate the configuration before any generation. Creates the output
/// directory when it does not exist yet.
pub fn validate_config(config: &Config) -> SiteResult<()> {
    validate_template_marker(config)?;
    validate_input_directory(config)?;
    validate_directory_nesting(config)?;
    validate_output_directory(config)?;
    Ok(())
}

fn validate_template_marker(config: &Config) -> SiteResult<()> {
    if config.template_marker.is_empty() {
        return Err(SiteError::Config("Template marker must not be empty".to_string()));
    }
    Ok(())
}

fn validate_input_directory(config: &Config) -> SiteResult<()> {
    let input = &config.input;

    if !input.exists() {
        return Err(SiteError::Config(format!(
            "Input directory does not exist: {}",
            input.display()
        )));
    }

    if !input.is_dir() {
        return Err(SiteError::Config(format!(
            "Input path is not a directory: {}",
            input.display()
        )));
    }

    info!("Input directory: {}", input.display());
    Ok(())
}

/// The output root may only live inside the input root below an excluded
/// directory; otherwise generated files would be read back as input. The
/// input root must never live inside the output root. Anything that deletes
/// the output root has to pass this check first.
pub fn validate_directory_nesting(config: &Config) -> SiteResult<()> {
    let input = absolute_path(&config.input);
    let output = absolute_path(&config.output);

    if output == input {
        return Err(SiteError::Config(format!(
            "Output directory must differ from the input directory: {}",
            output.display()
        )));
    }

    if let Ok(relative) = output.strip_prefix(&input) {
        let excluded = relative.components().any(|component| match component {
            Component::Normal(name) => is_excluded_name(name),
            _ => false,
        });
        if !excluded {
            return Err(SiteError::Config(format!(
                "Output directory {} is inside the input directory {}; put it below a directory starting with '_'",
                output.display(),
                input.display()
            )));
        }
    }

    if input.starts_with(&output) {
        return Err(SiteError::Config(format!(
            "Input directory {} is inside the output directory {}",
            input.display(),
            output.display()
        )));
    }

    Ok(())
}

fn validate_output_directory(config: &Config) -> SiteResult<()> {
    let output = &config.output;

    if !output.exists() {
        info!("Creating output directory: {}", output.display());
        return create_directory(output);
    }

    if !output.is_dir() {
        return Err(SiteError::Config(format!(
            "Output path is a file, not a directory: {}",
            output.display()
        )));
    }

    warn!(
        "Output directory {} already exists, files in it may be overwritten",
        output.display()
    );
    Ok(())
}

fn create_directory(path: &Path) -> SiteResult<()> {
    fs::create_dir_all(path).map_err(|source| SiteError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })
}
