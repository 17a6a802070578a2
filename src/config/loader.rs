use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::defaults;
use crate::config::types::{Config, ConfigOverrides};
use crate::utils::error::{SiteError, SiteResult};

/// Configuration file names looked up in the input directory, in order
const CONFIG_FILES: [&str; 3] = ["_config.toml", "_config.yml", "_config.yaml"];

/// Load the configuration: defaults, then the config file, then `overrides`.
///
/// The config file is `overrides.config_file` when given, otherwise the first
/// of `_config.toml`, `_config.yml` and `_config.yaml` found in the input
/// directory. A relative `input` in the file is resolved against the file's
/// directory. A relative `output` that does not come from the command line is
/// resolved against the input directory.
pub fn load_config(overrides: &ConfigOverrides) -> SiteResult<Config> {
    let input_hint = overrides.input.clone().unwrap_or_else(defaults::default_input);

    let config_path = match &overrides.config_file {
        Some(path) => Some(path.clone()),
        None => find_config_file(&input_hint),
    };

    let mut config = match &config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let mut config = read_config_file(path)?;
            if config.input.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                config.input = base.join(&config.input);
            }
            config
        }
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, overrides);

    if overrides.output.is_none() && config.output.is_relative() {
        config.output = config.input.join(&config.output);
    }

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// First config file present in `input_dir`
pub fn find_config_file(input_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| input_dir.join(name))
        .find(|path| path.is_file())
}

fn read_config_file(path: &Path) -> SiteResult<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        SiteError::Config(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "toml" => parse_toml_config(&content, path),
        "yml" | "yaml" => parse_yaml_config(&content, path),
        other => Err(SiteError::Config(format!(
            "Unsupported configuration file format '{}': {}",
            other,
            path.display()
        ))),
    }
}

fn parse_toml_config(content: &str, path: &Path) -> SiteResult<Config> {
    toml::from_str(content).map_err(|e| {
        SiteError::Config(format!(
            "Failed to parse TOML configuration ({}): {}",
            path.display(),
            e
        ))
    })
}

fn parse_yaml_config(content: &str, path: &Path) -> SiteResult<Config> {
    // An empty YAML document deserializes to null
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(content).map_err(|e| {
        SiteError::Config(format!(
            "Failed to parse YAML configuration ({}): {}",
            path.display(),
            e
        ))
    })
}

fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(input) = &overrides.input {
        config.input = input.clone();
    }
    if let Some(output) = &overrides.output {
        config.output = output.clone();
    }
    if let Some(marker) = &overrides.template_marker {
        config.template_marker = marker.clone();
    }
    config.delete_output |= overrides.delete_output;
    config.watch |= overrides.watch;
}
