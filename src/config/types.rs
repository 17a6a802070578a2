use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::builder::TemplateNaming;
use crate::config::defaults;

/// Site generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the site is read from
    #[serde(default = "defaults::default_input")]
    pub input: PathBuf,

    /// Directory the site is written to
    #[serde(default = "defaults::default_output")]
    pub output: PathBuf,

    /// Delete and recreate the output directory before every pass
    #[serde(default)]
    pub delete_output: bool,

    /// Keep watching the input directory and regenerate on changes
    #[serde(default)]
    pub watch: bool,

    /// File name infix that marks templates
    #[serde(default = "defaults::default_template_marker")]
    pub template_marker: String,

    /// Quiet period, in milliseconds, that closes a batch of file changes
    #[serde(default = "defaults::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Config {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn template_naming(&self) -> TemplateNaming {
        TemplateNaming::new(self.template_marker.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: defaults::default_input(),
            output: defaults::default_output(),
            delete_output: false,
            watch: false,
            template_marker: defaults::default_template_marker(),
            settle_delay_ms: defaults::default_settle_delay_ms(),
        }
    }
}

/// Settings given on the command line. They take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub delete_output: bool,
    pub watch: bool,
    pub template_marker: Option<String>,
}
