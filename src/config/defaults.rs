use std::path::PathBuf;

use crate::builder::processor::DEFAULT_TEMPLATE_MARKER;
use crate::builder::watcher::DEFAULT_SETTLE_DELAY;

/// Default input directory
pub fn default_input() -> PathBuf {
    PathBuf::from(".")
}

/// Default output directory, relative to the input directory
pub fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

pub fn default_template_marker() -> String {
    DEFAULT_TEMPLATE_MARKER.to_string()
}

pub fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY.as_millis() as u64
}
