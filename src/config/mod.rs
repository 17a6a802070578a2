mod defaults;
mod loader;
mod types;
mod validation;

pub use loader::{find_config_file, load_config};
pub use types::{Config, ConfigOverrides};
pub use validation::{validate_config, validate_directory_nesting};
