mod build;
mod clean;

pub use build::{handle_build_command, regenerate, run_generation};
pub use clean::handle_clean_command;
