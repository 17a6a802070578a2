pub mod builder;
pub mod cli;
pub mod config;
pub mod directory;
pub mod metadata;
pub mod template;
pub mod utils;
