mod generator;
mod output;
mod setup;

pub use generator::{GenerationStats, SiteGenerator};
pub use output::{NameTransform, OutputPaths};
pub use setup::create_site_generator;
