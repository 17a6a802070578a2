pub mod processor;
pub mod site;
pub mod site_file;
pub mod watcher;

pub use processor::{FileProcessor, MetadataProcessor, TemplateNaming, TemplateProcessor};
pub use site::{create_site_generator, GenerationStats, NameTransform, OutputPaths, SiteGenerator};
pub use site_file::SiteFile;
pub use watcher::DirectoryWatcher;
