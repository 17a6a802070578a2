mod parser;
mod types;

pub use parser::{read_metadata_block, strip_metadata_block, BLOCK_SENTINEL};
pub use types::{Metadata, MetadataValue};
