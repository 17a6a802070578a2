use log::debug;

use crate::builder::processor::FileProcessor;
use crate::builder::site_file::SiteFile;
use crate::metadata::{read_metadata_block, strip_metadata_block, BLOCK_SENTINEL};
use crate::utils::error::SiteResult;

/// Moves a leading `+++` metadata block from the content into the file's metadata.
///
/// The block is replaced by blank lines so later line numbers stay valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataProcessor;

impl FileProcessor for MetadataProcessor {
    fn process(&self, file: &mut SiteFile) -> SiteResult<()> {
        if !file.content().starts_with(BLOCK_SENTINEL.as_bytes()) {
            return Ok(());
        }
        let Some(text) = file.text() else {
            return Ok(());
        };
        let Some(metadata) = read_metadata_block(text) else {
            return Ok(());
        };

        let stripped = strip_metadata_block(text).into_owned();
        debug!(
            "Read {} metadata entries from {}",
            metadata.len(),
            file.input().display()
        );

        file.metadata_mut().extend(metadata);
        file.set_content(stripped.into_bytes());
        Ok(())
    }

    fn process_output_file_name(&self, name: &str) -> String {
        name.to_string()
    }
}
