use std::path::{Path, PathBuf};

use crate::metadata::Metadata;

/// One input file moving through the processor chain.
///
/// Created by the generator right before the file is processed, with the raw
/// bytes from disk and empty metadata. Each processor sees the mutations of the
/// processors before it. After the last processor, `content` is written to `output`.
#[derive(Debug, Clone)]
pub struct SiteFile {
    input: PathBuf,
    output: PathBuf,
    content: Vec<u8>,
    metadata: Metadata,
}

impl SiteFile {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, content: Vec<u8>) -> Self {
        SiteFile {
            input: input.into(),
            output: output.into(),
            content,
            metadata: Metadata::new(),
        }
    }

    /// Absolute path of the source file
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path the final content will be written to
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn set_output(&mut self, output: impl Into<PathBuf>) {
        self.output = output.into();
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn set_content(&mut self, content: Vec<u8>) {
        self.content = content;
    }

    /// Content as UTF-8 text, or `None` for binary files
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// File name of the input, lossily converted
    pub fn input_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
