use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Common result type for site generation
pub type SiteResult<T> = Result<T, SiteError>;

/// Error types for site generation
#[derive(Debug, Error)]
pub enum SiteError {
    /// Invalid configuration, detected before any generation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error on a specific path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The mirrored output directory could not be created
    #[error("Couldn't create output directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory of the input tree could not be listed
    #[error("Couldn't read directory {}: {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template parse or render failure
    #[error("Template error in {}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    /// Any failure while reading, processing or writing a single input file
    #[error("Couldn't generate output for file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<SiteError>,
    },

    /// Watch registration or delivery failure
    #[error("Watching directory {} for changes failed: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The event stream of the watcher ended
    #[error("Watching directory {} for changes failed: event stream terminated", path.display())]
    WatchTerminated { path: PathBuf },
}

impl SiteError {
    /// Wrap an IO error together with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attribute this error to a single input file
    pub fn for_file(self, path: impl Into<PathBuf>) -> Self {
        SiteError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
