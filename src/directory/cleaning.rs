use std::fs;
use std::io;
use std::path::Path;

use log::info;

use crate::utils::error::{SiteError, SiteResult};
use crate::utils::path::absolute_path;

/// Remove the output directory with all its contents and create it again empty.
///
/// A missing directory is simply created. Refuses to touch a regular file or a
/// filesystem root.
pub fn delete_and_create_output(output: &Path) -> SiteResult<()> {
    if absolute_path(output).parent().is_none() {
        return Err(SiteError::Config(format!(
            "Refusing to delete filesystem root: {}",
            output.display()
        )));
    }

    if output.is_file() {
        return Err(SiteError::Config(format!(
            "Output path is a file, not a directory: {}",
            output.display()
        )));
    }

    if output.exists() {
        info!("Cleaning output directory: {}", output.display());
        match fs::remove_dir_all(output) {
            Ok(()) => {}
            // Removed concurrently
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SiteError::io(output, e)),
        }
    }

    fs::create_dir_all(output).map_err(|source| SiteError::CreateDirectory {
        path: output.to_path_buf(),
        source,
    })
}
