use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::utils::path::{absolute_path, relative_to, to_url_path};

/// A pure mapping from one output file name to another
pub trait NameTransform: fmt::Debug + Send + Sync {
    fn transform(&self, name: &str) -> String;
}

/// Stage one of output path derivation: substitute the input root with the output root
pub(crate) fn mirror_path(input_dir: &Path, output_dir: &Path, path: &Path) -> PathBuf {
    let relative = relative_to(&absolute_path(path), input_dir);
    if relative.as_os_str().is_empty() {
        output_dir.to_path_buf()
    } else {
        output_dir.join(relative)
    }
}

/// Stage two of output path derivation: rewrite the leaf file name
pub(crate) fn rename_leaf<F>(path: PathBuf, rename: F) -> PathBuf
where
    F: FnOnce(String) -> String,
{
    let Some(name) = path.file_name().map(|name| name.to_string_lossy().into_owned()) else {
        return path;
    };
    let renamed = rename(name.clone());
    if renamed == name {
        path
    } else {
        path.with_file_name(renamed)
    }
}

/// Output path derivation detached from a generator.
///
/// Applies the same two stages as [`SiteGenerator::output_path_for`](super::SiteGenerator::output_path_for)
/// with its own list of name transforms, so code that cannot borrow the generator
/// (template helpers) can still compute where a file will end up.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    input_dir: PathBuf,
    output_dir: PathBuf,
    naming: Vec<Arc<dyn NameTransform>>,
}

impl OutputPaths {
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        OutputPaths {
            input_dir: absolute_path(input_dir),
            output_dir: absolute_path(output_dir),
            naming: Vec::new(),
        }
    }

    /// Append a name transform; transforms apply in the order they were added
    pub fn with_naming(mut self, transform: impl NameTransform + 'static) -> Self {
        self.naming.push(Arc::new(transform));
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let mirrored = mirror_path(&self.input_dir, &self.output_dir, input);
        if mirrored == self.output_dir {
            return mirrored;
        }
        rename_leaf(mirrored, |name| {
            self.naming
                .iter()
                .fold(name, |name, transform| transform.transform(&name))
        })
    }

    /// Directory of an output file relative to the output root, `/`-separated
    /// with a trailing `/`; empty for files at the root
    pub fn output_directory(&self, output: &Path) -> String {
        let parent = output.parent().unwrap_or(output);
        let relative = to_url_path(&relative_to(parent, &self.output_dir));
        if relative.is_empty() {
            relative
        } else {
            format!("{}/", relative)
        }
    }

    /// Site-absolute URL of an output file, e.g. `/blog/post.html`
    pub fn url_for(&self, output: &Path) -> String {
        format!("/{}", to_url_path(&relative_to(output, &self.output_dir)))
    }
}
