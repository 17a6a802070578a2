use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Prefix that excludes a file or directory from the output
pub const EXCLUDED_PREFIX: char = '_';

/// Whether a single file or directory name is excluded from generation
pub fn is_excluded_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with(EXCLUDED_PREFIX)
}

/// Normalize a path, resolving ".." and "." components
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::ParentDir => {
                // Go up one level unless we're at the root
                if result.parent().is_some() {
                    result.pop();
                }
            }
            Component::CurDir => {}
            _ => result.push(component),
        }
    }

    result
}

/// Make a path absolute against the current directory, without touching the filesystem
pub fn absolute_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_path(absolute)
}

/// Path of `path` below `base`, or the path with its root stripped when it is not below `base`
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path
            .components()
            .filter(|component| !matches!(component, Component::Prefix(_) | Component::RootDir))
            .collect(),
    }
}

/// Join the components of a relative path with `/`
pub fn to_url_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
