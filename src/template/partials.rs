use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use liquid::partials::PartialSource;

/// Partial templates for `{% include %}`, read from disk relative to the input root.
///
/// Includes usually live under `_`-prefixed directories so they never reach the output.
#[derive(Debug, Clone)]
pub struct SiteIncludes {
    root: PathBuf,
}

impl SiteIncludes {
    pub fn new(root: impl AsRef<Path>) -> Self {
        SiteIncludes {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name.trim_start_matches('/'))
    }
}

impl PartialSource for SiteIncludes {
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn try_get<'a>(&'a self, name: &str) -> Option<Cow<'a, str>> {
        fs::read_to_string(self.resolve(name)).ok().map(Cow::Owned)
    }
}
