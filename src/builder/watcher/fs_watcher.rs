use std::collections::HashSet;
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use log::{debug, info};
use notify::{Event, EventKind, RecursiveMode, Result as NotifyResult, Watcher};
use walkdir::WalkDir;

use crate::utils::error::{SiteError, SiteResult};
use crate::utils::path::absolute_path;

/// Quiet period that closes a change batch
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Whether an event describes a change to the watched tree.
/// Access events and overflow (rescan) notifications are ignored.
fn is_change(event: &Event) -> bool {
    if event.need_rescan() {
        return false;
    }
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}

fn is_not_found(err: &notify::Error) -> bool {
    match &err.kind {
        notify::ErrorKind::PathNotFound => true,
        notify::ErrorKind::Io(io_err) => io_err.kind() == io::ErrorKind::NotFound,
        _ => false,
    }
}

fn is_ignored(path: &Path, ignored: &[PathBuf]) -> bool {
    ignored.iter().any(|ignored| path.starts_with(ignored))
}

/// Directories registered with the underlying watcher, one non-recursive watch each
#[derive(Debug, Default)]
struct WatchRegistry {
    watched: HashSet<PathBuf>,
}

impl WatchRegistry {
    /// Register `dir` and every directory below it that is not registered yet.
    /// Subtrees rooted at an `ignored` path are left out.
    fn register_tree<W: Watcher>(
        &mut self,
        watcher: &mut W,
        dir: &Path,
        ignored: &[PathBuf],
    ) -> SiteResult<usize> {
        let mut added = 0;
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.file_type().is_dir() && !is_ignored(entry.path(), ignored));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) => {
                    continue;
                }
                Err(err) => {
                    let message = err.to_string();
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
                    return Err(SiteError::ReadDirectory { path, source });
                }
            };

            if self.watched.contains(entry.path()) {
                continue;
            }

            match watcher.watch(entry.path(), RecursiveMode::NonRecursive) {
                Ok(()) => {
                    debug!("Watching directory {}", entry.path().display());
                    self.watched.insert(entry.path().to_path_buf());
                    added += 1;
                }
                // Removed before we got to it
                Err(err) if is_not_found(&err) => {}
                Err(source) => {
                    return Err(SiteError::Watch {
                        path: entry.path().to_path_buf(),
                        source,
                    })
                }
            }
        }

        Ok(added)
    }

    /// Drop `path` and everything registered below it
    fn forget(&mut self, path: &Path) {
        self.watched.retain(|watched| !watched.starts_with(path));
    }

    fn len(&self) -> usize {
        self.watched.len()
    }
}

/// Watches a directory tree and reports batches of changes.
///
/// Every directory under the root gets its own watch. Directories created
/// later are registered as their events arrive, so files added deep inside a
/// new subtree are observed too. Events arriving within the settle delay of
/// each other form one batch, and each batch triggers a single callback.
///
/// Ignored paths are neither watched nor reported. The driver ignores the
/// output root when it lies inside the input root, so a regeneration does not
/// trigger itself.
#[derive(Debug, Clone)]
pub struct DirectoryWatcher {
    root: PathBuf,
    settle_delay: Duration,
    ignored: Vec<PathBuf>,
}

impl DirectoryWatcher {
    pub fn new(root: impl AsRef<Path>) -> Self {
        DirectoryWatcher {
            root: absolute_path(root),
            settle_delay: DEFAULT_SETTLE_DELAY,
            ignored: Vec::new(),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Leave `path` and everything below it out of the watch
    pub fn ignoring(mut self, path: impl AsRef<Path>) -> Self {
        self.ignored.push(absolute_path(path));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Block and call `on_change` once per change batch.
    ///
    /// Returns `Ok(())` only when `on_change` breaks. Failing to register a
    /// watch, a watch error and a closed event stream are all returned as errors.
    pub fn watch<F>(&self, mut on_change: F) -> SiteResult<()>
    where
        F: FnMut() -> ControlFlow<()>,
    {
        let (tx, rx) = channel::<NotifyResult<Event>>();
        let mut watcher = notify::recommended_watcher(tx).map_err(|source| SiteError::Watch {
            path: self.root.clone(),
            source,
        })?;

        let mut registry = WatchRegistry::default();
        registry.register_tree(&mut watcher, &self.root, &self.ignored)?;
        info!(
            "Watching {} for changes ({} directories)",
            self.root.display(),
            registry.len()
        );

        loop {
            let batch = self.next_batch(&rx)?;

            let mut changed = false;
            for event in batch {
                let event = event.map_err(|source| SiteError::Watch {
                    path: self.root.clone(),
                    source,
                })?;
                if !is_change(&event) {
                    continue;
                }
                let paths: Vec<&PathBuf> = event
                    .paths
                    .iter()
                    .filter(|path| !is_ignored(path, &self.ignored))
                    .collect();
                if paths.is_empty() && !event.paths.is_empty() {
                    continue;
                }
                changed = true;
                debug!("File event: {:?}", event);

                for path in paths {
                    if matches!(event.kind, EventKind::Remove(_)) {
                        registry.forget(path);
                    } else if path.is_dir() {
                        let added = registry.register_tree(&mut watcher, path, &self.ignored)?;
                        if added > 0 {
                            debug!("Registered {} new directories under {}", added, path.display());
                        }
                    }
                }
            }

            if !changed {
                continue;
            }

            if on_change().is_break() {
                return Ok(());
            }
        }
    }

    /// Wait for the first event, then collect everything that follows until the tree is quiet
    fn next_batch(&self, rx: &Receiver<NotifyResult<Event>>) -> SiteResult<Vec<NotifyResult<Event>>> {
        let terminated = || SiteError::WatchTerminated {
            path: self.root.clone(),
        };

        let first = rx.recv().map_err(|_| terminated())?;
        let mut batch = vec![first];
        loop {
            match rx.recv_timeout(self.settle_delay) {
                Ok(event) => batch.push(event),
                Err(RecvTimeoutError::Timeout) => return Ok(batch),
                Err(RecvTimeoutError::Disconnected) => return Err(terminated()),
            }
        }
    }
}
