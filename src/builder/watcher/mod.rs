mod fs_watcher;

pub use fs_watcher::{DirectoryWatcher, DEFAULT_SETTLE_DELAY};
