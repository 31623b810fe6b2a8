//! Collaborator abstractions for testability.
//!
//! The pipeline never touches the filesystem or the user directly. It goes
//! through two traits:
//!
//! - [`FileStore`]: directory scanning, directory creation, copy, read, write
//! - [`Notifier`]: status, warning and error messages meant for the user
//!
//! Real implementations ([`LocalFileStore`], [`ConsoleNotifier`]) are used by
//! the command line tool. The mocks ([`MockFileStore`], [`MockNotifier`]) keep
//! everything in memory so pipeline behaviour can be asserted without a disk.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use console::style;
use tracing::warn;
use walkdir::WalkDir;

/// Directory names never descended into while scanning.
pub const SKIPPED_DIRS: &[&str] = &["CVS", "node_modules", "bower_components"];

/// A file found by [`FileStore::scan_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// Base filename, e.g. `"style.css"`.
    pub filename: String,
}

impl ScannedFile {
    fn from_path(path: PathBuf) -> Option<Self> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, filename })
    }
}

/// Filesystem operations the pipeline depends on.
pub trait FileStore: Send + Sync {
    /// Lists files under `dir` whose name ends with `suffix`.
    ///
    /// A missing directory yields an empty list, not an error.
    fn scan_directory(
        &self,
        dir: &Path,
        suffix: &str,
        recursive: bool,
    ) -> io::Result<Vec<ScannedFile>>;

    /// Creates `dir` and any missing parents. Succeeds if it already exists.
    fn prepare_directory(&self, dir: &Path) -> io::Result<()>;

    /// Copies `from` to `to`, replacing any existing file at `to`.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Reads the whole file as text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes `contents` to `path`, replacing any existing content.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Sink for user-facing messages.
pub trait Notifier: Send + Sync {
    /// Reports progress or a final status.
    fn status(&self, message: &str);

    /// Reports a recovered problem.
    fn warning(&self, message: &str);

    /// Reports a problem that disabled part of the run.
    fn error(&self, message: &str);
}

// === Real implementations ===

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileStore;

impl FileStore for LocalFileStore {
    fn scan_directory(
        &self,
        dir: &Path,
        suffix: &str,
        recursive: bool,
    ) -> io::Result<Vec<ScannedFile>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip))
            });

        let mut files = Vec::new();
        for entry in walker {
            // Unreadable directories and link loops are skipped, not fatal.
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if !entry.file_name().to_string_lossy().ends_with(suffix) {
                continue;
            }
            if let Some(file) = ScannedFile::from_path(entry.into_path()) {
                files.push(file);
            }
        }
        Ok(files)
    }

    fn prepare_directory(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// [`Notifier`] that prints styled messages to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn status(&self, message: &str) {
        eprintln!("{} {}", style("status:").green().bold(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("error:").red().bold(), message);
    }
}

// === Mock implementations for testing ===

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    failing_writes: BTreeSet<PathBuf>,
    writes: usize,
}

/// In-memory [`FileStore`] for testing.
///
/// Files are plain `path -> text` entries. Writes to paths registered with
/// [`fail_writes_to`](Self::fail_writes_to) fail with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MockFileStore {
    state: Mutex<MemoryState>,
}

impl MockFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        lock(&self.state)
            .files
            .insert(path.into(), contents.into());
        self
    }

    /// Make every write to `path` fail.
    pub fn fail_writes_to(self, path: impl Into<PathBuf>) -> Self {
        lock(&self.state).failing_writes.insert(path.into());
        self
    }

    /// Current contents of `path`, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.state).files.get(path.as_ref()).cloned()
    }

    /// Returns true if a file exists at `path`.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        lock(&self.state).files.contains_key(path.as_ref())
    }

    /// Returns true if `dir` was prepared.
    pub fn has_dir(&self, dir: impl AsRef<Path>) -> bool {
        lock(&self.state).dirs.contains(dir.as_ref())
    }

    /// Paths of all files directly inside `dir`.
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        lock(&self.state)
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect()
    }

    /// Number of successful [`write`](FileStore::write) calls.
    pub fn write_count(&self) -> usize {
        lock(&self.state).writes
    }
}

impl FileStore for MockFileStore {
    fn scan_directory(
        &self,
        dir: &Path,
        suffix: &str,
        recursive: bool,
    ) -> io::Result<Vec<ScannedFile>> {
        let state = lock(&self.state);
        let files = state
            .files
            .keys()
            .filter(|path| {
                if recursive {
                    path.starts_with(dir) && path.as_path() != dir
                } else {
                    path.parent() == Some(dir)
                }
            })
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().ends_with(suffix))
            })
            .filter_map(|path| ScannedFile::from_path(path.clone()))
            .collect();
        Ok(files)
    }

    fn prepare_directory(&self, dir: &Path) -> io::Result<()> {
        lock(&self.state).dirs.insert(dir.to_path_buf());
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = lock(&self.state);
        let contents = state.files.get(from).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", from.display()),
            )
        })?;
        state.files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        lock(&self.state).files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut state = lock(&self.state);
        if state.failing_writes.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.writes += 1;
        Ok(())
    }
}

/// Severity of a recorded notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Status,
    Warning,
    Error,
}

/// A message captured by [`MockNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// [`Notifier`] that records messages for assertions.
#[derive(Debug, Default)]
pub struct MockNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MockNotifier {
    /// Create a notifier with no recorded messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notices in order.
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.messages(NoticeLevel::Warning)
    }

    /// Recorded errors.
    pub fn errors(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }

    fn record(&self, level: NoticeLevel, message: &str) {
        lock(&self.notices).push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

impl Notifier for MockNotifier {
    fn status(&self, message: &str) {
        self.record(NoticeLevel::Status, message);
    }

    fn warning(&self, message: &str) {
        self.record(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.record(NoticeLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_file(dir: &Path, relative_path: &str, content: &str) {
        let full_path = dir.join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    fn filenames(files: &[ScannedFile]) -> Vec<&str> {
        let mut names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_local_scan_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = LocalFileStore
            .scan_directory(&temp_dir.path().join("missing"), ".css", true)
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_local_scan_filters_suffix_recursively() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.css", "a");
        create_file(temp_dir.path(), "notes.txt", "n");
        create_file(temp_dir.path(), "nested/deep/b.css", "b");
        create_file(temp_dir.path(), "nested/c.css.map", "c");

        let files = LocalFileStore
            .scan_directory(temp_dir.path(), ".css", true)
            .unwrap();
        assert_eq!(filenames(&files), vec!["a.css", "b.css"]);
        assert!(files
            .iter()
            .any(|f| f.path == temp_dir.path().join("nested/deep/b.css")));
    }

    #[test]
    fn test_local_scan_non_recursive_stays_at_top() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.css", "a");
        create_file(temp_dir.path(), "nested/b.css", "b");

        let files = LocalFileStore
            .scan_directory(temp_dir.path(), ".css", false)
            .unwrap();
        assert_eq!(filenames(&files), vec!["a.css"]);
    }

    #[test]
    fn test_local_scan_skips_vendor_dirs() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.css", "a");
        create_file(temp_dir.path(), "node_modules/pkg/b.css", "b");

        let files = LocalFileStore
            .scan_directory(temp_dir.path(), ".css", true)
            .unwrap();
        assert_eq!(filenames(&files), vec!["a.css"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_scan_follows_symlinked_files() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "shared/base.css", "a");
        create_file(temp_dir.path(), "css/own.css", "b");
        std::os::unix::fs::symlink(
            temp_dir.path().join("shared/base.css"),
            temp_dir.path().join("css/base.css"),
        )
        .unwrap();

        let files = LocalFileStore
            .scan_directory(&temp_dir.path().join("css"), ".css", true)
            .unwrap();
        assert_eq!(filenames(&files), vec!["base.css", "own.css"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_scan_skips_walk_errors() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "css/a.css", "a");
        create_file(temp_dir.path(), "css/nested/b.css", "b");
        // A link back to an ancestor makes the walker report a loop.
        std::os::unix::fs::symlink(
            temp_dir.path().join("css"),
            temp_dir.path().join("css/nested/loop"),
        )
        .unwrap();

        let files = LocalFileStore
            .scan_directory(&temp_dir.path().join("css"), ".css", true)
            .unwrap();
        assert_eq!(filenames(&files), vec!["a.css", "b.css"]);
    }

    #[test]
    fn test_local_copy_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "src.css", "new");
        create_file(temp_dir.path(), "dest.css", "old");

        LocalFileStore
            .copy(&temp_dir.path().join("src.css"), &temp_dir.path().join("dest.css"))
            .unwrap();
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("dest.css")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_local_prepare_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a/b/c");
        LocalFileStore.prepare_directory(&dir).unwrap();
        LocalFileStore.prepare_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_mock_store_scan_and_copy() {
        let store = MockFileStore::new()
            .with_file("/t/css/a.css", "a")
            .with_file("/t/css/sub/b.css", "b")
            .with_file("/t/js/c.js", "c");

        let files = store.scan_directory(Path::new("/t/css"), ".css", true).unwrap();
        assert_eq!(filenames(&files), vec!["a.css", "b.css"]);

        store
            .copy(Path::new("/t/css/a.css"), Path::new("/tmp/a.css"))
            .unwrap();
        assert_eq!(store.contents("/tmp/a.css").as_deref(), Some("a"));
    }

    #[test]
    fn test_mock_store_failing_write() {
        let store = MockFileStore::new().fail_writes_to("/tmp/a.css");
        let err = store.write(Path::new("/tmp/a.css"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_mock_store_copy_missing_source() {
        let store = MockFileStore::new();
        let err = store
            .copy(Path::new("/nope.css"), Path::new("/tmp/nope.css"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_notifier_records_levels() {
        let notifier = MockNotifier::new();
        notifier.status("done");
        notifier.warning("careful");
        notifier.error("broken");

        assert_eq!(notifier.notices().len(), 3);
        assert_eq!(notifier.warnings(), vec!["careful".to_string()]);
        assert_eq!(notifier.errors(), vec!["broken".to_string()]);
        assert_eq!(notifier.messages(NoticeLevel::Status), vec!["done".to_string()]);
    }
}
