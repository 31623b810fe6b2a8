//! Stylesheet discovery inside a theme.
//!
//! A theme declares the folders holding its stylesheets as path fragments
//! relative to the theme directory (`"/css/"`, `"dist/styles"`). Each fragment
//! is scanned recursively for `.css` files:
//!
//! ```text
//! themes/demo/                  styles_paths: ["/css/"]
//! ├── css/
//! │   ├── base.css          →   StylesheetRecord { name: "base.css", .. }
//! │   └── components/
//! │       └── card.css      →   StylesheetRecord { name: "card.css", .. }
//! └── js/
//!     └── app.js                (not scanned)
//! ```
//!
//! Missing folders contribute nothing. The order of the returned records
//! follows directory traversal and is not stable across platforms.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::FileStore;
use crate::error::{Result, SwitchError};
use crate::record::StylesheetRecord;

/// Filename suffix of the files picked up by discovery.
pub const STYLESHEET_SUFFIX: &str = ".css";

/// Joins a configured path fragment onto a base directory.
///
/// Fragments are always relative to `base`, so a leading `/` does not
/// escape it: `"/css/"` under `themes/demo` is `themes/demo/css`.
pub fn join_fragment(base: &Path, fragment: &str) -> PathBuf {
    let relative = fragment.trim_start_matches('/');
    if relative.is_empty() {
        base.to_path_buf()
    } else {
        base.join(relative)
    }
}

/// Finds every stylesheet under the theme's style paths.
pub fn discover_stylesheets<S: AsRef<str>>(
    fs: &dyn FileStore,
    theme_base: &Path,
    style_paths: &[S],
) -> Result<Vec<StylesheetRecord>> {
    let mut records = Vec::new();

    for fragment in style_paths {
        let dir = join_fragment(theme_base, fragment.as_ref());
        let found = fs
            .scan_directory(&dir, STYLESHEET_SUFFIX, true)
            .map_err(|e| SwitchError::io("scan", &dir, e))?;

        debug!(dir = %dir.display(), count = found.len(), "scanned style path");
        records.extend(
            found
                .into_iter()
                .map(|file| StylesheetRecord::new(file.filename, file.path)),
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{LocalFileStore, MockFileStore};
    use tempfile::TempDir;

    fn names(records: &[StylesheetRecord]) -> Vec<&str> {
        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_join_fragment_strips_leading_slash() {
        let base = Path::new("themes/demo");
        assert_eq!(join_fragment(base, "/css/"), PathBuf::from("themes/demo/css/"));
        assert_eq!(join_fragment(base, "css"), PathBuf::from("themes/demo/css"));
        assert_eq!(join_fragment(base, "/"), PathBuf::from("themes/demo"));
    }

    #[test]
    fn test_discover_across_multiple_paths() {
        let store = MockFileStore::new()
            .with_file("/themes/demo/css/a.css", "a")
            .with_file("/themes/demo/css/nested/b.css", "b")
            .with_file("/themes/demo/dist/c.css", "c")
            .with_file("/themes/demo/js/app.js", "js");

        let records =
            discover_stylesheets(&store, Path::new("/themes/demo"), &["/css/", "/dist/"]).unwrap();

        assert_eq!(names(&records), vec!["a.css", "b.css", "c.css"]);
        assert!(records.iter().all(|r| !r.modified && !r.is_staged()));
        assert!(records
            .iter()
            .any(|r| r.source_path == Path::new("/themes/demo/css/nested/b.css")));
    }

    #[test]
    fn test_discover_missing_path_contributes_nothing() {
        let store = MockFileStore::new().with_file("/themes/demo/css/a.css", "a");
        let records =
            discover_stylesheets(&store, Path::new("/themes/demo"), &["/missing/", "/css/"])
                .unwrap();
        assert_eq!(names(&records), vec!["a.css"]);
    }

    #[test]
    fn test_discover_no_css_files_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("css")).unwrap();
        std::fs::write(temp_dir.path().join("css/readme.txt"), "none").unwrap();

        let records = discover_stylesheets(&LocalFileStore, temp_dir.path(), &["/css/"]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_discover_no_style_paths() {
        let store = MockFileStore::new().with_file("/themes/demo/css/a.css", "a");
        let paths: Vec<String> = Vec::new();
        let records = discover_stylesheets(&store, Path::new("/themes/demo"), &paths).unwrap();
        assert!(records.is_empty());
    }
}
