//! Publishes modified stylesheets into the target module.

use std::path::Path;

use tracing::{debug, info};

use crate::env::FileStore;
use crate::error::{Result, SwitchError};
use crate::record::StylesheetRecord;
use crate::report::{PublishOutcome, PUBLISHED_MESSAGE};

/// Copies every modified record into `target_dir`.
///
/// - No records at all: returns [`PublishOutcome::NoStylesheets`] without
///   touching the target.
/// - Records but none modified: prepares `target_dir` and returns
///   [`PublishOutcome::NothingModified`].
/// - Otherwise copies each modified record to `<target_dir>/<name>`,
///   overwriting, and returns [`PublishOutcome::Published`].
///
/// Copy failures abort publication and propagate.
pub fn publish_stylesheets(
    fs: &dyn FileStore,
    target_dir: &Path,
    records: &[StylesheetRecord],
) -> Result<PublishOutcome> {
    if records.is_empty() {
        debug!("no stylesheets to publish");
        return Ok(PublishOutcome::NoStylesheets);
    }

    fs.prepare_directory(target_dir)
        .map_err(|e| SwitchError::io("create directory", target_dir, e))?;

    let mut copied = Vec::new();
    for record in records.iter().filter(|r| r.modified) {
        let dest = target_dir.join(&record.name);
        fs.copy(&record.current_path, &dest)
            .map_err(|e| SwitchError::io("copy", &record.current_path, e))?;
        debug!(name = %record.name, to = %dest.display(), "published stylesheet");
        copied.push(record.name.clone());
    }

    if copied.is_empty() {
        info!(dir = %target_dir.display(), "no modified stylesheet to publish");
        return Ok(PublishOutcome::NothingModified {
            target_dir: target_dir.to_path_buf(),
        });
    }

    info!(count = copied.len(), dir = %target_dir.display(), "stylesheets published");
    Ok(PublishOutcome::Published {
        message: PUBLISHED_MESSAGE.to_string(),
        target_dir: target_dir.to_path_buf(),
        copied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockFileStore;
    use std::path::PathBuf;

    fn staged(name: &str, modified: bool) -> StylesheetRecord {
        let mut record = StylesheetRecord::new(name, format!("/themes/demo/css/{}", name));
        record.current_path = Path::new("/staging").join(name);
        record.modified = modified;
        record
    }

    #[test]
    fn test_publish_copies_only_modified() {
        let store = MockFileStore::new()
            .with_file("/staging/a.css", "switched")
            .with_file("/staging/b.css", "untouched");
        let records = vec![staged("a.css", true), staged("b.css", false)];

        let outcome = publish_stylesheets(&store, Path::new("/target/css"), &records).unwrap();

        assert_eq!(
            outcome,
            PublishOutcome::Published {
                message: PUBLISHED_MESSAGE.to_string(),
                target_dir: PathBuf::from("/target/css"),
                copied: vec!["a.css".to_string()],
            }
        );
        assert_eq!(store.contents("/target/css/a.css").as_deref(), Some("switched"));
        assert!(!store.exists("/target/css/b.css"));
    }

    #[test]
    fn test_publish_overwrites_existing_target() {
        let store = MockFileStore::new()
            .with_file("/staging/a.css", "new")
            .with_file("/target/css/a.css", "old");
        let records = vec![staged("a.css", true)];

        publish_stylesheets(&store, Path::new("/target/css"), &records).unwrap();
        assert_eq!(store.contents("/target/css/a.css").as_deref(), Some("new"));
    }

    #[test]
    fn test_publish_empty_records_short_circuits() {
        let store = MockFileStore::new();
        let outcome = publish_stylesheets(&store, Path::new("/target/css"), &[]).unwrap();
        assert_eq!(outcome, PublishOutcome::NoStylesheets);
        assert!(!store.has_dir("/target/css"));
    }

    #[test]
    fn test_publish_nothing_modified() {
        let store = MockFileStore::new().with_file("/staging/b.css", "untouched");
        let records = vec![staged("b.css", false)];

        let outcome = publish_stylesheets(&store, Path::new("/target/css"), &records).unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::NothingModified {
                target_dir: PathBuf::from("/target/css"),
            }
        );
        assert!(store.has_dir("/target/css"));
        assert!(store.files_in("/target/css").is_empty());
    }

    #[test]
    fn test_publish_copy_failure_propagates() {
        let store = MockFileStore::new();
        let records = vec![staged("a.css", true)];
        let err = publish_stylesheets(&store, Path::new("/target/css"), &records).unwrap_err();
        assert!(matches!(err, SwitchError::Io { op: "copy", .. }));
    }
}
