//! Literal colour replacement in staged stylesheets.
//!
//! All colours of a [`ColorMapping`] are replaced in one left-to-right scan.
//! A colour written by a replacement is never looked at again, so swapping
//! two colours works:
//!
//! ```rust
//! use colorswitch::{ColorMapping, ColorReplacer};
//!
//! let raw = [("#fff", "#000"), ("#000", "#fff")];
//! let mapping = ColorMapping::try_build(&raw).unwrap();
//! let replacer = ColorReplacer::new(&mapping).unwrap();
//!
//! let (css, count) = replacer.replace("a{color:#fff;background:#000}");
//! assert_eq!(css, "a{color:#000;background:#fff}");
//! assert_eq!(count, 2);
//! ```
//!
//! Matching is case-sensitive: `#FFF` does not match a mapping for `#fff`.
//! When a colour is a prefix of another (`#fff` and `#ffffff`), the longer one
//! wins at any given position.

use std::borrow::Cow;
use std::collections::HashMap;

use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::color::ColorMapping;
use crate::env::{FileStore, Notifier};
use crate::record::StylesheetRecord;
use crate::report::{FileOutcome, FileStatus};

/// Single-pass replacer built from a colour mapping.
#[derive(Debug, Clone)]
pub struct ColorReplacer {
    matcher: Option<Regex>,
    replacements: HashMap<String, String>,
}

impl ColorReplacer {
    /// Builds the matcher for `mapping`.
    ///
    /// An empty mapping yields a replacer that never matches.
    pub fn new(mapping: &ColorMapping) -> Result<Self, regex::Error> {
        let mut replacements = HashMap::new();
        for (from, to) in mapping.pairs() {
            replacements
                .entry(from.as_str().to_string())
                .or_insert_with(|| to.as_str().to_string());
        }

        if replacements.is_empty() {
            return Ok(Self {
                matcher: None,
                replacements,
            });
        }

        // Longest first so a colour is never shadowed by its own prefix.
        let mut needles: Vec<&str> = replacements.keys().map(String::as_str).collect();
        needles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = needles
            .iter()
            .map(|needle| regex::escape(needle))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            matcher: Some(Regex::new(&pattern)?),
            replacements,
        })
    }

    /// Replaces every mapped colour in `text`, returning the new text and the
    /// number of replacements made.
    pub fn replace<'t>(&self, text: &'t str) -> (Cow<'t, str>, usize) {
        let Some(matcher) = &self.matcher else {
            return (Cow::Borrowed(text), 0);
        };

        let mut count = 0;
        let replaced = matcher.replace_all(text, |caps: &Captures| {
            count += 1;
            self.replacements
                .get(&caps[0])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });
        (replaced, count)
    }

    /// Returns true if the replacer can never match.
    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }
}

/// Rewrites the staged copy of every record with `replacer`.
///
/// A file is written back and flagged `modified` only when at least one
/// colour was replaced. A file that cannot be read or written is reported to
/// `notifier` as a warning and recorded as [`FileStatus::Failed`]; the
/// remaining files are still processed.
pub fn substitute_colors(
    fs: &dyn FileStore,
    notifier: &dyn Notifier,
    replacer: &ColorReplacer,
    records: &mut [StylesheetRecord],
) -> Vec<FileOutcome> {
    let mut outcomes = Vec::with_capacity(records.len());

    for record in records.iter_mut() {
        let status = match substitute_one(fs, replacer, record) {
            Ok(status) => status,
            Err(message) => {
                warn!(name = %record.name, "{}", message);
                notifier.warning(&message);
                FileStatus::Failed { error: message }
            }
        };
        outcomes.push(FileOutcome::new(record.name.clone(), status));
    }

    let modified = records.iter().filter(|r| r.modified).count();
    info!(total = records.len(), modified, "colours substituted");
    outcomes
}

fn substitute_one(
    fs: &dyn FileStore,
    replacer: &ColorReplacer,
    record: &mut StylesheetRecord,
) -> Result<FileStatus, String> {
    let path = record.current_path.clone();
    let original = fs
        .read_to_string(&path)
        .map_err(|e| format!("{} reading failed: {}", path.display(), e))?;

    let (switched, count) = replacer.replace(&original);
    if count == 0 {
        debug!(name = %record.name, "no colour to switch");
        return Ok(FileStatus::Unchanged);
    }

    fs.write(&path, &switched)
        .map_err(|e| format!("{} writing failed: {}", path.display(), e))?;
    record.modified = true;

    debug!(name = %record.name, replacements = count, "colours switched");
    Ok(FileStatus::Modified {
        replacements: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MockFileStore, MockNotifier};
    use std::path::Path;

    fn replacer(raw: &[(&str, &str)]) -> ColorReplacer {
        ColorReplacer::new(&ColorMapping::try_build(raw).unwrap()).unwrap()
    }

    fn staged(name: &str) -> StylesheetRecord {
        let mut record = StylesheetRecord::new(name, format!("/themes/demo/css/{}", name));
        record.current_path = Path::new("/staging").join(name);
        record
    }

    #[test]
    fn test_replace_counts_every_occurrence() {
        let r = replacer(&[("#fff", "#000"), ("#123456", "#654321")]);
        let (out, count) = r.replace("a{color:#fff}b{color:#fff;border:#123456}");
        assert_eq!(out, "a{color:#000}b{color:#000;border:#654321}");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_replace_is_single_pass() {
        // Chained replacement would turn #111 into #333.
        let r = replacer(&[("#111", "#222"), ("#222", "#333")]);
        let (out, count) = r.replace("#111 #222");
        assert_eq!(out, "#222 #333");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_is_case_sensitive() {
        let r = replacer(&[("#fff", "#000")]);
        let (out, count) = r.replace("a{color:#FFF}");
        assert_eq!(out, "a{color:#FFF}");
        assert_eq!(count, 0);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_replace_prefers_longest_colour() {
        let r = replacer(&[("#fff", "#000"), ("#ffffff", "#111111")]);
        let (out, count) = r.replace("#ffffff #fff");
        assert_eq!(out, "#111111 #000");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_replace_with_empty_mapping() {
        let r = ColorReplacer::new(&ColorMapping::new()).unwrap();
        assert!(r.is_empty());
        let (out, count) = r.replace("#fff");
        assert_eq!(out, "#fff");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_substitute_marks_only_changed_files() {
        let store = MockFileStore::new()
            .with_file("/staging/a.css", "body{color:#fff}")
            .with_file("/staging/b.css", "div{border:#999}");
        let notifier = MockNotifier::new();
        let mut records = vec![staged("a.css"), staged("b.css")];

        let outcomes = substitute_colors(
            &store,
            &notifier,
            &replacer(&[("#fff", "#000")]),
            &mut records,
        );

        assert!(records[0].modified);
        assert!(!records[1].modified);
        assert_eq!(
            store.contents("/staging/a.css").as_deref(),
            Some("body{color:#000}")
        );
        assert_eq!(
            store.contents("/staging/b.css").as_deref(),
            Some("div{border:#999}")
        );
        assert_eq!(store.write_count(), 1);
        assert_eq!(
            outcomes,
            vec![
                FileOutcome::new("a.css", FileStatus::Modified { replacements: 1 }),
                FileOutcome::new("b.css", FileStatus::Unchanged),
            ]
        );
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_substitute_write_failure_is_not_fatal() {
        let store = MockFileStore::new()
            .with_file("/staging/a.css", "body{color:#fff}")
            .with_file("/staging/b.css", "p{color:#fff}")
            .fail_writes_to("/staging/a.css");
        let notifier = MockNotifier::new();
        let mut records = vec![staged("a.css"), staged("b.css")];

        let outcomes = substitute_colors(
            &store,
            &notifier,
            &replacer(&[("#fff", "#000")]),
            &mut records,
        );

        assert!(!records[0].modified);
        assert!(records[1].modified);
        assert!(outcomes[0].is_failed());
        assert_eq!(store.contents("/staging/b.css").as_deref(), Some("p{color:#000}"));

        let warnings = notifier.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("/staging/a.css"));
        assert!(warnings[0].contains("writing failed"));
    }

    #[test]
    fn test_substitute_read_failure_is_not_fatal() {
        let store = MockFileStore::new().with_file("/staging/b.css", "p{color:#fff}");
        let notifier = MockNotifier::new();
        let mut records = vec![staged("missing.css"), staged("b.css")];

        let outcomes = substitute_colors(
            &store,
            &notifier,
            &replacer(&[("#fff", "#000")]),
            &mut records,
        );

        assert!(matches!(&outcomes[0].status, FileStatus::Failed { error } if error.contains("reading failed")));
        assert!(records[1].modified);
        assert_eq!(notifier.warnings().len(), 1);
    }

    #[test]
    fn test_substitute_is_idempotent_without_matches() {
        let store = MockFileStore::new().with_file("/staging/b.css", "div{border:#999}");
        let notifier = MockNotifier::new();
        let mut records = vec![staged("b.css")];
        let r = replacer(&[("#fff", "#000")]);

        for _ in 0..3 {
            substitute_colors(&store, &notifier, &r, &mut records);
            assert!(!records[0].modified);
            assert_eq!(
                store.contents("/staging/b.css").as_deref(),
                Some("div{border:#999}")
            );
        }
        assert_eq!(store.write_count(), 0);
    }
}
