//! Copies discovered stylesheets into the staging directory.
//!
//! The staging directory is flat: every stylesheet lands at
//! `<staging_dir>/<name>`. Files from a previous run are overwritten in place.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::env::FileStore;
use crate::error::{Result, SwitchError};
use crate::record::StylesheetRecord;

/// Copies every record's source into `staging_dir` and repoints
/// `current_path` at the copy.
///
/// The first failing copy aborts staging and is returned as
/// [`SwitchError::Io`]; records already copied keep their new path.
///
/// Stylesheets sharing a base name overwrite each other in the flat staging
/// directory: the one staged last wins and the records it replaced are
/// removed, so every staged file is backed by exactly one record.
pub fn stage_stylesheets(
    fs: &dyn FileStore,
    staging_dir: &Path,
    records: &mut Vec<StylesheetRecord>,
) -> Result<()> {
    fs.prepare_directory(staging_dir)
        .map_err(|e| SwitchError::io("create directory", staging_dir, e))?;

    // name -> (index of the record owning the staged copy, its source)
    let mut staged_by: HashMap<String, (usize, PathBuf)> = HashMap::new();

    for (index, record) in records.iter_mut().enumerate() {
        let dest = staging_dir.join(&record.name);
        fs.copy(&record.source_path, &dest)
            .map_err(|e| SwitchError::io("copy", &record.source_path, e))?;

        debug!(from = %record.source_path.display(), to = %dest.display(), "staged stylesheet");
        record.current_path = dest;

        if let Some((_, previous)) = staged_by.insert(
            record.name.clone(),
            (index, record.source_path.clone()),
        ) {
            warn!(
                name = %record.name,
                replaced = %previous.display(),
                by = %record.source_path.display(),
                "stylesheet name collision in staging directory"
            );
        }
    }

    let mut index = 0;
    records.retain(|record| {
        let owner = staged_by.get(&record.name).map(|(owner, _)| *owner);
        index += 1;
        owner == Some(index - 1)
    });

    info!(count = records.len(), dir = %staging_dir.display(), "stylesheets staged");
    Ok(())
}
