use crate::types::DirectoryRecord;
use chrono::{DateTime, Local, TimeDelta};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Directory names treated as disposable dependency/environment trees.
pub const TARGET_NAMES: [&str; 3] = ["node_modules", ".venv", ".env"];

#[must_use]
pub fn is_target_name(name: &str) -> bool {
    TARGET_NAMES.contains(&name)
}

/// Find target directories under `root` not modified in the last `days` days.
#[must_use]
pub fn find_stale_dirs(root: &Path, days: u32) -> Vec<DirectoryRecord> {
    let cutoff = TimeDelta::try_days(i64::from(days))
        .and_then(|age| Local::now().checked_sub_signed(age));
    let Some(cutoff) = cutoff else {
        // Older than any representable time: nothing can be that stale
        debug!("age threshold of {days} days is out of range, nothing is stale");
        return Vec::new();
    };
    find_stale_dirs_before(root, cutoff)
}

/// Walk `root` depth-first and collect every target directory whose mtime is
/// at or before `cutoff`. The walk never enters a target directory, stale or
/// fresh, so nested matches are never reported.
#[must_use]
pub fn find_stale_dirs_before(root: &Path, cutoff: DateTime<Local>) -> Vec<DirectoryRecord> {
    let mut dirs = Vec::new();
    let mut it = WalkDir::new(root).follow_links(false).into_iter();

    loop {
        let entry = match it.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(err)) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }
        let matched = entry.file_name().to_str().is_some_and(is_target_name);
        if !matched {
            continue;
        }

        // Stop here whatever the age turns out to be
        it.skip_current_dir();

        let modified: DateTime<Local> = match entry.metadata() {
            Ok(m) => match m.modified() {
                Ok(time) => time.into(),
                Err(err) => {
                    debug!("no modification time for {}: {err}", entry.path().display());
                    continue;
                }
            },
            Err(err) => {
                debug!("cannot stat {}: {err}", entry.path().display());
                continue;
            }
        };

        if modified > cutoff {
            debug!("fresh, skipping {}", entry.path().display());
            continue;
        }

        dirs.push(DirectoryRecord::new(entry.into_path(), modified));
    }

    dirs
}
