use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Display value recorded when a directory could not be sized.
pub const SIZE_ERROR: &str = "error";

#[derive(Debug, Clone)]
pub struct DirectoryRecord {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub size_display: String,
    pub size_bytes: u64,
}

impl DirectoryRecord {
    #[must_use]
    pub fn new(path: PathBuf, modified: DateTime<Local>) -> Self {
        DirectoryRecord {
            path,
            modified,
            size_display: String::new(),
            size_bytes: 0,
        }
    }
}
