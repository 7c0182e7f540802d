use crate::types::DirectoryRecord;
use std::cmp::Reverse;

/// Order directories largest first. Ties keep no particular order.
#[must_use]
pub fn rank_by_size(mut dirs: Vec<DirectoryRecord>) -> Vec<DirectoryRecord> {
    dirs.sort_unstable_by_key(|d| Reverse(d.size_bytes));
    dirs
}

/// Total bytes that deleting every listed directory would reclaim.
#[must_use]
pub fn total_bytes(dirs: &[DirectoryRecord]) -> u64 {
    dirs.iter().map(|d| d.size_bytes).sum()
}
