use crate::types::{DirectoryRecord, SIZE_ERROR};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use comfy_table::{Cell, CellAlignment, Color, Table};
use std::path::{Path, PathBuf};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name for the CSV report written at `now`.
#[must_use]
pub fn report_file_name(now: DateTime<Local>) -> String {
    format!("cleanup_{}.csv", now.format("%Y-%m-%d_%H%M%S"))
}

/// Numbered listing of ranked directories for the terminal.
#[must_use]
pub fn render_listing(dirs: &[DirectoryRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["#", "Path", "Size", "Modified"]);

    for (i, dir) in dirs.iter().enumerate() {
        let size = Cell::new(&dir.size_display).set_alignment(CellAlignment::Right);
        let size = if dir.size_display == SIZE_ERROR {
            size.fg(Color::Red)
        } else {
            size
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(dir.path.display()),
            size,
            Cell::new(dir.modified.format(TIMESTAMP_FORMAT)),
        ]);
    }

    table
}

/// Write the ranked list to a fresh `cleanup_<timestamp>.csv` in `dir`.
pub fn write_csv(dir: &Path, dirs: &[DirectoryRecord], now: DateTime<Local>) -> Result<PathBuf> {
    let path = dir.join(report_file_name(now));

    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create report {}", path.display()))?;
    wtr.write_record(["Path", "Size", "Modified Date"])?;
    for d in dirs {
        wtr.write_record([
            d.path.to_string_lossy().as_ref(),
            d.size_display.as_str(),
            &d.modified.format(TIMESTAMP_FORMAT).to_string(),
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("cannot write report {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(path: &str, size: &str, bytes: u64) -> DirectoryRecord {
        let modified = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let mut d = DirectoryRecord::new(PathBuf::from(path), modified);
        d.size_display = size.to_string();
        d.size_bytes = bytes;
        d
    }

    #[test]
    fn test_report_file_name() {
        let now = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(report_file_name(now), "cleanup_2025-01-02_030405.csv");
    }

    #[test]
    fn test_write_csv_rows_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = vec![
            entry("/a/node_modules", "1.2G", 1_288_490_188),
            entry("/b/node_modules", "500M", 524_288_000),
        ];
        let now = Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let path = write_csv(tmp.path(), &dirs, now).unwrap();
        assert_eq!(path, tmp.path().join("cleanup_2025-06-01_120000.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Path,Size,Modified Date",
                "/a/node_modules,1.2G,2024-03-09 14:05:07",
                "/b/node_modules,500M,2024-03-09 14:05:07",
            ]
        );
    }

    #[test]
    fn test_write_csv_quotes_awkward_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = vec![entry("/work/a,b/.venv", "4.0K", 4096)];
        let now = Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let path = write_csv(tmp.path(), &dirs, now).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("\"/work/a,b/.venv\",4.0K,"));
    }

    #[test]
    fn test_write_csv_missing_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let now = Local::now();

        let err = write_csv(&missing, &[], now).unwrap_err();
        assert!(err.to_string().contains("cannot create report"));
    }

    #[test]
    fn test_render_listing() {
        let dirs = vec![
            entry("/a/node_modules", "1.2G", 1),
            entry("/b/.venv", SIZE_ERROR, 0),
        ];

        let out = render_listing(&dirs).to_string();
        assert!(out.contains("/a/node_modules"));
        assert!(out.contains("/b/.venv"));
        assert!(out.contains("2024-03-09 14:05:07"));
        assert!(out.contains("Modified"));
        assert!(out.find("/a/node_modules").unwrap() < out.find("/b/.venv").unwrap());
    }
}
