use crate::types::{DirectoryRecord, SIZE_ERROR};
use crate::units;
use anyhow::{Context, Result, bail};
use log::warn;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub display: String,
    pub bytes: u64,
}

/// Something that can report the total recursive size of a directory.
pub trait SizeProbe {
    fn measure(&self, path: &Path) -> Result<Measurement>;
}

/// Shells out to `du -sh` and parses its first column.
#[derive(Debug, Default)]
pub struct DuProbe;

impl SizeProbe for DuProbe {
    fn measure(&self, path: &Path) -> Result<Measurement> {
        let output = Command::new("du")
            .arg("-sh")
            .arg(path)
            .output()
            .context("failed to run du")?;

        if !output.status.success() {
            bail!(
                "du exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_du_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse a `du -sh` line of the form `<size>\t<path>`.
pub fn parse_du_output(stdout: &str) -> Result<Measurement> {
    let Some(token) = stdout.split_whitespace().next() else {
        bail!("du produced no output");
    };
    let Some(bytes) = units::to_bytes(token) else {
        bail!("unrecognised du size '{token}'");
    };

    Ok(Measurement {
        display: token.to_string(),
        bytes,
    })
}

/// Walks the tree itself and sums allocated blocks, like `du` does.
#[derive(Debug, Default)]
pub struct NativeProbe;

impl SizeProbe for NativeProbe {
    fn measure(&self, path: &Path) -> Result<Measurement> {
        if !path.is_dir() {
            bail!("{} is not a directory", path.display());
        }

        // blocks() is in 512-byte units
        let bytes: u64 = WalkDir::new(path)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| entry.metadata().ok())
            .filter(std::fs::Metadata::is_file)
            .map(|m| m.blocks() * 512)
            .sum();

        Ok(Measurement {
            display: human_bytes::human_bytes(bytes as f64),
            bytes,
        })
    }
}

/// Size every record in order. A failed measurement marks the record with
/// the error sentinel and zero bytes; it never stops the batch.
pub fn measure_all<P, F>(
    mut dirs: Vec<DirectoryRecord>,
    probe: &P,
    mut on_progress: F,
) -> Vec<DirectoryRecord>
where
    P: SizeProbe + ?Sized,
    F: FnMut(usize, usize, &Path),
{
    let total = dirs.len();

    for (i, dir) in dirs.iter_mut().enumerate() {
        match probe.measure(&dir.path) {
            Ok(m) => {
                dir.size_display = m.display;
                dir.size_bytes = m.bytes;
            }
            Err(err) => {
                warn!("could not size {}: {err:#}", dir.path.display());
                dir.size_display = SIZE_ERROR.to_string();
                dir.size_bytes = 0;
            }
        }
        on_progress(i + 1, total, &dir.path);
    }

    dirs
}
