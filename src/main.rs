mod cleanup;
mod ranking;
mod report;
mod scanner;
mod selection;
mod sizing;
mod types;
mod units;

use chrono::Local;
use clap::{Parser, ValueEnum};
use cleanup::{FsRemover, Session, SessionEnd, StdinPrompter};
use colored::Colorize;
use sizing::{DuProbe, NativeProbe, SizeProbe};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum SizeBackend {
    /// Run `du -sh` for each directory
    Du,
    /// Walk the directory and sum allocated blocks in-process
    Native,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Find stale node_modules/.venv/.env directories, rank them by size and optionally delete them."
)]
struct Args {
    /// Starting path for the search
    #[arg(long, short = 'p')]
    path: PathBuf,

    /// Minimum age in days
    #[arg(long, short = 'd', default_value_t = 30)]
    days: u32,

    /// Directory the CSV report is written to
    #[arg(long, default_value = ".")]
    report_dir: PathBuf,

    /// How directory sizes are measured
    #[arg(long, value_enum, default_value = "du")]
    size_backend: SizeBackend,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("{}", "Finding old directories...".cyan());
    let dirs = scanner::find_stale_dirs(&args.path, args.days);

    if dirs.is_empty() {
        println!("No matching directories found.");
        return;
    }

    println!("\nCalculating sizes for {} directories...", dirs.len());
    let probe: Box<dyn SizeProbe> = match args.size_backend {
        SizeBackend::Du => Box::new(DuProbe),
        SizeBackend::Native => Box::new(NativeProbe),
    };
    let dirs = sizing::measure_all(dirs, probe.as_ref(), |done, total, path| {
        print!("\r  Calculating size {done}/{total}: {}", path.display());
        io::stdout().flush().ok();
    });
    println!(); // New line after progress

    let dirs = ranking::rank_by_size(dirs);

    let report_path = match report::write_csv(&args.report_dir, &dirs, Local::now()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error creating report: {e:#}");
            std::process::exit(1);
        }
    };

    println!(
        "\n{}",
        format!("=== Directories older than {} days ===", args.days).cyan()
    );
    println!("{}", report::render_listing(&dirs));
    println!(
        "Reclaimable:  {} across {} directories.",
        human_bytes::human_bytes(ranking::total_bytes(&dirs) as f64).green(),
        dirs.len().to_string().green()
    );
    println!("Results written to: {}\n", report_path.display());

    let session = Session::new(&dirs, StdinPrompter::new(), FsRemover, io::stdout());
    let summary = match session.run() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            std::process::exit(1);
        }
    };

    if summary.end == SessionEnd::Completed {
        let line = format!(
            "{} of {} selected directories deleted.",
            summary.deleted,
            summary.selected.len()
        );
        if summary.failures.is_empty() {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
            for f in &summary.failures {
                println!("  - {}: {}", f.path.display(), f.reason);
            }
        }
    }
}
