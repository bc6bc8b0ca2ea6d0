//! crcdupe - CLI entrypoint.
//!
//! This module handles:
//! - CLI parsing (clap)
//! - progress bars (indicatif)
//! - coloured error output (colored)
//! - driving the scan: catalog, grouping, report
//!
//! Core logic for cataloguing and duplicate detection lives in `lib.rs`.

use anyhow::Context;
use clap::{ArgAction, Parser, error::ErrorKind};
use colored::*;
use crcdupe::{
    DuplicateGroup, ScanConfig, build_catalog_with,
    logging::init_logging,
    report::{self, JsonReport, ReportGroup},
    resolve_size_group,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

/// Command-line arguments for the `crcdupe` tool.
#[derive(Parser)]
#[command(
    name = "crcdupe",
    author,
    version,
    about = "Find duplicate files by size, CRC-16 fingerprint and byte comparison.",
    long_about = "crcdupe recursively scans a directory and groups files by size. Runs of two\n\
                  same-size files are compared byte for byte; larger runs are first narrowed\n\
                  down with a CRC-16 over each file's first 512 bytes. Every confirmed group\n\
                  is printed as its size followed by one path per line."
)]
struct Args {
    /// Directory to scan recursively for duplicate files
    #[arg(allow_hyphen_values = true)]
    directory: Option<String>,

    /// Minimal file size in bytes; smaller files are ignored (default 1)
    #[arg(allow_hyphen_values = true)]
    min_size: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors and hide progress bars
    #[arg(short, long)]
    quiet: bool,

    /// Never draw progress bars
    #[arg(long)]
    no_progress: bool,

    /// Also write the duplicate groups as a JSON report to FILE
    #[arg(long, value_name = "FILE")]
    json_output: Option<PathBuf>,
}

fn print_usage() {
    let program = env::args().next().unwrap_or_else(|| "crcdupe".to_string());
    println!("Use: {} <Directory> [Minimal File size]", program);
}

/// Render an error and its causes on one line.
///
/// A cause whose text the message already contains is not repeated.
fn render_error(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}

fn progress_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn scan_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(progress_style(
        "{spinner:.green} [{elapsed_precise}] {pos} files catalogued",
    ));
    spinner
}

fn compare_bar(enabled: bool, groups: u64) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(groups);
    bar.set_style(progress_style(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} size groups",
    ));
    bar
}

fn run(args: &Args, directory: &str) -> anyhow::Result<()> {
    let config = ScanConfig::from_args(directory, args.min_size.as_deref());
    let show_progress = !(args.quiet || args.no_progress);

    // Step 1: Catalog every file under the target directory by size.
    let spinner = scan_spinner(show_progress);
    let (catalog, mut stats) = build_catalog_with(&config, |_| spinner.inc(1))?;
    spinner.finish_and_clear();

    // Step 2: Resolve each run of equal sizes, printing groups as they are confirmed.
    info!("Starting comparisons...");
    let bar = compare_bar(show_progress, catalog.candidate_groups() as u64);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut written: io::Result<()> = Ok(());
    let mut report_groups = Vec::new();

    for group in catalog.size_groups().filter(|group| group.len() > 1) {
        stats += resolve_size_group(group, &mut |duplicate: DuplicateGroup<'_>| {
            if written.is_ok() {
                written = bar.suspend(|| report::write_group(&mut out, &duplicate));
            }
            report_groups.push(ReportGroup::from(&duplicate));
        });
        bar.inc(1);
    }
    bar.finish_and_clear();
    written.context("failed to write duplicate groups")?;

    // Step 3: Report the counters.
    report::write_summary(&mut out, &stats).context("failed to write summary")?;
    out.flush().context("failed to flush output")?;

    info!(
        "{} duplicate file(s) in {} group(s), {} reclaimable",
        report_groups.iter().map(|g| g.duplicates.len()).sum::<usize>(),
        report_groups.len(),
        report::format_bytes(report::reclaimable_bytes(&report_groups))
    );

    if let Some(path) = &args.json_output {
        JsonReport::new(&report_groups, &stats)
            .write_to(path)
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
        info!("JSON report written to: {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
    };

    let Some(directory) = args.directory.as_deref() else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    init_logging(args.verbose, args.quiet);

    match run(&args, directory) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), render_error(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_prints_each_cause_once() {
        let err: anyhow::Error = crcdupe::Error::Traversal {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        }
        .into();

        assert_eq!(
            render_error(&err),
            "error reading directory /nope: no such directory"
        );
    }

    #[test]
    fn render_error_keeps_causes_hidden_by_context() {
        let err = Err::<(), _>(io::Error::other("disk full"))
            .context("failed to write summary")
            .unwrap_err();

        assert_eq!(render_error(&err), "failed to write summary: disk full");
    }

    #[test]
    fn positionals_accept_leading_hyphens() {
        let args = Args::try_parse_from(["crcdupe", "-x", "-5"]).unwrap();
        assert_eq!(args.directory.as_deref(), Some("-x"));
        assert_eq!(args.min_size.as_deref(), Some("-5"));
    }
}
