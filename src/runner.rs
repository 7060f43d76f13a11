// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{error, info, warn};

use crate::errors::JobError;
use crate::job::{JobDescriptor, JobWriter};
use crate::sanitize::job_name;
use crate::table::read_table;

pub const OUTPUT_DIR_PREFIX: &str = "json_output_";

// The condition groups processed when no sources are named on the command line.
pub const DEFAULT_SOURCES: [&str; 12] = [
    "guide_sequences_CD.fasta_filtered_by_seq.csv",
    "guide_sequences_CI.fasta_filtered_by_seq.csv",
    "guide_sequences_DD.fasta_filtered_by_seq.csv",
    "guide_sequences_DI.fasta_filtered_by_seq.csv",
    "guide_sequences_PM.fasta_filtered_by_seq.csv",
    "guide_sequences_DM.fasta_filtered_by_seq.csv",
    "guide_sequences_RDM.fasta_filtered_by_seq.csv",
    "guide_sequences_RTM.fasta_filtered_by_seq.csv",
    "guide_sequences_SD.fasta_filtered_by_seq.csv",
    "guide_sequences_SI.fasta_filtered_by_seq.csv",
    "guide_sequences_SM.fasta_filtered_by_seq.csv",
    "guide_sequences_TM.fasta_filtered_by_seq.csv",
];

const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None) ]
struct Cli {
    /// Guide tables (default: the built-in list of condition groups)
    sources: Vec<PathBuf>,

    /// Process this one table only
    #[arg(short, long, conflicts_with = "sources")]
    single: Option<PathBuf>,

    /// Directory under which the json_output_* directories go
    #[arg(short, long = "out-root", default_value = ".")]
    out_root: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceReport {
    pub written: usize,
    pub skipped: usize,
}

/// `<out_root>/json_output_<stem>`, where the stem is the source's file name minus its last
/// extension.
pub fn output_dir_for<P: AsRef<Path>>(out_root: &Path, source: P) -> PathBuf {
    let stem = source
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_root.join(format!("{}{}", OUTPUT_DIR_PREFIX, stem))
}

/// Reads one guide table and writes a descriptor per valid row into `out_dir`. `report` is
/// updated as rows go by, so it still holds the partial counts if this returns an error.
pub fn process_source(
    source: &Path,
    out_dir: &Path,
    report: &mut SourceReport,
) -> Result<(), JobError> {
    info!("processing {}", source.display());
    let table = read_table(source)?;
    info!("read {} rows", table.len());
    let cols = table.require_fields()?;
    let writer = JobWriter::new(out_dir)?;

    for row in table.guide_rows(cols) {
        if !row.is_valid() {
            warn!("row {}: empty sequence, skipping", row.number);
            report.skipped += 1;
            continue;
        }
        let name = job_name(row.id, row.number);
        let job = JobDescriptor::new(&name, row.target, row.guide);
        writer.write(&job)?;
        report.written += 1;

        if row.number % PROGRESS_EVERY == 0 {
            info!("  processed {}/{} rows", row.number, table.len());
        }
    }

    info!(
        "done: {} -> {} ({} written, {} skipped)",
        source.display(),
        writer.dir().display(),
        report.written,
        report.skipped
    );
    Ok(())
}

// Runs one source and contains any failure, so that the caller can move on.
fn process_contained(source: &Path, out_dir: &Path) -> SourceReport {
    let mut report = SourceReport::default();
    if let Err(e) = process_source(source, out_dir, &mut report) {
        match e {
            JobError::MissingSource(_) | JobError::MissingFields { .. } => {
                error!("{}: {}", source.display(), e)
            }
            _ => error!("{}: {} ({:?})", source.display(), e, e),
        }
    }
    report
}

/// Processes one named source on its own. Returns the number of descriptors written.
pub fn process_single_file(source: &Path, out_root: &Path) -> usize {
    let out_dir = output_dir_for(out_root, source);
    process_contained(source, &out_dir).written
}

/// Processes each source in turn, then prints the summary. Returns the total written.
pub fn run_batch<P: AsRef<Path>>(sources: &[P], out_root: &Path) -> usize {
    let mut total = 0;
    for source in sources {
        let source = source.as_ref();
        let out_dir = output_dir_for(out_root, source);
        total += process_contained(source, &out_dir).written;
    }

    println!("Total descriptors written: {}", total);
    println!("Output directories:");
    for source in sources {
        let out_dir = output_dir_for(out_root, source);
        if out_dir.is_dir() {
            match count_json_files(&out_dir) {
                Ok(n) => println!("  {}/ - {} JSON files", out_dir.display(), n),
                Err(e) => error!("{}: {}", out_dir.display(), e),
            }
        }
    }
    total
}

pub fn count_json_files(dir: &Path) -> Result<usize, JobError> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            count += 1;
        }
    }
    Ok(count)
}

pub fn run() -> Result<(), JobError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(source) = &cli.single {
        let n = process_single_file(source, &cli.out_root);
        println!("Wrote {} descriptors", n);
        return Ok(());
    }

    if cli.sources.is_empty() {
        run_batch(&DEFAULT_SOURCES[..], &cli.out_root);
    } else {
        run_batch(&cli.sources, &cli.out_root);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_for() {
        let root = Path::new("out");
        assert_eq!(
            output_dir_for(root, "guide_sequences_CD.fasta_filtered_by_seq.csv"),
            Path::new("out/json_output_guide_sequences_CD.fasta_filtered_by_seq")
        );
        assert_eq!(
            output_dir_for(root, "some/dir/guides.tsv"),
            Path::new("out/json_output_guides")
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["guide2af3"]);
        assert!(cli.sources.is_empty());
        assert!(cli.single.is_none());
        assert_eq!(cli.out_root, PathBuf::from("."));
    }

    #[test]
    fn test_cli_single_conflicts_with_sources() {
        assert!(Cli::try_parse_from(["guide2af3", "-s", "a.csv", "b.csv"]).is_err());
        let cli = Cli::try_parse_from(["guide2af3", "--single", "a.csv", "-o", "out"]).unwrap();
        assert_eq!(cli.single, Some(PathBuf::from("a.csv")));
        assert_eq!(cli.out_root, PathBuf::from("out"));
    }

    #[test]
    fn test_missing_source_is_contained() {
        let tmp = tempfile::tempdir().unwrap();
        let n = process_single_file(Path::new("tests/data/absent.csv"), tmp.path());
        assert_eq!(n, 0);
        assert!(!tmp.path().join("json_output_absent").exists());
    }
}
