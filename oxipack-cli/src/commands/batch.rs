//! Compress and decompress commands.

use crate::utils::{
    CliResult, SummaryRow, check_outputs, create_progress_bar, print_summary, read_inputs,
};
use clap::Args;
use oxipack_container::batch::{
    BatchOptions, UnitReport, UnitStatus, compress_batch, decompress_batch,
};
use oxipack_container::{Method, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Arguments shared by `compress` and `decompress`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory, file names are kept [default: compressed/ or decompressed/]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop waiting for unfinished files after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Output the summary as JSON (machine-readable)
    #[arg(short, long)]
    pub json: bool,
}

/// Default output directory of `compress`.
pub const COMPRESSED_DIR: &str = "compressed";

/// Default output directory of `decompress`.
pub const DECOMPRESSED_DIR: &str = "decompressed";

impl BatchArgs {
    /// Create the output directory and check that no output replaces an
    /// input.
    fn prepare_output(&self, default_dir: &str) -> CliResult<PathBuf> {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_dir));
        fs::create_dir_all(&output)?;
        check_outputs(&self.files, &output)?;
        Ok(output)
    }

    fn options(&self, config: &PipelineConfig) -> BatchOptions {
        BatchOptions {
            config: *config,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}

pub fn cmd_compress(method: Method, args: &BatchArgs, config: &PipelineConfig) -> CliResult<()> {
    let output = args.prepare_output(COMPRESSED_DIR)?;
    let inputs = read_inputs(&args.files)?;
    info!(method = method.name(), files = inputs.len(), "compressing");

    let pb = create_progress_bar(inputs.len() as u64, !args.json);
    let reports = compress_batch(inputs, method, &args.options(config), |report| {
        pb.set_message(report.name.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    finish(reports, &output, args.json)
}

pub fn cmd_decompress(args: &BatchArgs, config: &PipelineConfig) -> CliResult<()> {
    let output = args.prepare_output(DECOMPRESSED_DIR)?;
    let inputs = read_inputs(&args.files)?;
    info!(files = inputs.len(), "decompressing");

    let pb = create_progress_bar(inputs.len() as u64, !args.json);
    let reports = decompress_batch(inputs, &args.options(config), |report| {
        pb.set_message(report.name.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    finish(reports, &output, args.json)
}

/// Write outputs, print the summary and fail if any file failed.
fn finish(mut reports: Vec<UnitReport>, output_dir: &Path, json: bool) -> CliResult<()> {
    reports.sort_by(|a, b| a.name.cmp(&b.name));
    let rows: Vec<SummaryRow> = reports
        .into_iter()
        .map(|report| summarize(report, output_dir))
        .collect();

    print_summary(&rows, json)?;

    let failed = rows.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        return Err(format!("{failed} of {} files failed", rows.len()).into());
    }
    Ok(())
}

fn summarize(report: UnitReport, output_dir: &Path) -> SummaryRow {
    let mut row = SummaryRow {
        name: report.name,
        status: "ok",
        input_size: report.input_size,
        output_size: None,
        ratio: None,
        detail: None,
        elapsed_ms: report.elapsed.as_millis(),
    };

    match report.status {
        UnitStatus::Complete(data) => {
            let path = output_dir.join(&row.name);
            match fs::write(&path, &data) {
                Ok(()) => {
                    let size = data.len() as u64;
                    row.output_size = Some(size);
                    if row.input_size > 0 {
                        row.ratio = Some(size as f64 / row.input_size as f64);
                    }
                }
                Err(e) => {
                    row.status = "failed";
                    row.detail = Some(format!("cannot write {}: {e}", path.display()));
                }
            }
        }
        UnitStatus::Unsuitable(reason) => {
            row.status = "unsuitable";
            row.detail = Some(reason.to_string());
        }
        UnitStatus::Failed(err) => {
            row.status = "failed";
            row.detail = Some(err.to_string());
        }
        UnitStatus::TimedOut => {
            row.status = "timed out";
        }
    }
    row
}
