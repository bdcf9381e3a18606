//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxipack_container::PipelineConfig;
use oxipack_container::batch::BatchInput;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result type of the command implementations.
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Load the pipeline configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CliResult<PipelineConfig> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };

    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
    config.validate()?;
    debug!(?config, path = %path.display(), "loaded configuration");
    Ok(config)
}

/// File name used for reports and output files.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Refuse output layouts that would lose data.
///
/// Outputs are written to `output_dir` under the input's file name, so two
/// inputs may not share a name and no output may resolve to an input.
/// `output_dir` must exist.
pub fn check_outputs(files: &[PathBuf], output_dir: &Path) -> CliResult<()> {
    let output_dir = fs::canonicalize(output_dir)
        .map_err(|e| format!("cannot resolve {}: {e}", output_dir.display()))?;

    let mut names = HashSet::with_capacity(files.len());
    for path in files {
        let name = file_name(path);
        if !names.insert(name.clone()) {
            return Err(format!("more than one input is named {name}").into());
        }

        let input =
            fs::canonicalize(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let target = output_dir.join(&name);
        let overwrites = target == input || fs::canonicalize(&target).is_ok_and(|t| t == input);
        if overwrites {
            return Err(format!(
                "output {} would replace input {}; pass a different --output directory",
                target.display(),
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

/// Read every input file, skipping empty ones with a warning.
pub fn read_inputs(files: &[PathBuf]) -> CliResult<Vec<BatchInput>> {
    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let data = fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        if data.is_empty() {
            warn!(file = %path.display(), "skipping empty file");
            continue;
        }
        inputs.push(BatchInput::new(file_name(path), data));
    }
    Ok(inputs)
}

/// One line of the batch summary.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub status: &'static str,
    pub input_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub elapsed_ms: u128,
}

impl SummaryRow {
    /// Whether this row counts as a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, "failed" | "timed out")
    }
}

/// Print the summary as a table or as JSON.
pub fn print_summary(rows: &[SummaryRow], json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!(
        "{:>10} {:>10} {:>7} {:>10}  Name",
        "Size", "Output", "Ratio", "Status"
    );
    println!("{}", "-".repeat(60));

    let mut total_in = 0u64;
    let mut total_out = 0u64;
    for row in rows {
        let output = row
            .output_size
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let ratio = row
            .ratio
            .map_or_else(|| "-".to_string(), |r| format!("{:.1}%", r * 100.0));
        println!(
            "{:>10} {:>10} {:>7} {:>10}  {}",
            row.input_size, output, ratio, row.status, row.name
        );
        if let Some(detail) = &row.detail {
            println!("{:>40}  {}", "", detail);
        }

        if let Some(out) = row.output_size {
            total_in += row.input_size;
            total_out += out;
        }
    }

    println!("{}", "-".repeat(60));
    let total_ratio = if total_in > 0 {
        total_out as f64 / total_in as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "{:>10} {:>10} {:>6.1}%             {} files",
        total_in,
        total_out,
        total_ratio,
        rows.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("dir/sub/data.bin")), "data.bin");
        assert_eq!(file_name(Path::new("plain")), "plain");
    }

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_check_outputs_separate_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.txt");
        fs::write(&input, b"hello hello hello world").unwrap();
        let out = dir.path().join("compressed");
        fs::create_dir(&out).unwrap();

        check_outputs(&[input], &out).unwrap();
    }

    #[test]
    fn test_check_outputs_refuses_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.txt");
        fs::write(&input, b"hello hello hello world").unwrap();

        let err = check_outputs(&[input.clone()], dir.path()).unwrap_err();
        assert!(err.to_string().contains("would replace input"));
        assert_eq!(fs::read(&input).unwrap(), b"hello hello hello world");

        // Same directory reached through a relative component.
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        assert!(check_outputs(&[input], &sub.join("..")).is_err());
    }

    #[test]
    fn test_check_outputs_refuses_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();
        fs::write(a.join("data.bin"), b"one").unwrap();
        fs::write(b.join("data.bin"), b"two").unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let err = check_outputs(&[a.join("data.bin"), b.join("data.bin")], &out).unwrap_err();
        assert!(err.to_string().contains("more than one input is named data.bin"));
    }

    #[test]
    fn test_failure_rows() {
        let row = SummaryRow {
            name: "a".into(),
            status: "timed out",
            input_size: 1,
            output_size: None,
            ratio: None,
            detail: None,
            elapsed_ms: 0,
        };
        assert!(row.is_failure());
        let json = serde_json::to_string(&row).unwrap();
        assert!(!json.contains("output_size"));
    }
}
