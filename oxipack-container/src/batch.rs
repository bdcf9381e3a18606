//! Batch fan-out over many inputs.
//!
//! Each input is one unit of work on the rayon pool. A failing unit is
//! reported in its own [`UnitReport`] and never stops the others. Reports
//! arrive in completion order; callers that need a stable order sort by
//! name.
//!
//! [`BatchOptions::timeout`] bounds how long the caller waits. Units still
//! running at the deadline are reported as [`UnitStatus::TimedOut`]; they
//! are not cancelled and their results are dropped when they finish.

use crate::config::PipelineConfig;
use crate::method::Method;
use crate::pipeline::{Compressor, Decompressor};
use oxipack_core::{OxiPackError, Outcome, Result, Unsuitable};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One named input.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Name used in reports (usually the file name).
    pub name: String,
    /// Input bytes.
    pub data: Vec<u8>,
}

impl BatchInput {
    /// Create a named input.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Batch settings.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Pipeline settings for every unit.
    pub config: PipelineConfig,
    /// Longest time to wait for all units; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Result of one unit.
#[derive(Debug)]
pub enum UnitStatus {
    /// The unit produced output.
    Complete(Vec<u8>),
    /// tANS declined the input.
    Unsuitable(Unsuitable),
    /// The unit failed.
    Failed(OxiPackError),
    /// The unit did not finish before the deadline.
    TimedOut,
}

/// Report for one unit.
#[derive(Debug)]
pub struct UnitReport {
    /// Input name.
    pub name: String,
    /// Input size in bytes.
    pub input_size: u64,
    /// Outcome of the unit.
    pub status: UnitStatus,
    /// Time spent in the unit (zero when timed out).
    pub elapsed: Duration,
}

impl UnitReport {
    /// Output size when the unit completed.
    pub fn output_size(&self) -> Option<u64> {
        match &self.status {
            UnitStatus::Complete(out) => Some(out.len() as u64),
            _ => None,
        }
    }

    /// Whether the unit produced output.
    pub fn is_complete(&self) -> bool {
        matches!(self.status, UnitStatus::Complete(_))
    }
}

/// Compress every input with `method`.
///
/// `on_report` sees each report as its unit finishes. Returns an error only
/// when the options are invalid; per-unit failures are in the reports.
pub fn compress_batch<R>(
    inputs: Vec<BatchInput>,
    method: Method,
    options: &BatchOptions,
    on_report: R,
) -> Result<Vec<UnitReport>>
where
    R: FnMut(&UnitReport),
{
    let compressor = Compressor::new(options.config)?;
    let job = move |data: &[u8]| compressor.compress(data, method);
    Ok(run_batch(inputs, options.timeout, job, on_report))
}

/// Decompress every input.
pub fn decompress_batch<R>(
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
    on_report: R,
) -> Result<Vec<UnitReport>>
where
    R: FnMut(&UnitReport),
{
    let decompressor = Decompressor::new(options.config)?;
    let job = move |data: &[u8]| decompressor.decompress(data);
    Ok(run_batch(inputs, options.timeout, job, on_report))
}

type UnitMessage = (usize, Result<Outcome<Vec<u8>>>, Duration);

fn run_batch<F, R>(
    inputs: Vec<BatchInput>,
    timeout: Option<Duration>,
    job: F,
    mut on_report: R,
) -> Vec<UnitReport>
where
    F: Fn(&[u8]) -> Result<Outcome<Vec<u8>>> + Send + Sync + 'static,
    R: FnMut(&UnitReport),
{
    let job = Arc::new(job);
    let (tx, rx) = mpsc::channel::<UnitMessage>();
    let mut pending: Vec<Option<(String, u64)>> = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.into_iter().enumerate() {
        pending.push(Some((input.name, input.data.len() as u64)));
        let tx = tx.clone();
        let job = Arc::clone(&job);
        let data = input.data;
        rayon::spawn(move || {
            let start = Instant::now();
            let result = job(&data);
            // The receiver is gone once the caller stopped waiting.
            tx.send((index, result, start.elapsed())).ok();
        });
    }
    drop(tx);

    let deadline = timeout.map(|t| Instant::now() + t);
    let mut reports = Vec::with_capacity(pending.len());
    let mut remaining = pending.len();

    while remaining > 0 {
        let message = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                rx.recv_timeout(deadline - now).ok()
            }
            None => rx.recv().ok(),
        };
        let Some((index, result, elapsed)) = message else {
            break;
        };
        let Some((name, input_size)) = pending[index].take() else {
            continue;
        };
        remaining -= 1;

        let status = match result {
            Ok(Outcome::Complete(out)) => {
                info!(unit = %name, input = input_size, output = out.len(), ?elapsed, "unit complete");
                UnitStatus::Complete(out)
            }
            Ok(Outcome::Unsuitable(reason)) => {
                warn!(unit = %name, %reason, "unit unsuitable");
                UnitStatus::Unsuitable(reason)
            }
            Err(err) => {
                warn!(unit = %name, error = %err, "unit failed");
                UnitStatus::Failed(err)
            }
        };
        let report = UnitReport {
            name,
            input_size,
            status,
            elapsed,
        };
        on_report(&report);
        reports.push(report);
    }

    for (name, input_size) in pending.into_iter().flatten() {
        warn!(unit = %name, "unit timed out");
        let report = UnitReport {
            name,
            input_size,
            status: UnitStatus::TimedOut,
            elapsed: Duration::ZERO,
        };
        on_report(&report);
        reports.push(report);
    }

    reports
}
