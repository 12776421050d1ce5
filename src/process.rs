//! Batch metrics computation.
//!
//! Runs the calculator over many image files. Each file is an independent
//! single-shot computation: the backend is shared (it is `Sync`), but no
//! pixel data or intermediate state is.
//!
//! ## Failure handling
//!
//! A file that cannot be read or decoded produces a failed [`ImageOutcome`]
//! and a [`ProcessEvent::Failed`]; the rest of the batch carries on. The
//! report keeps input order regardless of completion order.
//!
//! ## Parallel Processing
//!
//! Files are processed in parallel using [rayon](https://docs.rs/rayon) on
//! the global pool, which the binary sizes from `processing.max_processes`.

use crate::fingerprint::hash_bytes;
use crate::imaging::{
    BackendError, DecodeOptions, ImageBackend, ImageSource, MetricsError, MetricsResult,
    compute_metrics,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Progress notification, sent as each file completes.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Computed {
        /// Position of the file in the input list.
        index: usize,
        path: PathBuf,
        result: MetricsResult,
    },
    Failed {
        index: usize,
        path: PathBuf,
        error: String,
    },
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOutcome {
    pub path: PathBuf,
    /// SHA-256 of the file bytes, when the file could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageOutcome {
    pub fn is_ok(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Outcomes for a whole batch, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessReport {
    pub images: Vec<ImageOutcome>,
}

impl ProcessReport {
    pub fn succeeded(&self) -> usize {
        self.images.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.images.len() - self.succeeded()
    }
}

/// Read, fingerprint, and measure a single file.
fn process_one(backend: &impl ImageBackend, path: &Path, options: &DecodeOptions) -> ImageOutcome {
    let (source_hash, result) = match std::fs::read(path) {
        Ok(bytes) => {
            let hash = hash_bytes(&bytes);
            let result = compute_metrics(backend, ImageSource::Bytes(&bytes), options);
            (Some(hash), result)
        }
        Err(e) => (None, Err(MetricsError::from(BackendError::Io(e)))),
    };

    match result {
        Ok(metrics) => ImageOutcome {
            path: path.to_path_buf(),
            source_hash,
            metrics: Some(metrics),
            error: None,
        },
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            ImageOutcome {
                path: path.to_path_buf(),
                source_hash,
                metrics: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Compute metrics for every path in parallel.
///
/// When `events` is given, one event per file is sent as soon as that file
/// completes. A closed receiver is ignored.
pub fn process(
    backend: &impl ImageBackend,
    paths: &[PathBuf],
    options: &DecodeOptions,
    events: Option<Sender<ProcessEvent>>,
) -> ProcessReport {
    let images = paths
        .par_iter()
        .enumerate()
        .map_with(events, |events, (index, path)| {
            let outcome = process_one(backend, path, options);
            if let Some(tx) = events {
                let event = match (&outcome.metrics, &outcome.error) {
                    (Some(result), _) => ProcessEvent::Computed {
                        index,
                        path: path.clone(),
                        result: *result,
                    },
                    (None, error) => ProcessEvent::Failed {
                        index,
                        path: path.clone(),
                        error: error.clone().unwrap_or_default(),
                    },
                };
                tx.send(event).ok();
            }
            outcome
        })
        .collect();

    let report = ProcessReport { images };
    log::info!(
        "Processed {} images: {} ok, {} failed",
        report.images.len(),
        report.succeeded(),
        report.failed()
    );
    report
}
