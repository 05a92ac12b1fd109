use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    archive::container::{ArchiveEntry, write_archive},
    color::{params::AdjustmentParameters, pipeline::apply},
    foundation::error::{LottieSeqError, LottieSeqResult},
    raster::buffer::DecodedImage,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Worker configuration for [`BatchRunner`].
pub struct BatchOptions {
    /// Process items on a worker pool instead of the calling thread.
    pub parallel: bool,
    /// Worker count; `None` lets rayon pick one per core.
    pub threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Cooperative cancellation flag shared between a batch and its controller.
///
/// Checked before each item starts; an item already running finishes normally.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every batch holding this token to stop picking up items.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether [`CancelToken::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One item that could not be processed.
pub struct BatchFailure {
    /// Item name (archive entry or image name).
    pub name: String,
    /// Human-readable cause.
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Per-item bookkeeping of a finished batch, without the outputs.
pub struct BatchSummary {
    /// Items that produced an output, in input order.
    pub succeeded: Vec<String>,
    /// Items whose job failed.
    pub failures: Vec<BatchFailure>,
    /// Items never started because the batch was cancelled.
    pub skipped: Vec<String>,
    /// Whether cancellation was observed.
    pub cancelled: bool,
}

impl BatchSummary {
    /// Number of submitted items.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len() + self.skipped.len()
    }

    /// Whether every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    /// [`LottieSeqError::PartialBatch`] unless every item succeeded.
    pub fn ensure_complete(&self) -> LottieSeqResult<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(LottieSeqError::PartialBatch {
            failed: self.failures.len() + self.skipped.len(),
            total: self.total(),
        })
    }
}

#[derive(Clone, Debug)]
/// Outputs of a batch plus its per-item bookkeeping.
pub struct BatchReport<T> {
    /// `(item name, output)` for each success, in input order.
    pub outputs: Vec<(String, T)>,
    /// Items whose job failed.
    pub failures: Vec<BatchFailure>,
    /// Items never started because the batch was cancelled.
    pub skipped: Vec<String>,
    /// Whether cancellation was observed.
    pub cancelled: bool,
}

impl<T> BatchReport<T> {
    /// Split into outputs and a summary.
    pub fn into_parts(self) -> (Vec<(String, T)>, BatchSummary) {
        let summary = BatchSummary {
            succeeded: self.outputs.iter().map(|(n, _)| n.clone()).collect(),
            failures: self.failures,
            skipped: self.skipped,
            cancelled: self.cancelled,
        };
        (self.outputs, summary)
    }
}

#[derive(Clone, Debug)]
/// Result of an archive-to-archive batch: the new archive and what went into it.
pub struct FilterOutcome {
    /// Encoded zip archive holding every successful output.
    pub archive: Vec<u8>,
    /// Per-entry bookkeeping.
    pub report: BatchSummary,
}

enum Outcome<O> {
    Done(O),
    Failed(String),
    Skipped,
}

/// Runs independent per-item jobs, optionally on a bounded rayon pool.
///
/// A failing item never aborts the batch; it is reported in [`BatchReport::failures`].
pub struct BatchRunner {
    pool: Option<rayon::ThreadPool>,
}

impl BatchRunner {
    /// Build a runner; a parallel runner owns its own thread pool.
    pub fn new(opts: &BatchOptions) -> LottieSeqResult<Self> {
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            None
        };
        Ok(Self { pool })
    }

    /// A runner that processes items on the calling thread.
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Whether items run on a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Apply `job` to every `(name, input)` item.
    ///
    /// Outputs keep input order regardless of scheduling. Once `cancel` fires, items that
    /// have not started are reported as skipped.
    #[tracing::instrument(skip_all, fields(items = items.len(), parallel = self.is_parallel()))]
    pub fn run<I, O, F>(
        &self,
        items: Vec<(String, I)>,
        cancel: &CancelToken,
        job: F,
    ) -> BatchReport<O>
    where
        I: Send,
        O: Send,
        F: Fn(&str, I) -> LottieSeqResult<O> + Sync,
    {
        let process = |(name, input): (String, I)| -> (String, Outcome<O>) {
            if cancel.is_cancelled() {
                return (name, Outcome::Skipped);
            }
            let outcome = match job(&name, input) {
                Ok(out) => Outcome::Done(out),
                Err(e) => Outcome::Failed(e.to_string()),
            };
            (name, outcome)
        };

        let results: Vec<(String, Outcome<O>)> = match &self.pool {
            Some(pool) => pool.install(|| items.into_par_iter().map(process).collect()),
            None => items.into_iter().map(process).collect(),
        };

        let mut report = BatchReport {
            outputs: Vec::with_capacity(results.len()),
            failures: Vec::new(),
            skipped: Vec::new(),
            cancelled: cancel.is_cancelled(),
        };
        for (name, outcome) in results {
            match outcome {
                Outcome::Done(out) => report.outputs.push((name, out)),
                Outcome::Failed(reason) => {
                    tracing::warn!(name = %name, reason = %reason, "batch item failed");
                    report.failures.push(BatchFailure { name, reason });
                }
                Outcome::Skipped => report.skipped.push(name),
            }
        }

        tracing::info!(
            succeeded = report.outputs.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            "batch finished"
        );
        report
    }

    /// Run the colour pipeline over decoded images, keeping names 1:1.
    ///
    /// Each output equals what [`crate::apply`] returns for the same image.
    pub fn adjust_images(
        &self,
        images: Vec<DecodedImage>,
        params: &AdjustmentParameters,
        cancel: &CancelToken,
    ) -> BatchReport<DecodedImage> {
        let params = *params;
        let items = images
            .into_iter()
            .map(|img| (img.name().to_string(), img))
            .collect();
        self.run(items, cancel, |_, img| Ok(apply(&img, &params)))
    }
}

/// Turn a report whose outputs are archive entries into a new archive.
pub(crate) fn collect_archive(
    report: BatchReport<ArchiveEntry>,
) -> LottieSeqResult<FilterOutcome> {
    let (outputs, report) = report.into_parts();
    let entries: Vec<ArchiveEntry> = outputs.into_iter().map(|(_, entry)| entry).collect();
    let archive = write_archive(&entries)?;
    Ok(FilterOutcome { archive, report })
}

fn build_thread_pool(threads: Option<usize>) -> LottieSeqResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LottieSeqError::parameter(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/batch/runner.rs"]
mod tests;
