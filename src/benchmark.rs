//! Window-width benchmark.
//!
//! The Tm window (see [`crate::window`]) bounds pairing work at the price of completeness.
//! This module runs one independent finder per half-width on a local Rayon pool and reports,
//! per width, the mean wall-clock time, how many pairs were scored and kept, and the best
//! score, so the trade-off can be read off a single table.
//!
//! The benchmarking entrypoint is [`run_window_benchmark`].
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::finder::{FinderError, PrimerPairFinder, SearchOutcome};
use crate::input::PrimerDesignInput;

/// Half-widths tried when none are given.
pub const DEFAULT_WIDTHS: &[usize] = &[0, 1, 5, 10, 25, 50, 100, 250, 1000];

/// Result row for one half-width.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowBenchmark {
    pub half_width: usize,
    pub repeats: usize,
    /// Mean over `repeats` runs.
    pub mean_elapsed: Duration,
    pub pairs_evaluated: usize,
    pub pairs_kept: usize,
    /// `None` when the search found no pairs.
    pub best_score: Option<f64>,
}

/// Run the finder once per `(width, repeat)` on a pool of `threads` workers
/// (`None` = all logical cores). Rows come back in the order of `widths`.
///
/// Invalid input is reported once, up front, instead of once per width.
pub fn run_window_benchmark(
    input: &PrimerDesignInput,
    widths: &[usize],
    repeats: usize,
    threads: Option<usize>,
) -> Result<Vec<WindowBenchmark>> {
    if let Err(e) = input.validate() {
        bail!(FinderError::from(e));
    }
    let repeats = repeats.max(1);
    let n = threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new().num_threads(n).build()?;

    let searches = AtomicU64::new(0);
    let started = Instant::now();

    let rows = pool.install(|| {
        widths
            .par_iter()
            .map(|&half_width| -> Result<WindowBenchmark> {
                let mut total = Duration::ZERO;
                let mut last = None;
                for _ in 0..repeats {
                    let finder = PrimerPairFinder::new(input.clone()).with_window_half_width(half_width);
                    let t0 = Instant::now();
                    let outcome = finder.find_primer_pairs();
                    total += t0.elapsed();
                    searches.fetch_add(1, Ordering::Relaxed);
                    last = Some((outcome, finder.stats()));
                }
                let Some((outcome, stats)) = last else {
                    bail!("no benchmark run for half-width {half_width}");
                };
                let pairs = match outcome {
                    Ok(SearchOutcome::Ranked(pairs)) | Ok(SearchOutcome::Cancelled(pairs)) => pairs,
                    Err(FinderError::NoPairsFound) => Vec::new(),
                    Err(e) => return Err(e.into()),
                };
                Ok(WindowBenchmark {
                    half_width,
                    repeats,
                    mean_elapsed: mean(total, repeats),
                    pairs_evaluated: stats.pairs_evaluated,
                    pairs_kept: pairs.len(),
                    best_score: pairs.first().map(|p| p.score),
                })
            })
            .collect::<Result<Vec<_>>>()
    })?;

    log::info!(
        "window benchmark: {} searches over {} widths on {n} threads in {:?}",
        searches.load(Ordering::Relaxed),
        widths.len(),
        started.elapsed()
    );
    Ok(rows)
}

fn mean(total: Duration, repeats: usize) -> Duration {
    total.div_f64(repeats as f64)
}
