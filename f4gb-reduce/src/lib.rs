//! The F4 row engine: turns a built [`f4gb_matrix::Matrix`]
//! into its row-reduced form, using whichever of the exact, probabilistic,
//! sparse/dense-hybrid, or trace-replay strategies [`ReduceMode`] selects.
//!
//! Every strategy is grounded on the same underlying primitive —
//! [`dense::reduce_against_pivots`] scanning a [`dense::DenseRow`]
//! accumulator against a concurrently-published [`pivot::PivotTable`] — the
//! strategies differ only in how rows are batched and which pivot table
//! they consult.

pub mod dense;
pub mod exact;
pub mod hybrid;
pub mod interreduce;
pub mod mode;
pub mod pivot;
pub mod probabilistic;

pub use dense::DenseRow;
pub use exact::{reduce_and_publish, reduce_exact, seed_known_reducers};
pub use hybrid::{reduce_hybrid, reduce_hybrid_probabilistic};
pub use interreduce::interreduce_rows;
pub use mode::ReduceMode;
pub use pivot::{Pivot, PivotTable};
pub use probabilistic::reduce_probabilistic;

use f4gb_field::Prime;
use f4gb_matrix::Matrix;
use f4gb_util::{Config, GbError, GbResult, Stats};

/// Reduces `mat` in place according to `mode` (the top-level `reduce`
/// entry point). `seed` is only consulted by the probabilistic strategies.
///
/// `cfg.nthrds()` sizes the `rayon` pool the parallel strategies' row-level
/// `par_iter` runs in (spec §5's "fixed worker pool of `nthrds` threads");
/// every mode funnels through [`with_worker_pool`] rather than the ambient
/// global pool, so the configured thread count is actually honored instead
/// of silently falling back to rayon's default.
pub fn reduce(mat: &mut Matrix, prime: &Prime, cfg: &Config, stats: &mut Stats, mode: &ReduceMode, seed: u64) -> GbResult<()> {
    with_worker_pool(cfg.nthrds(), || match mode {
        ReduceMode::Exact => {
            reduce_exact(mat, prime, stats, false);
            Ok(())
        }
        ReduceMode::Trace => {
            reduce_exact(mat, prime, stats, true);
            Ok(())
        }
        ReduceMode::Probabilistic => {
            reduce_probabilistic(mat, prime, cfg, stats, seed);
            Ok(())
        }
        ReduceMode::ExactSparseDense => {
            reduce_hybrid(mat, prime, stats, false);
            Ok(())
        }
        ReduceMode::ProbabilisticSparseDense => {
            reduce_hybrid_probabilistic(mat, prime, cfg, stats, seed);
            Ok(())
        }
        ReduceMode::Application(expected_pivots) => reduce_application(mat, prime, stats, expected_pivots),
    })
}

/// Runs `f` inside a `rayon` thread pool built with exactly `nthrds`
/// threads, rather than whatever size the ambient global pool happens to
/// be. `nthrds == rayon::current_num_threads()` skips building a fresh pool
/// (the common case when the caller never overrode rayon's default),
/// matching the global pool's own thread count without the allocation.
fn with_worker_pool<T>(nthrds: usize, f: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if nthrds == rayon::current_num_threads() {
        return f();
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(nthrds)
        .build()
        .expect("building a scoped rayon pool with a validated thread count")
        .install(f)
}

/// Application-mode reduction: replays a previously recorded
/// trace at a new prime. Runs exact reduction, then checks every row's
/// outcome against what the trace predicted — a predicted pivot that
/// reduced to zero here means this prime is unlucky for this trace (spec
/// §7) and the caller must retry the whole step with a different prime.
fn reduce_application(mat: &mut Matrix, prime: &Prime, stats: &mut Stats, expected_pivots: &[Option<usize>]) -> GbResult<()> {
    reduce_exact(mat, prime, stats, false);
    for (row, expected) in mat.tr.iter().zip(expected_pivots) {
        match (row, expected) {
            (None, Some(expected_col)) => {
                return Err(GbError::UnluckyPrime {
                    row: 0,
                    expected_pivot_col: *expected_col,
                });
            }
            _ => continue,
        }
    }
    Ok(())
}
