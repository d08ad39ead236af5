use std::time::Instant;

use f4gb_field::Prime;
use f4gb_matrix::Matrix;
use f4gb_reduce::ReduceMode;
use f4gb_util::{Config, GbResult, Stats};

/// Runs the row engine over `mat`, timing the whole phase into
/// `stats.la_ctime`. A thin wrapper rather than a call through
/// [`Stats::timed_phase`]: that helper expects a closure borrowing nothing
/// from the `&mut Stats` it already holds, but `f4gb_reduce::reduce` itself
/// takes `stats` as an argument, which would alias `field` inside the
/// closure.
pub fn reduce(mat: &mut Matrix, prime: &Prime, cfg: &Config, stats: &mut Stats, mode: &ReduceMode, seed: u64) -> GbResult<()> {
    let start = Instant::now();
    let result = f4gb_reduce::reduce(mat, prime, cfg, stats, mode, seed);
    let elapsed = start.elapsed();
    stats.la_ctime += elapsed;
    if cfg.info_level() >= 2 {
        tracing::debug!(np = mat.np, elapsed_us = elapsed.as_micros() as u64, "reduction complete");
    }
    result
}
