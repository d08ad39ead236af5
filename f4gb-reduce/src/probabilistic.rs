use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use f4gb_field::Prime;
use f4gb_matrix::Matrix;
use f4gb_util::{Config, Stats};

use crate::dense::{reduce_against_pivots, DenseRow};
use crate::exact::{reduce_and_publish, seed_known_reducers};

/// Rows per randomized linear-combination block. Not tied to
/// `cfg.nthrds` — a block is a correctness unit, not a parallelism unit, so
/// a fixed size keeps the zero-detection false-positive rate constant
/// regardless of thread count.
const BLOCK_SIZE: usize = 32;

/// Probabilistic reduction: combines each block of to-be-reduced
/// rows with random multipliers into one dense row and reduces that
/// instead of every row individually. If the combination reduces to zero,
/// every row in the block is assumed to reduce to zero too (a false
/// positive here is the probabilistic strategy's accepted risk, bounded by
/// `cfg.probabilistic_mask_bits()`). If the combination survives, this port
/// falls back to reducing every row in the block individually via
/// [`reduce_and_publish`] to recover the actual new pivots — the original's
/// finer-grained within-block elimination heuristic was not recoverable
/// from the filtered source pack, so this trades some of its speed for a
/// result guaranteed consistent with exact reduction (see DESIGN.md).
pub fn reduce_probabilistic(mat: &mut Matrix, prime: &Prime, cfg: &Config, stats: &mut Stats, seed: u64) {
    let ncols = mat.nc;
    let pivs = seed_known_reducers(mat, ncols);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mask = (1u64 << cfg.probabilistic_mask_bits()).max(2);

    let mut np = 0usize;
    let n = mat.tr.len();
    let mut start = 0usize;
    while start < n {
        let end = (start + BLOCK_SIZE).min(n);
        let mut combined = DenseRow::zeroed(ncols, prime);
        let mut min_lead = ncols;
        for row in mat.tr[start..end].iter().flatten() {
            let mult: u64 = rng.random_range(1..mask);
            combined.scatter_accumulate(&row.monomials, &row.coeffs, mult, prime);
            if let Some(lead) = row.lead() {
                min_lead = min_lead.min(lead as usize);
            }
        }

        let survives = min_lead < ncols
            && reduce_against_pivots(&mut combined, ncols, min_lead, &pivs, prime, |_| {}).is_some();

        if !survives {
            for row in &mut mat.tr[start..end] {
                if row.take().is_some() {
                    stats.record_zero_reduction();
                }
            }
        } else {
            for i in start..end {
                let Some(row) = mat.tr[i].take() else { continue };
                let out = reduce_and_publish(&row, ncols, &pivs, prime, None, |_| {});
                if out.is_some() {
                    np += 1;
                } else {
                    stats.record_zero_reduction();
                }
                mat.tr[i] = out;
            }
        }

        start = end;
    }
    mat.np = np;
}

#[cfg(test)]
mod tests {
    use f4gb_matrix::{ReducerRow, Row};
    use f4gb_util::FieldWidth;

    use super::*;

    fn prime() -> Prime {
        Prime::new(101).unwrap()
    }

    #[test]
    fn a_block_that_fully_cancels_is_dropped_without_individual_reduction() {
        let mut mat = Matrix::new();
        mat.nc = 1;
        mat.rr.push(ReducerRow {
            row: Row::new(vec![0], vec![1]),
            basis_row: 0,
        });
        mat.tr.push(Some(Row::new(vec![0], vec![1])));
        mat.tr.push(Some(Row::new(vec![0], vec![1])));

        let p = prime();
        // max_uht_size = 1 forces probabilistic_mask_bits() = 1 and hence a
        // 1..2 multiplier range, so every random multiplier is deterministically
        // 1 regardless of the seeded RNG stream — keeps this test's expected
        // values hand-checkable instead of coupled to `rand`'s exact output.
        let cfg = Config::new(1, 101, 0, 4, 1, FieldWidth::ThirtyTwo).unwrap();
        let mut stats = Stats::new();
        reduce_probabilistic(&mut mat, &p, &cfg, &mut stats, 42);

        assert!(mat.tr.iter().all(|r| r.is_none()));
        assert_eq!(stats.num_zero_reductions, 2);
    }

    #[test]
    fn a_surviving_block_falls_back_to_recover_individual_pivots() {
        let mut mat = Matrix::new();
        mat.nc = 2;
        mat.rr.push(ReducerRow {
            row: Row::new(vec![0], vec![1]),
            basis_row: 0,
        });
        mat.tr.push(Some(Row::new(vec![0], vec![1]))); // cancels
        mat.tr.push(Some(Row::new(vec![1], vec![5]))); // survives

        let p = prime();
        // max_uht_size = 1 forces probabilistic_mask_bits() = 1 and hence a
        // 1..2 multiplier range, so every random multiplier is deterministically
        // 1 regardless of the seeded RNG stream — keeps this test's expected
        // values hand-checkable instead of coupled to `rand`'s exact output.
        let cfg = Config::new(1, 101, 0, 4, 1, FieldWidth::ThirtyTwo).unwrap();
        let mut stats = Stats::new();
        reduce_probabilistic(&mut mat, &p, &cfg, &mut stats, 7);

        assert_eq!(mat.np, 1);
        assert!(mat.tr[0].is_none());
        assert_eq!(mat.tr[1].as_ref().unwrap().monomials, vec![1]);
    }
}
