use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use f4gb_field::Prime;
use f4gb_matrix::{Matrix, Row};
use f4gb_util::{Config, Stats};
use rayon::prelude::*;

use crate::dense::{gather, normalize, reduce_against_pivots, DenseRow};
use crate::exact::seed_known_reducers;

/// Rows per randomized combination block in
/// [`reduce_hybrid_probabilistic`]'s dense phase. Independent of
/// [`crate::probabilistic::reduce_probabilistic`]'s own `BLOCK_SIZE`: each
/// is a correctness unit sized for its own phase's column count, not a
/// shared tuning knob.
const BLOCK_SIZE: usize = 32;

struct Phase1Result {
    tail_cols: Vec<u32>,
    tail_coeffs: Vec<u32>,
    used: Vec<usize>,
    bindex: Option<u32>,
    mult: Option<u32>,
}

/// Sparse/dense hybrid reduction. Exploits the invariant that
/// `ncl == nru` and the known reducers' lead columns form a contiguous
/// permutation of `[0, ncl)`:
///
/// - Phase 1 (parallel, sparse): each row is reduced only against the known
///   reducers, which is guaranteed to fully clear `[0, ncl)` and leave a
///   dense tail over the remaining `ncr` columns.
/// - Phase 2 (sequential, dense): the tails, renumbered to `[0, ncr)`, are
///   reduced against each other with a single forward column pass per row —
///   no concurrent-publish retry is needed since phase 2 owns its pivot
///   slots exclusively, one row at a time.
///
/// Grounded on `la_ff_32.c`'s `ba_dense` path, which likewise splits a step
/// into a sparse elimination of the known block followed by dense
/// elimination of the remainder.
pub fn reduce_hybrid(mat: &mut Matrix, prime: &Prime, stats: &mut Stats, trace: bool) {
    let ncols = mat.nc;
    let ncl = mat.ncl;
    let ncr = mat.ncr;
    let known = seed_known_reducers(mat, ncols);

    if trace {
        mat.allocate_rba(mat.tr.len(), mat.rr.len());
    }

    let phase1: Vec<Phase1Result> = mat
        .tr
        .par_iter()
        .map(|row| {
            let row = row.as_ref().expect("tr rows are populated before reduction");
            let mut dr = DenseRow::zeroed(ncols, prime);
            dr.scatter(&row.monomials, &row.coeffs);
            let mut used = Vec::new();
            reduce_against_pivots(&mut dr, ncl, 0, &known, prime, |rid| used.push(rid));
            let (tail_cols, tail_coeffs) = gather(&dr, ncl, ncols, prime);
            Phase1Result {
                tail_cols,
                tail_coeffs,
                used,
                bindex: row.bindex,
                mult: row.mult,
            }
        })
        .collect();

    let rba_words = mat.rr.len().div_ceil(64);
    let mut sub_pivots: Vec<Option<(Row, Vec<u64>)>> = vec![None; ncr];
    let mut np = 0usize;

    for (i, p1) in phase1.iter().enumerate() {
        let mut bits = vec![0u64; rba_words];
        for &r in &p1.used {
            Matrix::mark_rba(&mut bits, r);
        }

        if p1.tail_cols.is_empty() {
            stats.record_zero_reduction();
            mat.tr[i] = None;
            if trace {
                mat.rba[i] = bits;
            }
            continue;
        }

        let sub_cols: Vec<u32> = p1.tail_cols.iter().map(|c| c - ncl as u32).collect();
        let mut dr = DenseRow::zeroed(ncr, prime);
        dr.scatter(&sub_cols, &p1.tail_coeffs);

        let sc = sub_cols[0] as usize;
        let mut k = 0usize;
        let mut np_col = None;
        for col in sc..ncr {
            if dr.is_raw_zero(col) {
                continue;
            }
            let value = dr.value_at(col, prime);
            if value == 0 {
                continue;
            }
            match &sub_pivots[col] {
                None => {
                    k += 1;
                    np_col.get_or_insert(col);
                }
                Some((pivot_row, pivot_bits)) => {
                    dr.eliminate_column(col, value, &pivot_row.monomials, &pivot_row.coeffs, prime);
                    for (b, pb) in bits.iter_mut().zip(pivot_bits) {
                        *b |= pb;
                    }
                }
            }
        }

        if k == 0 {
            stats.record_zero_reduction();
            mat.tr[i] = None;
        } else {
            let col = np_col.unwrap();
            let (cols, mut coeffs) = gather(&dr, col, ncr, prime);
            normalize(&mut coeffs, prime);
            let mut sub_row = Row::new(cols.clone(), coeffs.clone());
            sub_row.bindex = p1.bindex;
            sub_row.mult = p1.mult;
            sub_pivots[col] = Some((sub_row, bits.clone()));

            let full_cols: Vec<u32> = cols.into_iter().map(|c| c + ncl as u32).collect();
            let mut full_row = Row::new(full_cols, coeffs);
            full_row.bindex = p1.bindex;
            full_row.mult = p1.mult;
            mat.tr[i] = Some(full_row);
            np += 1;
        }

        if trace {
            mat.rba[i] = bits;
        }
    }

    mat.np = np;
}

/// Sparse/dense hybrid reduction with a probabilistic dense phase: phase 1
/// is identical to [`reduce_hybrid`] (every row cleared against the known
/// reducers in parallel, leaving a dense tail), but phase 2 processes the
/// tails in randomized-combination blocks the way
/// [`crate::probabilistic::reduce_probabilistic`] does — a block whose
/// random linear combination reduces to zero against the dense pivots
/// found by earlier blocks is dropped whole, without reducing any of its
/// rows individually; a surviving block falls back to
/// [`reduce_hybrid`]'s per-row dense elimination to recover the actual new
/// pivots. Trace recording is not supported here: [`crate::mode::ReduceMode`]
/// never pairs `ProbabilisticSparseDense` with trace capture.
///
/// Grounded on `la_ff_32.c`'s `probabilistic_sparse_dense_linear_algebra_ff_32`,
/// which runs the same sparse/known-block clearing as the exact hybrid path
/// before applying the probabilistic block combination to the dense
/// remainder rather than to the whole row.
pub fn reduce_hybrid_probabilistic(mat: &mut Matrix, prime: &Prime, cfg: &Config, stats: &mut Stats, seed: u64) {
    let ncols = mat.nc;
    let ncl = mat.ncl;
    let ncr = mat.ncr;
    let known = seed_known_reducers(mat, ncols);

    let phase1: Vec<Phase1Result> = mat
        .tr
        .par_iter()
        .map(|row| {
            let row = row.as_ref().expect("tr rows are populated before reduction");
            let mut dr = DenseRow::zeroed(ncols, prime);
            dr.scatter(&row.monomials, &row.coeffs);
            let mut used = Vec::new();
            reduce_against_pivots(&mut dr, ncl, 0, &known, prime, |rid| used.push(rid));
            let (tail_cols, tail_coeffs) = gather(&dr, ncl, ncols, prime);
            Phase1Result {
                tail_cols,
                tail_coeffs,
                used,
                bindex: row.bindex,
                mult: row.mult,
            }
        })
        .collect();

    let mut rng = SmallRng::seed_from_u64(seed);
    let mask = (1u64 << cfg.probabilistic_mask_bits()).max(2);
    let mut sub_pivots: Vec<Option<Row>> = vec![None; ncr];
    let mut np = 0usize;

    let n = phase1.len();
    let mut start = 0usize;
    while start < n {
        let end = (start + BLOCK_SIZE).min(n);

        let mut combined = DenseRow::zeroed(ncr, prime);
        let mut min_lead = ncr;
        for p1 in &phase1[start..end] {
            if p1.tail_cols.is_empty() {
                continue;
            }
            let mult: u64 = rng.random_range(1..mask);
            let sub_cols: Vec<u32> = p1.tail_cols.iter().map(|c| c - ncl as u32).collect();
            combined.scatter_accumulate(&sub_cols, &p1.tail_coeffs, mult, prime);
            min_lead = min_lead.min(sub_cols[0] as usize);
        }

        let survives = min_lead < ncr && combined_survives(&combined, ncr, min_lead, &sub_pivots, prime);

        if !survives {
            for i in start..end {
                if mat.tr[i].take().is_some() {
                    stats.record_zero_reduction();
                }
            }
            start = end;
            continue;
        }

        for i in start..end {
            let p1 = &phase1[i];
            if p1.tail_cols.is_empty() {
                stats.record_zero_reduction();
                mat.tr[i] = None;
                continue;
            }

            let sub_cols: Vec<u32> = p1.tail_cols.iter().map(|c| c - ncl as u32).collect();
            let mut dr = DenseRow::zeroed(ncr, prime);
            dr.scatter(&sub_cols, &p1.tail_coeffs);

            let sc = sub_cols[0] as usize;
            let mut k = 0usize;
            let mut np_col = None;
            for col in sc..ncr {
                if dr.is_raw_zero(col) {
                    continue;
                }
                let value = dr.value_at(col, prime);
                if value == 0 {
                    continue;
                }
                match &sub_pivots[col] {
                    None => {
                        k += 1;
                        np_col.get_or_insert(col);
                    }
                    Some(pivot_row) => {
                        dr.eliminate_column(col, value, &pivot_row.monomials, &pivot_row.coeffs, prime);
                    }
                }
            }

            if k == 0 {
                stats.record_zero_reduction();
                mat.tr[i] = None;
            } else {
                let col = np_col.unwrap();
                let (cols, mut coeffs) = gather(&dr, col, ncr, prime);
                normalize(&mut coeffs, prime);
                let mut sub_row = Row::new(cols.clone(), coeffs.clone());
                sub_row.bindex = p1.bindex;
                sub_row.mult = p1.mult;
                sub_pivots[col] = Some(sub_row);

                let full_cols: Vec<u32> = cols.into_iter().map(|c| c + ncl as u32).collect();
                let mut full_row = Row::new(full_cols, coeffs);
                full_row.bindex = p1.bindex;
                full_row.mult = p1.mult;
                mat.tr[i] = Some(full_row);
                np += 1;
            }
        }

        start = end;
    }

    mat.np = np;
}

/// Checks whether `combined` has any column below a known dense pivot once
/// every column it already has a pivot for has been eliminated — the
/// block-level survival test for [`reduce_hybrid_probabilistic`], mirroring
/// [`crate::dense::reduce_against_pivots`] but against the hybrid path's
/// `sub_pivots` table instead of a [`crate::pivot::PivotTable`].
fn combined_survives(combined: &DenseRow, ncr: usize, sc: usize, sub_pivots: &[Option<Row>], prime: &Prime) -> bool {
    let mut dr = match combined {
        DenseRow::Narrow(d) => DenseRow::Narrow(d.clone()),
        DenseRow::Wide { low, high } => DenseRow::Wide {
            low: low.clone(),
            high: high.clone(),
        },
    };
    for col in sc..ncr {
        if dr.is_raw_zero(col) {
            continue;
        }
        let value = dr.value_at(col, prime);
        if value == 0 {
            continue;
        }
        match &sub_pivots[col] {
            None => return true,
            Some(pivot_row) => dr.eliminate_column(col, value, &pivot_row.monomials, &pivot_row.coeffs, prime),
        }
    }
    false
}
