use std::sync::Arc;

use f4gb_field::Prime;
use f4gb_matrix::{Matrix, Row};
use f4gb_util::Stats;
use rayon::prelude::*;

use crate::dense::{gather, normalize, reduce_against_pivots, DenseRow};
use crate::pivot::{Pivot, PivotTable};

/// Seeds `pivs` from the matrix step's known reducer rows (step
/// 0): every `rr` row publishes itself at its lead column before any
/// to-be-reduced row is touched, so the parallel scan never races on them.
pub fn seed_known_reducers(mat: &Matrix, ncols: usize) -> PivotTable {
    let pivs = PivotTable::new(ncols);
    for (i, rr) in mat.rr.iter().enumerate() {
        let col = rr.row.lead().expect("reducer rows are never empty") as usize;
        pivs.seed(
            col,
            Arc::new(Pivot {
                row: rr.row.clone(),
                reducer_id: Some(i),
            }),
        );
    }
    pivs
}

/// Fully reduces one to-be-reduced row against `pivs`, retrying against
/// whichever pivot wins a column race, and — if the row survives with an
/// unclaimed lead column — attempting to publish itself there.
///
/// Returns `Some(row)` if this row became (or tied into, having lost the
/// race itself) a new pivot; `None` if it reduced to zero. `on_reducer` is
/// invoked once per known reducer consulted, across every retry.
///
/// Grounded on `la_ff_32.c`'s per-row reduction loop: a CAS loss never
/// re-scatters the dense accumulator, it simply resumes the column scan at
/// the column it just lost ("no lock is ever held across a CAS
/// retry").
pub fn reduce_and_publish(
    row: &Row,
    ncols: usize,
    pivs: &PivotTable,
    prime: &Prime,
    reducer_id: Option<usize>,
    mut on_reducer: impl FnMut(usize),
) -> Option<Row> {
    let mut dr = DenseRow::zeroed(ncols, prime);
    dr.scatter(&row.monomials, &row.coeffs);
    let mut sc = row.monomials.first().copied().unwrap_or(0) as usize;

    loop {
        let np = reduce_against_pivots(&mut dr, ncols, sc, pivs, prime, &mut on_reducer)?;
        let (columns, mut coeffs) = gather(&dr, np, ncols, prime);
        normalize(&mut coeffs, prime);
        let mut new_row = Row::new(columns, coeffs);
        new_row.bindex = row.bindex;
        new_row.mult = row.mult;
        let candidate = Arc::new(Pivot {
            row: new_row.clone(),
            reducer_id,
        });
        match pivs.try_publish(np, candidate) {
            Ok(()) => return Some(new_row),
            Err(_winner) => {
                sc = np;
                continue;
            }
        }
    }
}

/// Runs exact (modular, non-probabilistic) reduction over a whole matrix
/// step: seeds the known reducers, reduces every to-be-reduced
/// row in parallel via [`rayon`], then sequentially writes the results and
/// (in trace mode) the `rba` contribution bitsets back into `mat`.
pub fn reduce_exact(mat: &mut Matrix, prime: &Prime, stats: &mut Stats, trace: bool) {
    let ncols = mat.nc;
    let pivs = seed_known_reducers(mat, ncols);

    if trace {
        mat.allocate_rba(mat.tr.len(), mat.rr.len());
    }

    let results: Vec<(Option<Row>, Vec<usize>)> = mat
        .tr
        .par_iter()
        .map(|row| {
            let mut used = Vec::new();
            let row = row.as_ref().expect("tr rows are populated before reduction");
            let out = reduce_and_publish(row, ncols, &pivs, prime, None, |rid| used.push(rid));
            (out, used)
        })
        .collect();

    let mut np = 0usize;
    for (i, (result, used)) in results.into_iter().enumerate() {
        match &result {
            Some(_) => np += 1,
            None => stats.record_zero_reduction(),
        }
        if trace {
            for rid in used {
                Matrix::mark_rba(&mut mat.rba[i], rid);
            }
        }
        mat.tr[i] = result;
    }
    mat.np = np;
}
