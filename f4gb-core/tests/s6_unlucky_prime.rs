//! Spec §8 scenario S6: a trace captured at one prime records a row
//! reducing to a nonzero pivot; replaying the same trace against a matrix
//! where that row instead cancels to zero must surface
//! [`GbError::UnluckyPrime`] rather than silently returning a smaller
//! basis update.

use f4gb_field::Prime;
use f4gb_matrix::{Matrix, ReducerRow, Row};
use f4gb_reduce::{reduce, ReduceMode};
use f4gb_util::{Config, FieldWidth, GbError, Stats};

fn cfg() -> Config {
    Config::new(1, 101, 0, 10, 1024, FieldWidth::ThirtyTwo).unwrap()
}

fn prime() -> Prime {
    Prime::new(101).unwrap()
}

/// A known reducer at column 0 plus one to-be-reduced row at columns
/// `[0, 1]` with tail coefficient `tail`: zero makes the row cancel
/// completely against the reducer, nonzero leaves a surviving pivot at
/// column 1.
fn matrix_with_tail(tail: u32) -> Matrix {
    let mut mat = Matrix::new();
    mat.nc = 2;
    mat.ncl = 1;
    mat.ncr = 1;
    mat.rr.push(ReducerRow {
        row: Row::new(vec![0], vec![1]),
        basis_row: 0,
    });
    if tail == 0 {
        mat.tr.push(Some(Row::new(vec![0], vec![1])));
    } else {
        mat.tr.push(Some(Row::new(vec![0, 1], vec![1, tail])));
    }
    mat
}

#[test]
fn a_trace_predicting_a_nonzero_pivot_that_vanishes_is_reported_unlucky() {
    let p = prime();
    let c = cfg();

    // Record a trace where the row survives with a pivot at column 1.
    let mut traced = matrix_with_tail(9);
    let mut stats = Stats::new();
    reduce(&mut traced, &p, &c, &mut stats, &ReduceMode::Trace, 0).unwrap();
    let expected_pivots: Vec<Option<usize>> = traced.tr.iter().map(|r| r.as_ref().map(|r| r.monomials[0] as usize)).collect();
    assert_eq!(expected_pivots, vec![Some(1)]);

    // Replaying against the exact same shape succeeds: the prediction holds.
    let mut matches = matrix_with_tail(9);
    let mut stats2 = Stats::new();
    let ok = reduce(&mut matches, &p, &c, &mut stats2, &ReduceMode::Application(expected_pivots.clone()), 0);
    assert!(ok.is_ok());

    // A structurally identical matrix where the row instead fully cancels
    // (as if a different prime made the generator and its multiple
    // coincide) must be reported as an unlucky prime, not silently accepted.
    let mut cancels = matrix_with_tail(0);
    let mut stats3 = Stats::new();
    let err = reduce(&mut cancels, &p, &c, &mut stats3, &ReduceMode::Application(expected_pivots), 0);
    assert!(matches!(err, Err(GbError::UnluckyPrime { .. })));
}
