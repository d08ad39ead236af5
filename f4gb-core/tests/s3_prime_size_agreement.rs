//! Spec §8 scenario S3: the same matrix step reduced at `p = 2^32-5`
//! (32-bit regime) and `p = 2^31-1` (31-bit regime) must agree — same
//! matrix dimensions and the same normalized row outputs wherever the
//! small hand-picked coefficients used here are below both primes, so
//! reduction mod either prime is the identity on them.

use f4gb_core::reduce;
use f4gb_field::Prime;
use f4gb_matrix::{Matrix, ReducerRow, Row};
use f4gb_reduce::ReduceMode;
use f4gb_util::{Config, FieldWidth, Stats};

fn cfg(fc: u32) -> Config {
    Config::new(1, fc, 0, 10, 1024, FieldWidth::ThirtyTwo).unwrap()
}

fn sample_matrix() -> Matrix {
    let mut mat = Matrix::new();
    mat.nc = 3;
    mat.ncl = 1;
    mat.ncr = 2;
    mat.rr.push(ReducerRow {
        row: Row::new(vec![0], vec![1]),
        basis_row: 0,
    });
    // two to-be-reduced rows: one that cancels the known reducer and
    // survives with a tail, one independent new pivot.
    mat.tr.push(Some(Row::new(vec![0, 1], vec![3, 7])));
    mat.tr.push(Some(Row::new(vec![2], vec![11])));
    mat
}

#[test]
fn both_31_bit_and_32_bit_regimes_agree_on_small_coefficients() {
    let mut mat_32 = sample_matrix();
    let p_32 = Prime::new(u32::MAX - 4).unwrap(); // 2^32 - 5, the largest supported prime
    let c_32 = cfg(p_32.value());
    let mut stats_32 = Stats::new();
    reduce(&mut mat_32, &p_32, &c_32, &mut stats_32, &ReduceMode::Exact, 0).unwrap();

    let mut mat_31 = sample_matrix();
    let p_31 = Prime::new((1u32 << 31) - 1).unwrap();
    let c_31 = cfg(p_31.value());
    let mut stats_31 = Stats::new();
    reduce(&mut mat_31, &p_31, &c_31, &mut stats_31, &ReduceMode::Exact, 0).unwrap();

    assert_eq!(mat_32.nc, mat_31.nc);
    assert_eq!(mat_32.ncl, mat_31.ncl);
    assert_eq!(mat_32.ncr, mat_31.ncr);
    assert_eq!(mat_32.np, mat_31.np);

    for (row_32, row_31) in mat_32.tr.iter().zip(mat_31.tr.iter()) {
        match (row_32, row_31) {
            (Some(r32), Some(r31)) => {
                assert_eq!(r32.monomials, r31.monomials);
                assert_eq!(r32.coeffs, r31.coeffs);
            }
            (None, None) => {}
            _ => panic!("rows disagree on whether they reduced to zero across regimes"),
        }
    }
}
