use f4gb_field::Prime;
use f4gb_matrix::Row;

use crate::dense::{normalize, DenseRow};

/// Reduces `row` against whatever pivots `slots` already holds, starting
/// the scan at `row`'s own lead column. Single-threaded sibling of
/// [`crate::exact::reduce_and_publish`] with no concurrent-publish retry
/// loop, since interreduction owns `slots` exclusively.
fn reduce_against_slots(row: &Row, ncols: usize, slots: &[Option<Row>], prime: &Prime) -> Option<Row> {
    let mut dr = DenseRow::zeroed(ncols, prime);
    dr.scatter(&row.monomials, &row.coeffs);
    let sc = row.monomials.first().copied().unwrap_or(0) as usize;

    let mut np = None;
    let mut k = 0usize;
    for i in sc..ncols {
        if dr.is_raw_zero(i) {
            continue;
        }
        let value = dr.value_at(i, prime);
        if value == 0 {
            continue;
        }
        match &slots[i] {
            None => {
                k += 1;
                np.get_or_insert(i);
            }
            Some(pivot) => {
                dr.eliminate_column(i, value, &pivot.monomials, &pivot.coeffs, prime);
            }
        }
    }
    if k == 0 {
        return None;
    }
    let np = np.unwrap();
    let mut columns = Vec::new();
    let mut coeffs = Vec::new();
    for i in np..ncols {
        if dr.is_raw_zero(i) {
            continue;
        }
        let v = dr.value_at(i, prime);
        if v != 0 {
            columns.push(i as u32);
            coeffs.push(v);
        }
    }
    normalize(&mut coeffs, prime);
    let mut out = Row::new(columns, coeffs);
    out.bindex = row.bindex;
    out.mult = row.mult;
    Some(out)
}

/// Eliminates every occurrence of column `col` in every other pivot's tail,
/// using `slots[col]` as the reducer. Part of the backward (right-to-left)
/// pass that turns a forward echelon form into a fully reduced one (spec
/// §4.4's interreduction step, and the shared kernel behind the full-basis
/// whole-basis `interreduce_matrix_rows`).
fn eliminate(slots: &mut [Option<Row>], col: usize, prime: &Prime) {
    let pivot = match &slots[col] {
        Some(p) => p.clone(),
        None => return,
    };
    for other in slots.iter_mut() {
        let Some(row) = other else { continue };
        let Some(pos) = row.monomials.iter().position(|&m| m as usize == col) else {
            continue;
        };
        if pos == 0 {
            // `col` is this row's own lead (including the pivot itself);
            // nothing above it to eliminate.
            continue;
        }
        let value = row.coeffs[pos];
        let mut dr = DenseRow::zeroed(slots.len(), prime);
        dr.scatter(&row.monomials, &row.coeffs);
        dr.eliminate_column(col, value, &pivot.monomials, &pivot.coeffs, prime);
        let mut columns = Vec::new();
        let mut coeffs = Vec::new();
        for i in row.monomials[0] as usize..slots.len() {
            if dr.is_raw_zero(i) {
                continue;
            }
            let v = dr.value_at(i, prime);
            if v != 0 {
                columns.push(i as u32);
                coeffs.push(v);
            }
        }
        let lead_bindex = row.bindex;
        let lead_mult = row.mult;
        let mut new_row = Row::new(columns, coeffs);
        new_row.bindex = lead_bindex;
        new_row.mult = lead_mult;
        *row = new_row;
    }
}

/// Fully interreduces a set of rows into reduced row echelon form (spec
/// §4.4's per-matrix-step interreduction; reused by `f4gb-core` to
/// interreduce the whole basis after the main loop converges).
///
/// Forward pass: reduce each row sequentially against pivots found so far,
/// assigning it a slot at its own lead column. Backward pass: scan pivot
/// columns right-to-left, eliminating each pivot's occurrences out of every
/// other pivot's tail, so no pivot row's tail references another pivot's
/// lead column.
pub fn interreduce_rows(rows: Vec<Row>, ncols: usize, prime: &Prime) -> Vec<Row> {
    let mut slots: Vec<Option<Row>> = vec![None; ncols];
    for row in rows {
        if let Some(reduced) = reduce_against_slots(&row, ncols, &slots, prime) {
            let lead = reduced.monomials[0] as usize;
            slots[lead] = Some(reduced);
        }
    }

    let pivot_cols: Vec<usize> = (0..ncols).rev().filter(|&c| slots[c].is_some()).collect();
    for col in pivot_cols {
        eliminate(&mut slots, col, prime);
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prime() -> Prime {
        Prime::new(101).unwrap()
    }

    #[test]
    fn independent_rows_all_survive_as_pivots() {
        let p = prime();
        let rows = vec![Row::new(vec![0], vec![1]), Row::new(vec![1], vec![1])];
        let out = interreduce_rows(rows, 2, &p);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn a_row_that_is_a_multiple_of_an_earlier_one_vanishes() {
        let p = prime();
        let rows = vec![
            Row::new(vec![0, 1], vec![1, 1]),
            Row::new(vec![0, 1], vec![2, 2]), // 2 * row 0
        ];
        let out = interreduce_rows(rows, 2, &p);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn backward_pass_clears_a_pivot_from_an_earlier_rows_tail() {
        let p = prime();
        // row 0: x0 + x1 (lead col 0), row 1: x1 (lead col 1, a pivot)
        // after the backward pass, row 0's tail must no longer reference col 1.
        let rows = vec![Row::new(vec![0, 1], vec![1, 1]), Row::new(vec![1], vec![1])];
        let out = interreduce_rows(rows, 2, &p);
        assert_eq!(out.len(), 2);
        let row0 = out.iter().find(|r| r.monomials[0] == 0).unwrap();
        assert_eq!(row0.monomials, vec![0]);
    }
}
