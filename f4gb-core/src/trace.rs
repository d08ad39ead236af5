use f4gb_hash::{ColumnState, HashTable};
use f4gb_matrix::{multiply_basis_row, Basis, Matrix, ReducerRow};

/// A recorded matrix step, replayable against the same basis structure at
/// a different prime without repeating pair selection or the symbolic
/// divisor search.
///
/// Column assignment and the basis's monomial structure depend only on
/// monomial order and on which basis rows were multiplied by which
/// monomials — never on the prime's arithmetic — so a trace captured while
/// running one prime stays valid input for reducing the same step at any
/// other prime.
#[derive(Debug, Clone)]
pub struct Trace {
    /// `(basis row, multiplier exponent)` for every reducer row, in the
    /// order they were originally built.
    pub rr: Vec<(u32, Vec<i32>)>,
    /// `(basis row, multiplier exponent)` for every to-be-reduced row.
    pub tr: Vec<(u32, Vec<i32>)>,
    /// The lead column each `tr` row's reduction published at, `None` if
    /// it reduced to zero. Fed straight into
    /// [`f4gb_reduce::ReduceMode::Application`] when replaying at another
    /// prime.
    pub expected_pivots: Vec<Option<usize>>,
}

/// Captures a [`Trace`] from a matrix step that ran in
/// [`f4gb_reduce::ReduceMode::Trace`]: `pre` is the matrix immediately
/// after hash→column conversion (rows still carry the `bindex`/`mult`
/// fields set while building), and `reduced` is the same matrix once
/// reduction has overwritten `tr` with the new pivot rows found.
pub fn capture(pre: &Matrix, reduced: &Matrix, tht: &HashTable) -> Trace {
    let rr = pre
        .rr
        .iter()
        .map(|r| {
            let bindex = r.row.bindex.expect("trace mode sets bindex on every reducer row");
            let mult = r.row.mult.expect("trace mode sets mult on every reducer row");
            (bindex, tht.exp(mult).to_vec())
        })
        .collect();

    let tr = pre
        .tr
        .iter()
        .map(|row| {
            let row = row.as_ref().expect("tr rows are populated before reduction");
            let bindex = row.bindex.expect("trace mode sets bindex on every to-be-reduced row");
            let mult = row.mult.expect("trace mode sets mult on every to-be-reduced row");
            (bindex, tht.exp(mult).to_vec())
        })
        .collect();

    let expected_pivots = reduced.tr.iter().map(|row| row.as_ref().map(|r| r.monomials[0] as usize)).collect();

    Trace { rr, tr, expected_pivots }
}

impl Trace {
    /// Rebuilds the matrix this trace recorded, against `basis`/`bht` at
    /// whatever prime the caller is about to reduce with, interning every
    /// multiplied monomial into a fresh `sht` and marking each reducer
    /// row's lead a known pivot. No divisor search runs: every row named
    /// by the trace is rebuilt directly from its recorded generator and
    /// multiplier.
    pub fn rebuild_matrix(&self, basis: &Basis, bht: &HashTable, sht: &mut HashTable) -> Matrix {
        let mut mat = Matrix::new();

        for (bindex, mult_exp) in &self.rr {
            let mult_id = sht.insert(mult_exp);
            let mult_hash = sht.entry(mult_id).hash;
            let row = multiply_basis_row(basis, *bindex as usize, bht, sht, mult_exp, mult_hash);
            sht.set_state(row.monomials[0], ColumnState::Pivot);
            mat.rr.push(ReducerRow {
                row,
                basis_row: *bindex as usize,
            });
        }

        for (bindex, mult_exp) in &self.tr {
            let mult_id = sht.insert(mult_exp);
            let mult_hash = sht.entry(mult_id).hash;
            let row = multiply_basis_row(basis, *bindex as usize, bht, sht, mult_exp, mult_hash);
            mat.tr.push(Some(row));
        }

        mat.nru = mat.rr.len();
        mat.nrl = mat.tr.len();
        mat
    }
}
