use f4gb_hash::{ColumnState, HashId, HashTable};
use f4gb_matrix::{Basis, ReducerRow};

use crate::reducer::find_multiplied_reducer;

/// Closes the symbolic hash table's column support under basis divisibility:
/// every monomial that appears in a to-be-reduced row, or in
/// any reducer row discovered along the way, ends up with either a reducer
/// (state [`ColumnState::Pivot`]) or a confirmed absence of one (state
/// [`ColumnState::NonPivot`]).
///
/// Grounded on `symbol.c::symbolic_preprocessing`: entries are visited in
/// append order starting after the reserved zero slot; the scan re-reads
/// `sht.eld()` on every step because a successful reducer multiplies in new
/// monomials that extend the very table being iterated. Termination relies
/// on a well-founded monomial order — a reducer's non-lead monomials are
/// always smaller than its lead, so the table cannot grow forever.
pub fn close_symbolic_table(
    sht: &mut HashTable,
    basis: &Basis,
    bht: &HashTable,
    rr: &mut Vec<ReducerRow>,
    mut tht: Option<&mut HashTable>,
) {
    let mut i: usize = 1;
    while i < sht.eld() {
        let m = i as HashId;
        if sht.state(m) == ColumnState::Absent {
            sht.set_state(m, ColumnState::NonPivot);
            if let Some(reducer) = find_multiplied_reducer(m, basis, bht, sht, tht.as_deref_mut()) {
                rr.push(reducer);
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use f4gb_matrix::Row;

    use super::*;

    #[test]
    fn closes_transitively_through_newly_introduced_monomials() {
        // basis: f = y^3 (lead y^3), g = x*y - y (lead x*y, second term y).
        // A to-be-reduced row mentions x*y^2: f's lead doesn't divide it
        // (not enough y's), g's does, and multiplying g's second term (y)
        // by the same multiplier (y) introduces y^2 as a brand-new
        // monomial, which itself has no divisor in the basis.
        let mut bht = HashTable::new(2, 1);
        let mut basis = Basis::new();
        let f_lead = bht.insert(&[0, 3]);
        basis.push(Row::new(vec![f_lead], vec![1]), bht.entry(f_lead).sdm);
        let g_lead = bht.insert(&[1, 1]);
        let g_tail = bht.insert(&[0, 1]);
        basis.push(Row::new(vec![g_lead, g_tail], vec![1, 1]), bht.entry(g_lead).sdm);

        let mut sht = HashTable::new(2, 2);
        let xy2 = sht.insert(&[1, 2]);
        sht.set_state(xy2, ColumnState::Absent);

        let mut rr = Vec::new();
        close_symbolic_table(&mut sht, &basis, &bht, &mut rr, None);

        assert_eq!(rr.len(), 1);
        assert_eq!(rr[0].basis_row, 1);
        assert_eq!(sht.state(xy2), ColumnState::Pivot);

        let y2 = sht.insert(&[0, 2]);
        // y^2 has no divisor: f needs y^3 (too much y), g needs x.
        assert_eq!(sht.state(y2), ColumnState::NonPivot);
    }

    #[test]
    fn monomial_with_no_divisor_becomes_non_pivot() {
        let mut bht = HashTable::new(1, 3);
        let mut basis = Basis::new();
        let lead = bht.insert(&[2]);
        basis.push(Row::new(vec![lead], vec![1]), bht.entry(lead).sdm);

        let mut sht = HashTable::new(1, 4);
        let m = sht.insert(&[1]);

        let mut rr = Vec::new();
        close_symbolic_table(&mut sht, &basis, &bht, &mut rr, None);
        assert!(rr.is_empty());
        assert_eq!(sht.state(m), ColumnState::NonPivot);
    }
}
