use f4gb_hash::{grevlex_cmp, ColumnState, HashId, HashTable};
use f4gb_matrix::Matrix;
use rayon::prelude::*;

/// The hash-to-column / column-to-hash bijection produced by a single call
/// to [`convert_hashes_to_columns`], plus the `A|B` split point `ncl`.
#[derive(Debug, Default)]
pub struct ColumnMap {
    col_to_hash: Vec<HashId>,
    hash_to_col: Vec<u32>,
}

const NO_COLUMN: u32 = u32::MAX;

impl ColumnMap {
    pub fn len(&self) -> usize {
        self.col_to_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.col_to_hash.is_empty()
    }

    pub fn hash_of(&self, col: u32) -> HashId {
        self.col_to_hash[col as usize]
    }

    pub fn column_of(&self, hash: HashId) -> u32 {
        let col = self.hash_to_col[hash as usize];
        debug_assert_ne!(col, NO_COLUMN, "hash id was never assigned a column");
        col
    }
}

/// Assigns every symbolic hash table entry a column index and rewrites
/// `mat.rr`/`mat.tr` in place from monomial hashes to those columns (spec
/// §4.3), producing the `A|B|C|D` block-structured matrix.
///
/// Grounded on `convert.c::convert_hashes_to_columns`: the `hcm` array
/// collects every entry `1..sht.eld()-1` (slot 0 is the reserved zero
/// exponent) and is sorted by a two-key comparator — known-pivot entries
/// before non-pivots, and within each group, decreasing monomial order —
/// then `hcm[k]`'s position `k` becomes its column. The original sorts by
/// monomial order alone and trusts that pivot leads are already the
/// largest monomials present; this port sorts pivots first explicitly so
/// the `A|B` split holds regardless of that assumption.
///
/// Row rewriting does not reorder a row's own monomials — only position 0
/// (the lead) matters, since reduction scatters into a dense accumulator
/// keyed by column — so it is embarrassingly parallel over rows.
pub fn convert_hashes_to_columns(mat: &mut Matrix, sht: &HashTable) -> ColumnMap {
    let eld = sht.eld();
    let mut hcm: Vec<HashId> = (1..eld as HashId).collect();
    hcm.sort_by(|&a, &b| {
        let pa = sht.state(a) == ColumnState::Pivot;
        let pb = sht.state(b) == ColumnState::Pivot;
        if pa != pb {
            if pa {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            }
        } else {
            grevlex_cmp(sht.exp(b), sht.exp(a))
        }
    });

    let ncl = hcm.iter().take_while(|&&id| sht.state(id) == ColumnState::Pivot).count();
    let ncr = hcm.len() - ncl;

    let mut hash_to_col = vec![NO_COLUMN; eld];
    for (col, &id) in hcm.iter().enumerate() {
        hash_to_col[id as usize] = col as u32;
    }
    let cols = ColumnMap {
        col_to_hash: hcm,
        hash_to_col,
    };

    mat.rr.par_iter_mut().for_each(|r| {
        for m in r.row.monomials.iter_mut() {
            *m = cols.column_of(*m);
        }
    });
    mat.tr.par_iter_mut().for_each(|row| {
        if let Some(r) = row {
            for m in r.monomials.iter_mut() {
                *m = cols.column_of(*m);
            }
        }
    });

    mat.nc = cols.len();
    mat.ncl = ncl;
    mat.ncr = ncr;

    cols
}

#[cfg(test)]
mod tests {
    use f4gb_matrix::{ReducerRow, Row};

    use super::*;

    #[test]
    fn pivot_columns_form_a_contiguous_left_block() {
        let mut sht = HashTable::new(2, 1);
        let pivot_lo = sht.insert(&[1, 0]);
        let pivot_hi = sht.insert(&[2, 0]);
        let non_pivot = sht.insert(&[0, 1]);
        sht.set_state(pivot_lo, ColumnState::Pivot);
        sht.set_state(pivot_hi, ColumnState::Pivot);
        sht.set_state(non_pivot, ColumnState::NonPivot);

        let mut mat = Matrix::new();
        mat.rr.push(ReducerRow {
            row: Row::new(vec![pivot_hi, non_pivot], vec![1, 1]),
            basis_row: 0,
        });

        let cols = convert_hashes_to_columns(&mut mat, &sht);
        assert_eq!(mat.ncl, 2);
        assert_eq!(mat.ncr, 1);
        assert!(cols.column_of(pivot_lo) < 2);
        assert!(cols.column_of(pivot_hi) < 2);
        assert_eq!(cols.column_of(non_pivot), 2);
    }

    #[test]
    fn rows_are_rewritten_to_columns_without_reordering() {
        let mut sht = HashTable::new(1, 2);
        let a = sht.insert(&[3]);
        let b = sht.insert(&[1]);
        sht.set_state(a, ColumnState::Pivot);

        let mut mat = Matrix::new();
        mat.rr.push(ReducerRow {
            row: Row::new(vec![a, b], vec![1, 5]),
            basis_row: 0,
        });
        let cols = convert_hashes_to_columns(&mut mat, &sht);

        assert_eq!(mat.rr[0].row.monomials[0], cols.column_of(a));
        assert_eq!(mat.rr[0].row.monomials[1], cols.column_of(b));
    }
}
