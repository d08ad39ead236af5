use f4gb_hash::HashTable;
use f4gb_matrix::{Basis, Matrix, Row};

use crate::columns::ColumnMap;

fn insert_row_into_basis(
    row: &Row,
    basis: &mut Basis,
    bht: &mut HashTable,
    sht: &HashTable,
    cols: &ColumnMap,
) -> usize {
    let monomials: Vec<u32> = row
        .monomials
        .iter()
        .map(|&col| bht.insert(sht.exp(cols.hash_of(col))))
        .collect();
    let lead_sdm = sht.entry(cols.hash_of(row.monomials[0])).sdm;
    let mut new_row = Row::new(monomials, row.coeffs.clone());
    new_row.bindex = row.bindex;
    new_row.mult = row.mult;
    basis.push(new_row, lead_sdm)
}

/// Re-inserts the matrix's to-be-reduced rows (now holding the new pivots
/// reduction found, with `None` where a row reduced to zero) into the
/// basis hash table and appends them to `basis`.
///
/// Grounded on `convert.c::return_normal_forms_to_basis`: a zero row still
/// gets a slot in the basis (via [`Basis::push_null`]) so that `lmps`/basis
/// positions stay aligned with `mat.tr`'s original indexing, exactly as the
/// original stores a `NULL` `hm`/`cf` pair rather than skipping the index.
pub fn return_normal_forms_to_basis(mat: &Matrix, basis: &mut Basis, bht: &mut HashTable, sht: &HashTable, cols: &ColumnMap) {
    for row in &mat.tr {
        match row {
            Some(r) => {
                insert_row_into_basis(r, basis, bht, sht, cols);
            }
            None => {
                basis.push_null();
            }
        }
    }
}

/// Inserts an arbitrary set of (already column-indexed) rows into the
/// basis, returning their new basis indices. Shares `return_normal_forms_to_basis`'s
/// column-to-monomial translation but takes a plain row slice rather than
/// a matrix's `tr`, so it can also be used to land the output of a full
/// interreduction pass (the whole-basis `interreduce_matrix_rows`) back into the
/// basis. Grounded on the same `convert.c` insertion logic, generalized
/// away from the 8/16/32-bit coefficient-width switch the original made —
/// this crate carries only the 32-bit-prime row engine.
pub fn convert_sparse_matrix_rows_to_basis_elements(
    rows: &[Row],
    basis: &mut Basis,
    bht: &mut HashTable,
    sht: &HashTable,
    cols: &ColumnMap,
) -> Vec<usize> {
    rows.iter().map(|r| insert_row_into_basis(r, basis, bht, sht, cols)).collect()
}
