use f4gb_convert::{convert_hashes_to_columns, convert_sparse_matrix_rows_to_basis_elements, return_normal_forms_to_basis, ColumnMap};
use f4gb_hash::HashTable;
use f4gb_matrix::{Basis, Matrix, Row};
use f4gb_util::Stats;

/// Assigns columns for the current matrix step and rewrites its rows in
/// place, timing the phase into `stats.convert_ctime`.
pub fn convert_hashes_to_columns_timed(mat: &mut Matrix, sht: &HashTable, cfg_info_level: u8, stats: &mut Stats) -> ColumnMap {
    Stats::timed_phase(&mut stats.convert_ctime, "convert", cfg_info_level, || convert_hashes_to_columns(mat, sht))
}

/// Re-inserts a reduced matrix's to-be-reduced rows into the basis,
/// translating columns back to basis hash table monomials.
pub fn return_normal_forms_to_basis_timed(
    mat: &Matrix,
    basis: &mut Basis,
    bht: &mut HashTable,
    sht: &HashTable,
    cols: &ColumnMap,
    cfg_info_level: u8,
    stats: &mut Stats,
) {
    Stats::timed_phase(&mut stats.convert_ctime, "reinsert", cfg_info_level, || {
        return_normal_forms_to_basis(mat, basis, bht, sht, cols)
    })
}

/// Inserts an arbitrary column-indexed row set (e.g. the output of a full
/// interreduction pass) into the basis, returning their new basis indices.
pub fn convert_sparse_matrix_rows_to_basis_elements_timed(
    rows: &[Row],
    basis: &mut Basis,
    bht: &mut HashTable,
    sht: &HashTable,
    cols: &ColumnMap,
    cfg_info_level: u8,
    stats: &mut Stats,
) -> Vec<usize> {
    Stats::timed_phase(&mut stats.convert_ctime, "reinsert", cfg_info_level, || {
        convert_sparse_matrix_rows_to_basis_elements(rows, basis, bht, sht, cols)
    })
}
