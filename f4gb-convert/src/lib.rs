//! Hash-to-column conversion and basis re-insertion: the
//! bridge between the symbolic hash table's monomial ids and the dense
//! column indices the row engine reduces against, and back.

pub mod columns;
pub mod reinsert;

pub use columns::{convert_hashes_to_columns, ColumnMap};
pub use reinsert::{convert_sparse_matrix_rows_to_basis_elements, return_normal_forms_to_basis};
