//! The `Row`/`Matrix`/`Basis` data model of the F4 core.

pub mod basis;
pub mod matrix;
pub mod mul;
pub mod row;

pub use basis::Basis;
pub use matrix::Matrix;
pub use mul::multiply_basis_row;
pub use row::{ReducerRow, Row};
