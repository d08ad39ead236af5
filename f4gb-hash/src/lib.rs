//! Monomial interning and the three hash tables of the F4 core.
//!
//! [`HashTable`] is used for all three roles: the basis hash
//! table `bht` (stable across steps), the symbolic hash table `sht` (reset
//! every step), and the trace hash table `tht` (records multipliers). They
//! share the same type because they share the same operation: intern an
//! exponent vector, get back a stable id plus its cached degree/sdm/hash.

pub mod exponent;
pub mod order;
pub mod table;

pub use exponent::Exponent;
pub use order::grevlex_cmp;
pub use table::{ColumnState, HashId, HashTable, MonomialEntry};

/// The trace hash table (`tht`) is just a [`HashTable`] used to intern
/// multiplier monomials; no extra structure is needed beyond the ids it
/// hands back, which [`crate`] callers store as `MULT` on a row.
pub type TraceHashTable = HashTable;
