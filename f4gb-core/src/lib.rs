//! Orchestration for the F4 linear algebra core.
//!
//! This crate wires the building blocks defined by its sibling crates —
//! pair selection ([`f4gb_pairs`]), symbolic preprocessing
//! ([`f4gb_symbolic`]), hash→column conversion and basis re-insertion
//! ([`f4gb_convert`]), and the row engine ([`f4gb_reduce`]) — into the
//! external interface a driver calls once per degree step: build a matrix
//! from the current basis and pair set, convert it to column form, reduce
//! it, and fold whatever new pivots came out back into the basis.
//!
//! Every public function here corresponds to one of the core's external
//! interfaces; none of them contain algorithmic logic of their own beyond
//! sequencing calls and accumulating [`f4gb_util::Stats`].

pub mod build;
pub mod convert;
pub mod interreduce;
pub mod reduce;
pub mod trace;

pub use build::build_matrix;
pub use convert::{
    convert_hashes_to_columns_timed as convert_hashes_to_columns,
    convert_sparse_matrix_rows_to_basis_elements_timed as convert_sparse_matrix_rows_to_basis_elements,
    return_normal_forms_to_basis_timed as return_normal_forms_to_basis,
};
pub use interreduce::interreduce_matrix_rows;
pub use reduce::reduce;
pub use trace::{capture as capture_trace, Trace};

#[cfg(test)]
mod tests {
    use super::*;
    use f4gb_field::Prime;
    use f4gb_hash::HashTable;
    use f4gb_matrix::{Basis, Row};
    use f4gb_pairs::Pair;
    use f4gb_reduce::ReduceMode;
    use f4gb_util::{Config, FieldWidth, Stats};

    fn cfg() -> Config {
        Config::new(1, 101, 0, 10, 1024, FieldWidth::ThirtyTwo).unwrap()
    }

    /// End-to-end run of spec scenario S1: `{x^2-1, xy-1}` over `p=101`
    /// produces one new pivot once the step is built, converted and
    /// reduced, and that pivot survives re-insertion into the basis.
    #[test]
    fn a_full_step_builds_converts_reduces_and_reinserts_one_new_pivot() {
        let mut bht = HashTable::new(2, 1);
        let mut basis = Basis::new();
        let f_lead = bht.insert(&[2, 0]);
        let f_tail = bht.insert(&[0, 0]);
        basis.push(Row::new(vec![f_lead, f_tail], vec![1, 100]), bht.entry(f_lead).sdm);
        let g_lead = bht.insert(&[1, 1]);
        let g_tail = bht.insert(&[0, 0]);
        basis.push(Row::new(vec![g_lead, g_tail], vec![1, 100]), bht.entry(g_lead).sdm);

        let lcm = bht.insert(&[2, 1]);
        let mut pairs = vec![Pair::new(lcm, 0, 1)];
        let mut sht = HashTable::new(2, 2);
        let mut stats = Stats::new();
        let cfg = cfg();

        let mut mat = build_matrix(&mut pairs, &basis, &bht, &mut sht, None, &cfg, &mut stats);
        let cols = convert_hashes_to_columns(&mut mat, &sht, cfg.info_level(), &mut stats);

        let p = Prime::new(101).unwrap();
        reduce(&mut mat, &p, &cfg, &mut stats, &ReduceMode::Exact, 0).unwrap();
        assert_eq!(mat.np, 1);

        let basis_len_before = basis.len();
        return_normal_forms_to_basis(&mat, &mut basis, &mut bht, &sht, &cols, cfg.info_level(), &mut stats);
        assert_eq!(basis.len(), basis_len_before + 1);
    }
}
