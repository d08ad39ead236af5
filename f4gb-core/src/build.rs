use f4gb_hash::HashTable;
use f4gb_matrix::{Basis, Matrix};
use f4gb_pairs::{select_pairs, Pair};
use f4gb_symbolic::close_symbolic_table;
use f4gb_util::{Config, Stats};
use std::time::Instant;

/// Selects the
/// next batch of critical pairs, multiplies them into reducer/to-be-reduced
/// rows, then closes the symbolic hash table's column support so every
/// monomial appearing in the matrix either has a reducer or a confirmed
/// absence of one.
///
/// `tht` is `Some` only while a trace is being recorded; the
/// caller decides this once per step, before `pairs` is consumed.
pub fn build_matrix(
    pairs: &mut Vec<Pair>,
    basis: &Basis,
    bht: &HashTable,
    sht: &mut HashTable,
    mut tht: Option<&mut HashTable>,
    cfg: &Config,
    stats: &mut Stats,
) -> Matrix {
    let select_start = Instant::now();
    let (rr, tr) = select_pairs(pairs, basis, bht, sht, tht.as_deref_mut(), cfg.mnsel());
    stats.select_ctime += select_start.elapsed();

    let mut mat = Matrix::new();
    stats.num_pairsred += tr.len() as u64;
    mat.rr = rr;
    mat.tr = tr.into_iter().map(Some).collect();
    mat.nrl = mat.tr.len();

    let symbol_start = Instant::now();
    close_symbolic_table(sht, basis, bht, &mut mat.rr, tht);
    stats.symbol_ctime += symbol_start.elapsed();

    mat.nru = mat.rr.len();
    stats.note_sht_size(sht.eld());

    if cfg.info_level() >= 2 {
        tracing::debug!(
            nru = mat.nru,
            nrl = mat.nrl,
            sht_size = sht.eld(),
            "symbolic preprocessing complete"
        );
    }

    mat
}
