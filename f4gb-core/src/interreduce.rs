use std::collections::HashMap;
use std::time::Instant;

use f4gb_field::Prime;
use f4gb_hash::{grevlex_cmp, HashId, HashTable};
use f4gb_matrix::{Basis, Row};
use f4gb_reduce::interreduce_rows;
use f4gb_util::{Config, Stats};

/// Fully interreduces the final basis: every monomial the basis mentions
/// gets a private column assigned by descending monomial order (the same
/// convention `f4gb-convert` uses for the known-pivot/non-pivot split), the
/// shared row-engine interreduction kernel runs over that column space,
/// and the result is translated back into a fresh basis over the same
/// basis hash table.
pub fn interreduce_matrix_rows(basis: &Basis, bht: &HashTable, prime: &Prime, cfg: &Config, stats: &mut Stats) -> Basis {
    let start = Instant::now();

    let mut ids: Vec<HashId> = Vec::new();
    for i in 0..basis.len() {
        ids.extend_from_slice(basis.monomials(i));
    }
    ids.sort_unstable();
    ids.dedup();
    ids.sort_by(|&a, &b| grevlex_cmp(bht.exp(b), bht.exp(a)));

    let col_of: HashMap<HashId, u32> = ids.iter().enumerate().map(|(c, &id)| (id, c as u32)).collect();
    let ncols = ids.len();

    let rows: Vec<Row> = (0..basis.len())
        .filter_map(|i| basis.row(i))
        .map(|r| {
            let cols: Vec<u32> = r.monomials.iter().map(|m| col_of[m]).collect();
            Row::new(cols, r.coeffs.clone())
        })
        .collect();

    let reduced = interreduce_rows(rows, ncols, prime);

    let mut out = Basis::new();
    for row in reduced {
        let monomials: Vec<HashId> = row.monomials.iter().map(|&c| ids[c as usize]).collect();
        let lead_sdm = bht.entry(monomials[0]).sdm;
        out.push(Row::new(monomials, row.coeffs), lead_sdm);
    }

    let elapsed = start.elapsed();
    stats.la_ctime += elapsed;
    if cfg.info_level() >= 2 {
        tracing::debug!(basis_len = out.len(), elapsed_us = elapsed.as_micros() as u64, "final interreduction complete");
    }
    out
}
