use f4gb_hash::{grevlex_cmp, ColumnState, Exponent, HashId, HashTable};
use f4gb_matrix::{multiply_basis_row, Basis, ReducerRow, Row};
use itertools::Itertools;

use crate::pair::Pair;

/// Selects the next batch of critical pairs to process, removing them from
/// `pairs` in place, and builds their multiplied matrix rows.
///
/// Grounded on `symbol.c::select_spairs_by_minimal_degree`:
/// 1. Sort all pairs by lcm degree; take the minimal-degree prefix.
/// 2. Re-sort that prefix by lcm monomial order, clustering equal lcms.
/// 3. Cap at `mnsel`, but never split an lcm class: if the cap falls
///    mid-class, extend to the end of that class.
/// 4. Within each lcm class, dedup the generator set; the first becomes a
///    reducer row (`rr`), the rest become to-be-reduced rows (`tr`). Both
///    are built by multiplying the generator's basis row by `lcm / lead`,
///    interning the multiplied monomials into `sht`.
///
/// `sht`'s entry for each selected lcm is marked [`ColumnState::Pivot`]
/// before the rows are built, the way `symbol.c` marks `sht->hd[...].idx = 2`
/// as soon as a pair's lcm is chosen as a reducer lead.
///
/// `tht` is `Some` only while a trace is being recorded; when
/// present, every produced row also records its generator and multiplier.
pub fn select_pairs(
    pairs: &mut Vec<Pair>,
    basis: &Basis,
    bht: &HashTable,
    sht: &mut HashTable,
    mut tht: Option<&mut HashTable>,
    mnsel: usize,
) -> (Vec<ReducerRow>, Vec<Row>) {
    if pairs.is_empty() {
        return (Vec::new(), Vec::new());
    }

    pairs.sort_by_key(|p| bht.entry(p.lcm).degree);
    let md = bht.entry(pairs[0].lcm).degree;
    let npd = pairs.iter().take_while(|p| bht.entry(p.lcm).degree == md).count();
    pairs[..npd].sort_by(|a, b| grevlex_cmp(bht.exp(a.lcm), bht.exp(b.lcm)));

    let nps = if npd > mnsel {
        let mut n = mnsel;
        let lcm = pairs[n - 1].lcm;
        while n < npd && pairs[n].lcm == lcm {
            n += 1;
        }
        n
    } else {
        npd
    };

    let selected: Vec<Pair> = pairs.drain(0..nps).collect();

    let mut rr = Vec::new();
    let mut tr = Vec::new();

    for (lcm, group) in &selected.into_iter().chunk_by(|p| p.lcm) {
        let mut gens: Vec<usize> = group.flat_map(|p| [p.gen1, p.gen2]).collect();
        gens.sort_unstable();
        gens.dedup();

        let lcm_col = sht.insert(bht.exp(lcm));
        sht.set_state(lcm_col, ColumnState::Pivot);

        for (i, &gen) in gens.iter().enumerate() {
            let row = multiplied_row(basis, gen, bht, sht, tht.as_deref_mut(), lcm);
            if i == 0 {
                rr.push(ReducerRow { row, basis_row: gen });
            } else {
                tr.push(row);
            }
        }
    }

    (rr, tr)
}

fn multiplied_row(
    basis: &Basis,
    gen: usize,
    bht: &HashTable,
    sht: &mut HashTable,
    tht: Option<&mut HashTable>,
    lcm: HashId,
) -> Row {
    let lead = basis
        .lead_monomial(gen)
        .expect("a basis generator referenced by a pair cannot be a null row");
    let lcm_exp = Exponent::new(bht.exp(lcm).to_vec());
    let mult_exp = lcm_exp
        .checked_sub(bht.exp(lead))
        .expect("a pair's lcm must be a multiple of its generator's lead monomial");
    let mult_hash = HashTable::diff_hash(bht.entry(lcm).hash, bht.entry(lead).hash);

    let mut row = multiply_basis_row(basis, gen, bht, sht, mult_exp.as_slice(), mult_hash);
    if let Some(tht) = tht {
        let mult_id = tht.insert(mult_exp.as_slice());
        row = row.with_trace(gen as u32, mult_id);
    }
    row
}
