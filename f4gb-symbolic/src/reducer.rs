use f4gb_hash::{ColumnState, Exponent, HashId, HashTable};
use f4gb_matrix::{multiply_basis_row, Basis, ReducerRow};

/// Finds the first basis element whose lead divides monomial `m`, and if
/// one exists, builds the multiplied reducer row for it.
///
/// Grounded on `symbol.c::find_multiplied_reducer`: basis leads are scanned
/// in append order; a short-divisibility-mask test rejects most
/// non-divisors in O(1) (`lead_sdm & !m_sdm != 0`), a degree check rejects
/// the rest cheaply, and the exact exponent subtraction (which can still
/// fail — the mask test has false positives) is only attempted for
/// survivors of both.
pub fn find_multiplied_reducer(
    m: HashId,
    basis: &Basis,
    bht: &HashTable,
    sht: &mut HashTable,
    mut tht: Option<&mut HashTable>,
) -> Option<ReducerRow> {
    let m_entry = sht.entry(m);
    let m_sdm = m_entry.sdm;
    let m_deg = m_entry.degree;
    let m_exp = Exponent::new(sht.exp(m).to_vec());

    for (gen, lead_sdm) in basis.leads() {
        if lead_sdm & !m_sdm != 0 {
            continue;
        }
        let lead = basis.lead_monomial(gen).expect("leads() only yields nonzero rows");
        let lead_entry = bht.entry(lead);
        if m_deg - lead_entry.degree < 0 {
            continue;
        }
        let Some(mult_exp) = m_exp.checked_sub(&lead_entry.exp) else {
            continue;
        };
        let mult_hash = HashTable::diff_hash(m_entry.hash, lead_entry.hash);
        let mut row = multiply_basis_row(basis, gen, bht, sht, mult_exp.as_slice(), mult_hash);
        if let Some(tht) = tht.as_deref_mut() {
            let mult_id = tht.insert(mult_exp.as_slice());
            row = row.with_trace(gen as u32, mult_id);
        }
        sht.set_state(m, ColumnState::Pivot);
        return Some(ReducerRow { row, basis_row: gen });
    }
    None
}
