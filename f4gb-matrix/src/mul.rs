use f4gb_hash::HashTable;

use crate::basis::Basis;
use crate::row::Row;

/// Builds the matrix row obtained by multiplying basis element `gen` by
/// the monomial `mult_exp` (whose linear hash is `mult_hash`), interning
/// every resulting monomial into `sht`. This is `multiplied_poly_to_matrix_row`
/// from `symbol.c`/`convert.c`: both pair selection (`f4gb-pairs`) and
/// symbolic preprocessing (`f4gb-symbolic`) build rows this way.
///
/// Monomial order is preserved: `gen`'s term order in `bht` already has the
/// lead first, and multiplying every term by the same fixed monomial keeps
/// that order under any admissible monomial order, so `row.monomials[0]`
/// is again the row's lead after multiplication.
pub fn multiply_basis_row(
    basis: &Basis,
    gen: usize,
    bht: &HashTable,
    sht: &mut HashTable,
    mult_exp: &[i32],
    mult_hash: u32,
) -> Row {
    let gen_monomials = basis.monomials(gen);
    let gen_coeffs = basis.coeffs(gen);
    let mut monomials = Vec::with_capacity(gen_monomials.len());
    for &m in gen_monomials {
        let entry = bht.entry(m);
        let mut new_exp: Vec<i32> = entry.exp.to_vec();
        for (a, b) in new_exp.iter_mut().zip(mult_exp) {
            *a += b;
        }
        let id = sht.insert(&new_exp);
        debug_assert_eq!(
            HashTable::combine_hash(entry.hash, mult_hash),
            sht.entry(id).hash,
            "linear hash must agree with the freshly interned monomial's hash"
        );
        monomials.push(id);
    }
    Row::new(monomials, gen_coeffs.to_vec())
}
