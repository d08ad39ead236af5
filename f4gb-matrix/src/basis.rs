use crate::row::Row;

/// The append-only Gröbner basis. `lead_masks[i]` caches
/// the short divisibility mask of basis element `i`'s lead monomial, read
/// from the basis hash table at insertion time, so symbolic preprocessing's
/// divisor search (`f4gb-symbolic`) never has to touch `bht` itself.
///
/// A `None` row denotes a to-be-reduced row that reduced to zero and was
/// still appended to keep `lmps` aligned with basis positions (mirroring
/// `convert.c::return_normal_forms_to_basis`, which stores a `NULL` `hm`/
/// `cf` pair for those slots rather than skipping them).
#[derive(Debug, Default)]
pub struct Basis {
    rows: Vec<Option<Row>>,
    lead_masks: Vec<u32>,
}

impl Basis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a nonzero basis element with the sdm mask of its lead
    /// monomial, returning its index.
    pub fn push(&mut self, row: Row, lead_sdm: u32) -> usize {
        let idx = self.rows.len();
        self.rows.push(Some(row));
        self.lead_masks.push(lead_sdm);
        idx
    }

    /// Appends a placeholder for a to-be-reduced row that vanished to zero.
    pub fn push_null(&mut self) -> usize {
        let idx = self.rows.len();
        self.rows.push(None);
        self.lead_masks.push(0);
        idx
    }

    pub fn row(&self, i: usize) -> Option<&Row> {
        self.rows[i].as_ref()
    }

    pub fn coeffs(&self, i: usize) -> &[u32] {
        self.rows[i]
            .as_ref()
            .map(|r| r.coeffs.as_slice())
            .unwrap_or(&[])
    }

    pub fn monomials(&self, i: usize) -> &[u32] {
        self.rows[i]
            .as_ref()
            .map(|r| r.monomials.as_slice())
            .unwrap_or(&[])
    }

    pub fn lead_monomial(&self, i: usize) -> Option<u32> {
        self.rows[i].as_ref().and_then(|r| r.lead())
    }

    pub fn lead_mask(&self, i: usize) -> u32 {
        self.lead_masks[i]
    }

    /// Iterates `(basis_index, lead_sdm)` for every nonzero basis element,
    /// in append order — exactly the `lmps`/`lm` arrays `find_multiplied_reducer`
    /// scans in `symbol.c`.
    pub fn leads(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.rows.iter().enumerate().filter_map(move |(i, row)| {
            if row.is_some() {
                Some((i, self.lead_masks[i]))
            } else {
                None
            }
        })
    }
}
