use hashbrown::HashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A stable index into a [`HashTable`]. Index `0` is reserved for the zero
/// exponent vector and never denotes a real matrix column.
pub type HashId = u32;

/// State of a symbolic hash table entry during a single matrix step
/// `Absent` before the entry has been visited by symbolic
/// preprocessing, `NonPivot` once visited with no reducer found yet,
/// `Pivot` once a reducer row leads with this monomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnState {
    Absent,
    NonPivot,
    Pivot,
}

#[derive(Debug, Clone)]
pub struct MonomialEntry {
    pub exp: Box<[i32]>,
    pub degree: i32,
    pub sdm: u32,
    pub hash: u32,
}

/// Interning table for exponent vectors, playing the role of `bht`, `sht`,
/// or `tht` depending on how the caller uses it. The hash is
/// linear over monomial exponents (`hash(a·b) = hash(a) + hash(b)`),
/// computed as a fixed random per-variable weight vector dotted with the
/// exponent, wrapping on overflow.
#[derive(Debug, Clone)]
pub struct HashTable {
    rvec: Box<[u32]>,
    entries: Vec<MonomialEntry>,
    states: Vec<ColumnState>,
    index: HashMap<Box<[i32]>, HashId>,
}

impl HashTable {
    pub fn new(nv: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rvec: Box<[u32]> = (0..nv).map(|_| rng.random::<u32>() | 1).collect();
        let mut table = HashTable {
            rvec,
            entries: Vec::new(),
            states: Vec::new(),
            index: HashMap::new(),
        };
        // Reserve slot 0 for the zero exponent; no real column ever uses it.
        let zero = vec![0i32; nv];
        table.insert_raw(&zero);
        table
    }

    pub fn nv(&self) -> usize {
        self.rvec.len()
    }

    /// Number of interned entries, including the reserved zero slot at 0.
    pub fn eld(&self) -> usize {
        self.entries.len()
    }

    fn hash_of(&self, exp: &[i32]) -> u32 {
        exp.iter()
            .zip(self.rvec.iter())
            .fold(0u32, |acc, (&e, &r)| acc.wrapping_add((e as u32).wrapping_mul(r)))
    }

    fn sdm_of(&self, exp: &[i32]) -> u32 {
        let mut mask = 0u32;
        for (i, &e) in exp.iter().enumerate() {
            if e > 0 {
                mask |= 1u32 << (i % 32);
            }
        }
        mask
    }

    /// Interns `exp`, returning its stable id. Idempotent: inserting the
    /// same exponent vector twice returns the same id.
    pub fn insert(&mut self, exp: &[i32]) -> HashId {
        if let Some(&id) = self.index.get(exp) {
            return id;
        }
        self.insert_raw(exp)
    }

    fn insert_raw(&mut self, exp: &[i32]) -> HashId {
        let id = self.entries.len() as HashId;
        let degree = exp.iter().sum();
        let sdm = self.sdm_of(exp);
        let hash = self.hash_of(exp);
        let boxed: Box<[i32]> = exp.into();
        self.entries.push(MonomialEntry {
            exp: boxed.clone(),
            degree,
            sdm,
            hash,
        });
        self.states.push(ColumnState::Absent);
        self.index.insert(boxed, id);
        id
    }

    pub fn entry(&self, id: HashId) -> &MonomialEntry {
        &self.entries[id as usize]
    }

    pub fn exp(&self, id: HashId) -> &[i32] {
        &self.entries[id as usize].exp
    }

    pub fn state(&self, id: HashId) -> ColumnState {
        self.states[id as usize]
    }

    pub fn set_state(&mut self, id: HashId, state: ColumnState) {
        self.states[id as usize] = state;
    }

    /// `hash(a·b) = hash(a) + hash(b)`, exploiting linearity instead of
    /// re-hashing the combined exponent vector.
    pub fn combine_hash(h1: u32, h2: u32) -> u32 {
        h1.wrapping_add(h2)
    }

    /// `hash(a/b) = hash(a) - hash(b)`.
    pub fn diff_hash(h1: u32, h2: u32) -> u32 {
        h1.wrapping_sub(h2)
    }

    /// Resets the table to only the reserved zero slot, keeping the random
    /// hash-weight vector. Used to recreate the symbolic hash table at the
    /// start of every step.
    pub fn reset(&mut self) {
        self.entries.truncate(1);
        self.states.truncate(1);
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut t = HashTable::new(3, 7);
        let a = t.insert(&[1, 0, 2]);
        let b = t.insert(&[1, 0, 2]);
        assert_eq!(a, b);
        assert_eq!(t.eld(), 2);
    }

    #[test]
    fn distinct_exponents_get_distinct_ids() {
        let mut t = HashTable::new(2, 1);
        let a = t.insert(&[1, 0]);
        let b = t.insert(&[0, 1]);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_linear_over_products() {
        let mut t = HashTable::new(3, 42);
        let a = t.insert(&[2, 1, 0]);
        let b = t.insert(&[0, 1, 3]);
        let ab = t.insert(&[2, 2, 3]);
        let combined = HashTable::combine_hash(t.entry(a).hash, t.entry(b).hash);
        assert_eq!(combined, t.entry(ab).hash);
    }

    #[test]
    fn reset_drops_everything_but_the_zero_slot() {
        let mut t = HashTable::new(2, 3);
        t.insert(&[1, 1]);
        t.insert(&[2, 0]);
        assert_eq!(t.eld(), 3);
        t.reset();
        assert_eq!(t.eld(), 1);
        // re-inserting after reset works and does not collide with stale ids
        let id = t.insert(&[1, 1]);
        assert_eq!(id, 1);
    }

    #[test]
    fn sdm_has_one_bit_per_present_variable_modulo_32() {
        let mut t = HashTable::new(3, 9);
        let id = t.insert(&[1, 0, 5]);
        assert_eq!(t.entry(id).sdm, 0b101);
    }
}
