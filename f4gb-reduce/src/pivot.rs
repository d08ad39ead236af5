use std::sync::{Arc, OnceLock};

use f4gb_matrix::Row;

/// A published pivot row, tagged with which of the matrix step's original
/// known reducers (`mat.rr`) it came from — `None` if it was discovered
/// during this reduction phase rather than seeded from `rr`.
///
/// The tag is what lets trace recording mark `rba[i]`'s bit
/// only for contributions from the `nru` original reducers, not from
/// pivots other to-be-reduced rows happened to publish first.
#[derive(Debug)]
pub struct Pivot {
    pub row: Row,
    pub reducer_id: Option<usize>,
}

/// The concurrently-published pivot array `pivs[0..ncols]`.
///
/// Grounded on `la_ff_32.c`'s CAS loop over `pivs[col]`, ported to safe Rust
/// as `Vec<OnceLock<Arc<Pivot>>>`: the first writer at a column wins with no
/// lock ever held across a retry, and a CAS loser observes the winner via
/// an ordinary `get()` on the same slot.
pub struct PivotTable {
    slots: Vec<OnceLock<Arc<Pivot>>>,
}

impl PivotTable {
    pub fn new(ncols: usize) -> Self {
        PivotTable {
            slots: (0..ncols).map(|_| OnceLock::new()).collect(),
        }
    }

    pub fn get(&self, col: usize) -> Option<&Arc<Pivot>> {
        self.slots[col].get()
    }

    /// Seeds a slot before any concurrent access begins (used to install
    /// the matrix step's known reducers). Not for use once reduction
    /// workers have started.
    pub fn seed(&self, col: usize, pivot: Arc<Pivot>) {
        let _ = self.slots[col].set(pivot);
    }

    /// Attempts to publish `pivot` at `col`. `Ok(())` means this caller won;
    /// `Err(winner)` means another worker published first, and the caller
    /// must retry its reduction using `winner`.
    pub fn try_publish(&self, col: usize, pivot: Arc<Pivot>) -> Result<(), Arc<Pivot>> {
        match self.slots[col].set(pivot) {
            Ok(()) => Ok(()),
            Err(_rejected) => Err(self.slots[col]
                .get()
                .expect("a slot that rejected a `set` must already hold the winner")
                .clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_publish_wins() {
        let pivs = PivotTable::new(4);
        let a = Arc::new(Pivot {
            row: Row::new(vec![2], vec![1]),
            reducer_id: None,
        });
        assert!(pivs.try_publish(2, a.clone()).is_ok());
        assert!(Arc::ptr_eq(pivs.get(2).unwrap(), &a));
    }

    #[test]
    fn loser_observes_the_winner() {
        let pivs = PivotTable::new(4);
        let winner = Arc::new(Pivot {
            row: Row::new(vec![1], vec![1]),
            reducer_id: Some(0),
        });
        pivs.seed(1, winner.clone());

        let loser = Arc::new(Pivot {
            row: Row::new(vec![1], vec![1]),
            reducer_id: None,
        });
        let err = pivs.try_publish(1, loser).unwrap_err();
        assert!(Arc::ptr_eq(&err, &winner));
    }
}
