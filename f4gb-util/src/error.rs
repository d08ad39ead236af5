use thiserror::Error;

/// Errors the F4 linear algebra core can report to its caller.
///
/// Only [`GbError::UnluckyPrime`] is expected to occur in ordinary use; the
/// remaining variants indicate misconfiguration or resource exhaustion and
/// are not meant to be routinely handled by callers.
#[derive(Debug, Error)]
pub enum GbError {
    /// An application-mode reduction produced a zero where the trace
    /// recorded at a different prime predicted a nonzero pivot. Non-fatal:
    /// the caller should retry the whole matrix step with a different
    /// prime.
    #[error("unlucky prime: row {row} expected a pivot at column {expected_pivot_col} but reduced to zero")]
    UnluckyPrime {
        row: usize,
        expected_pivot_col: usize,
    },

    /// The per-thread dense accumulator scratch space could not be
    /// allocated. Fatal to the current step; the basis is left untouched
    /// because no new rows were produced yet.
    #[error("failed to allocate {requested} entries of reduction scratch space")]
    ScratchAllocation { requested: usize },

    /// The configured prime does not fit the arithmetic regime that was
    /// about to be used. Indicates a bug in regime selection, not user
    /// error in the usual sense.
    #[error("prime {fc} does not fit the {regime} regime")]
    PrimeRegimeMismatch { fc: u32, regime: &'static str },

    /// A `Config` value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type GbResult<T> = Result<T, GbError>;
