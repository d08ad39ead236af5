/// Which row-engine strategy a matrix step runs.
///
/// `Application` carries the trace to replay: `bindex[i]` is the basis row
/// `tr[i]`'s pivot lead column is expected to come from (`None` if the
/// traced reduction found `tr[i]` reduced to zero), checked against what
/// the current prime actually produces — a mismatch is
/// [`f4gb_util::GbError::UnluckyPrime`].
#[derive(Debug, Clone)]
pub enum ReduceMode {
    Exact,
    Probabilistic,
    ExactSparseDense,
    ProbabilisticSparseDense,
    Trace,
    Application(Vec<Option<usize>>),
}

impl ReduceMode {
    pub fn is_probabilistic(&self) -> bool {
        matches!(self, ReduceMode::Probabilistic | ReduceMode::ProbabilisticSparseDense)
    }

    pub fn is_sparse_dense(&self) -> bool {
        matches!(self, ReduceMode::ExactSparseDense | ReduceMode::ProbabilisticSparseDense)
    }

    pub fn is_trace(&self) -> bool {
        matches!(self, ReduceMode::Trace)
    }
}
