/// Errors from fitness evaluation.
#[derive(Debug, thiserror::Error)]
pub enum FitnessError {
    #[error("benchmark failed: {0}")]
    Benchmark(String),
    #[error("benchmark timed out after {0} ms")]
    Timeout(u64),
}
