use crate::error::FitnessError;
use async_trait::async_trait;

/// One benchmark observation for a candidate kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkSample {
    /// Primary metric, higher is better.
    pub throughput: f64,
    /// Secondary metric in milliseconds, lower is better.
    pub latency_ms: f64,
}

/// Measurement strategy for candidate kernels.
///
/// Contract: given candidate source text, return one `BenchmarkSample`
/// (throughput, latency) for it, or an error if the measurement itself could
/// not run. Implementations must be side-effect free with respect to each
/// other: the optimizer scores a whole generation concurrently and assumes no
/// shared mutable state between calls. A real measurement backend (device
/// dispatch, timing harness) slots in here without touching the generational
/// loop.
#[async_trait]
pub trait BenchmarkBackend: Send + Sync {
    async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError>;
}

/// Deterministic benchmark model for tests and simulation.
///
/// Starts from a base sample and grants a fixed relative bonus for each
/// recognized optimization feature present in the source, mirroring how the
/// tuned kernels actually behave on hardware.
pub struct SimulatedBenchmark {
    base: BenchmarkSample,
    /// (source fragment, relative throughput gain) pairs.
    feature_bonuses: Vec<(String, f64)>,
}

impl SimulatedBenchmark {
    pub fn new(base_throughput: f64, base_latency_ms: f64) -> Self {
        Self {
            base: BenchmarkSample {
                throughput: base_throughput,
                latency_ms: base_latency_ms,
            },
            feature_bonuses: vec![
                ("@workgroup_size(256".into(), 0.12),
                ("vec4<f32>".into(), 0.10),
                ("i = i + 4u".into(), 0.06),
                ("fma(".into(), 0.05),
                ("let scale = params.scale;".into(), 0.03),
                ("i * stride + row".into(), 0.08),
            ],
        }
    }

    pub fn with_feature_bonus(mut self, fragment: impl Into<String>, gain: f64) -> Self {
        self.feature_bonuses.push((fragment.into(), gain));
        self
    }
}

#[async_trait]
impl BenchmarkBackend for SimulatedBenchmark {
    async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError> {
        let gain: f64 = self
            .feature_bonuses
            .iter()
            .filter(|(fragment, _)| source.contains(fragment.as_str()))
            .map(|(_, g)| g)
            .sum();
        Ok(BenchmarkSample {
            throughput: self.base.throughput * (1.0 + gain),
            latency_ms: self.base.latency_ms / (1.0 + gain),
        })
    }
}
