use crate::benchmark::BenchmarkBackend;
use crate::correctness::CorrectnessSuite;
use crate::types::FitnessScore;
use crate::validator::StructuralValidator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Weighting of the normalized metrics in the fitness scalar.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitnessWeights {
    pub throughput: f64,
    pub latency: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            throughput: 0.7,
            latency: 0.3,
        }
    }
}

/// Benchmarks and scores one candidate kernel.
///
/// Stages run in cost order and short-circuit: structural validation, then
/// the performance benchmark, then the correctness suite. A failure at any
/// stage forces fitness to 0 with an explanatory error.
pub struct FitnessScorer {
    validator: StructuralValidator,
    suite: CorrectnessSuite,
    backend: Arc<dyn BenchmarkBackend>,
    weights: FitnessWeights,
    /// Normalization references: a candidate at these values scores 1.0 on
    /// the corresponding component.
    throughput_ref: f64,
    latency_ref_ms: f64,
}

impl FitnessScorer {
    pub fn new(backend: Arc<dyn BenchmarkBackend>) -> Self {
        Self {
            validator: StructuralValidator::new(),
            suite: CorrectnessSuite::kernel_default(),
            backend,
            weights: FitnessWeights::default(),
            throughput_ref: 2.0,
            latency_ref_ms: 5.0,
        }
    }

    pub fn with_validator(mut self, validator: StructuralValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_suite(mut self, suite: CorrectnessSuite) -> Self {
        self.suite = suite;
        self
    }

    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_references(mut self, throughput_ref: f64, latency_ref_ms: f64) -> Self {
        self.throughput_ref = throughput_ref;
        self.latency_ref_ms = latency_ref_ms;
        self
    }

    /// Score a candidate. Never panics and never errors: failures surface as
    /// a zero-fitness score with explanatory errors.
    pub async fn score(&self, candidate_id: &str, source: &str) -> FitnessScore {
        // (a) Static structure.
        let structural_errors = self.validator.validate(source);
        if !structural_errors.is_empty() {
            debug!(candidate_id, errors = structural_errors.len(), "structurally invalid");
            return FitnessScore::invalid(candidate_id, structural_errors);
        }

        // (b) Performance benchmark.
        let sample = match self.backend.run(source).await {
            Ok(sample) => sample,
            Err(e) => {
                return FitnessScore::invalid(candidate_id, vec![e.to_string()]);
            }
        };

        // (c) Correctness suite.
        let failures = self.suite.check(source);
        if !failures.is_empty() {
            return FitnessScore {
                candidate_id: candidate_id.to_string(),
                throughput: sample.throughput,
                latency_ms: sample.latency_ms,
                correct: false,
                fitness: 0.0,
                errors: failures,
            };
        }

        let norm_throughput = (sample.throughput / self.throughput_ref).min(1.0);
        let norm_latency = if sample.latency_ms > 0.0 {
            (self.latency_ref_ms / sample.latency_ms).min(1.0)
        } else {
            1.0
        };
        let fitness =
            self.weights.throughput * norm_throughput + self.weights.latency * norm_latency;

        FitnessScore {
            candidate_id: candidate_id.to_string(),
            throughput: sample.throughput,
            latency_ms: sample.latency_ms,
            correct: true,
            fitness,
            errors: Vec::new(),
        }
    }
}
