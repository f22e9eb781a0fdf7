//! Property: a candidate that fails correctness always has fitness exactly
//! 0.0 and is never selected as champion while a correct candidate exists.

use async_trait::async_trait;
use evod_fitness::{
    BenchmarkBackend, BenchmarkSample, CorrectnessSuite, FitnessError, FitnessScorer,
};
use evod_mutation::{MutationEngine, MutationOperator};
use evod_tectonic::{TectonicConfig, TectonicOptimizer, TriggerReason};
use proptest::prelude::*;
use std::sync::Arc;

const KERNEL: &str = "@compute @workgroup_size(64)\n\
    fn main(@builtin(global_invocation_id) gid: vec3<u32>) {\n\
    \x20   var acc: f32 = 0.0;\n\
    \x20   for (var i: u32 = 0u; i < n; i = i + 1u) {\n\
    \x20       acc = acc + a * b;\n\
    \x20   }\n\
    \x20   out[row * stride + i] = acc;\n\
    }\n";

const POISONED_MARKER: &str = "// tuned: widen-workgroup";

/// Flattering metrics for everything, but any kernel carrying the poisoned
/// marker fails its launch. Incorrect candidates must still score 0.0.
struct PoisonedBenchmark;

#[async_trait]
impl BenchmarkBackend for PoisonedBenchmark {
    async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError> {
        if source.contains(POISONED_MARKER) {
            return Err(FitnessError::Benchmark("kernel failed to launch".into()));
        }
        let throughput = if source.contains("// tuned:") { 10.0 } else { 1.0 };
        Ok(BenchmarkSample {
            throughput,
            latency_ms: 5.0,
        })
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn failed_correctness_means_zero_fitness(seed in any::<u64>()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            // The suite demands a procedure no mutation can introduce.
            let suite = CorrectnessSuite::new(vec!["fn main".into(), "fn reduce_partial".into()]);
            let scorer = FitnessScorer::new(Arc::new(PoisonedBenchmark)).with_suite(suite);
            let engine = MutationEngine::seeded(seed);

            for candidate in engine.generate(KERNEL, 6) {
                let score = scorer.score(&candidate.id, &candidate.source).await;
                prop_assert!(!score.correct);
                prop_assert_eq!(score.fitness, 0.0);
            }
            Ok(())
        })?;
    }

    #[test]
    fn champion_is_never_a_zero_fitness_candidate(seed in any::<u64>()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let scorer = FitnessScorer::new(Arc::new(PoisonedBenchmark));
            let config = TectonicConfig::default()
                .with_generations(3)
                .with_population_size(6)
                .with_target_improvement(100.0);
            let mut optimizer = TectonicOptimizer::new(
                config,
                MutationEngine::seeded(seed),
                scorer,
                KERNEL,
            );
            let result = optimizer.run(TriggerReason::Manual).await.unwrap();

            // The champion never carries the poisoned operator: that variant
            // always scores 0.0, however flattering its would-be metrics.
            if let Some(source) = &result.best_source {
                prop_assert!(!source.contains(POISONED_MARKER));
            }
            for value in &result.champion_trace {
                prop_assert!(*value > 0.0);
            }
            Ok(())
        })?;
    }

    #[test]
    fn all_invalid_generation_leaves_baseline_champion(seed in any::<u64>()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            struct RejectAllMutants;
            #[async_trait]
            impl BenchmarkBackend for RejectAllMutants {
                async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError> {
                    if source.contains("// tuned:") {
                        return Err(FitnessError::Benchmark("no device".into()));
                    }
                    Ok(BenchmarkSample { throughput: 1.0, latency_ms: 10.0 })
                }
            }
            let scorer = FitnessScorer::new(Arc::new(RejectAllMutants));
            let config = TectonicConfig::default()
                .with_generations(2)
                .with_population_size(4);
            let mut optimizer = TectonicOptimizer::new(
                config,
                MutationEngine::seeded(seed),
                scorer,
                KERNEL,
            );
            let result = optimizer.run(TriggerReason::Manual).await.unwrap();

            prop_assert!(!result.success);
            prop_assert_eq!(result.improvement, 0.0);
            prop_assert!(result.best_candidate_id.is_none());
            prop_assert_eq!(optimizer.kernel(), KERNEL);
            Ok(())
        })?;
    }

    #[test]
    fn baseline_trace_is_flat_when_nothing_is_adoptable(seed in any::<u64>()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            // All operators poisoned: the champion trace stays at the
            // baseline fitness for every generation.
            let mut scorer_backend = SimulatedRejectingAll::default();
            scorer_backend.markers = MutationOperator::all()
                .iter()
                .map(|op| op.marker().to_string())
                .collect();
            let scorer = FitnessScorer::new(Arc::new(scorer_backend));
            let config = TectonicConfig::default()
                .with_generations(3)
                .with_population_size(3);
            let mut optimizer = TectonicOptimizer::new(
                config,
                MutationEngine::seeded(seed),
                scorer,
                KERNEL,
            );
            let result = optimizer.run(TriggerReason::Manual).await.unwrap();
            let first = result.champion_trace.first().copied().unwrap_or(0.0);
            for value in &result.champion_trace {
                prop_assert!((value - first).abs() < 1e-12);
            }
            Ok(())
        })?;
    }
}

#[derive(Default)]
struct SimulatedRejectingAll {
    markers: Vec<String>,
}

#[async_trait]
impl BenchmarkBackend for SimulatedRejectingAll {
    async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError> {
        if self.markers.iter().any(|m| source.contains(m.as_str())) {
            return Err(FitnessError::Benchmark("rejected".into()));
        }
        Ok(BenchmarkSample {
            throughput: 1.0,
            latency_ms: 10.0,
        })
    }
}
