//! End-to-end: the generational optimizer stops early once the target
//! improvement is reached, and tolerates generations with no valid candidate.

use async_trait::async_trait;
use evod_fitness::{
    BenchmarkBackend, BenchmarkSample, FitnessError, FitnessScorer, SimulatedBenchmark,
};
use evod_mutation::MutationEngine;
use evod_tectonic::{TectonicConfig, TectonicOptimizer, TriggerReason};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const KERNEL: &str = "@compute @workgroup_size(64)\n\
    fn main(@builtin(global_invocation_id) gid: vec3<u32>) {\n\
    \x20   var acc: f32 = 0.0;\n\
    \x20   for (var i: u32 = 0u; i < n; i = i + 1u) {\n\
    \x20       acc = acc + a * b;\n\
    \x20   }\n\
    \x20   out[row * stride + i] = acc;\n\
    }\n";

/// Benchmark whose observations are scripted by call order: the baseline
/// measures 0.50, the first generation plateaus at 0.52, and every later
/// candidate reaches 0.615.
struct ScriptedBenchmark {
    calls: AtomicUsize,
    population: usize,
}

#[async_trait]
impl BenchmarkBackend for ScriptedBenchmark {
    async fn run(&self, _source: &str) -> Result<BenchmarkSample, FitnessError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let throughput = if call == 0 {
            0.50
        } else if call <= self.population {
            0.52
        } else {
            0.615
        };
        Ok(BenchmarkSample {
            throughput,
            latency_ms: 10.0,
        })
    }
}

#[tokio::test]
async fn early_stop_once_target_improvement_reached() {
    let population = 5;
    let config = TectonicConfig::default()
        .with_generations(3)
        .with_population_size(population)
        .with_target_improvement(0.20);
    let scorer = FitnessScorer::new(Arc::new(ScriptedBenchmark {
        calls: AtomicUsize::new(0),
        population,
    }));
    let mut optimizer =
        TectonicOptimizer::new(config, MutationEngine::seeded(11), scorer, KERNEL);

    let result = optimizer
        .run(TriggerReason::Degradation {
            current_metric: 0.45,
        })
        .await
        .unwrap();

    assert!(result.success);
    // Generation 1 reached 4% improvement, generation 2 reached 23% and the
    // loop stopped; generation 3 was never scored.
    assert_eq!(result.generations_run, 2);
    assert_eq!(result.champion_trace.len(), 2);
    assert_eq!(result.baseline_metric, 0.50);
    assert_eq!(result.final_metric, 0.615);
    assert!((result.improvement - 0.23).abs() < 1e-9);
    assert!(result.best_candidate_id.is_some());
}

/// Benchmark that fails for every mutated candidate (anything carrying an
/// operator marker), leaving only the baseline measurable.
struct RejectingBenchmark;

#[async_trait]
impl BenchmarkBackend for RejectingBenchmark {
    async fn run(&self, source: &str) -> Result<BenchmarkSample, FitnessError> {
        if source.contains("// tuned:") {
            return Err(FitnessError::Benchmark("candidate would not launch".into()));
        }
        Ok(BenchmarkSample {
            throughput: 1.0,
            latency_ms: 10.0,
        })
    }
}

#[tokio::test]
async fn exhausted_generations_still_terminate() {
    let config = TectonicConfig::default()
        .with_generations(3)
        .with_population_size(4);
    let scorer = FitnessScorer::new(Arc::new(RejectingBenchmark));
    let mut optimizer =
        TectonicOptimizer::new(config, MutationEngine::seeded(5), scorer, KERNEL);

    let result = optimizer.run(TriggerReason::Scheduled).await.unwrap();

    // Every generation was exhausted; the run still terminated normally.
    assert!(!result.success);
    assert_eq!(result.generations_run, 3);
    assert_eq!(result.improvement, 0.0);
    assert!(result.best_candidate_id.is_none());
    // The kernel was not replaced.
    assert_eq!(optimizer.kernel(), KERNEL);
}

#[tokio::test]
async fn degradation_trigger_feeds_a_successful_shift() {
    use evod_tectonic::ShiftTrigger;

    let trigger = ShiftTrigger::new(1.0);
    let current = 0.85;
    assert!(trigger.should_trigger(current));

    let config = TectonicConfig::default().with_target_improvement(0.02);
    let scorer = FitnessScorer::new(Arc::new(SimulatedBenchmark::new(current, 10.0)));
    let mut optimizer =
        TectonicOptimizer::new(config, MutationEngine::seeded(21), scorer, KERNEL);

    let result = optimizer
        .run(TriggerReason::Degradation {
            current_metric: current,
        })
        .await
        .unwrap();
    assert!(result.success);
    assert!(result.final_metric > current);
}
