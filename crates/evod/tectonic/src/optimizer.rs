use crate::config::TectonicConfig;
use crate::error::TectonicError;
use crate::types::{TectonicShiftResult, TriggerReason};
use evod_fitness::{FitnessScore, FitnessScorer};
use evod_mutation::MutationEngine;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{info, warn};

/// Drives the generational loop: generate, score, select, repeat.
///
/// The champion only ever advances on a strict fitness improvement, so its
/// fitness is monotone across generations. The loop itself is sequential
/// because each generation mutates the champion selected by the previous one;
/// within a generation, candidates are scored concurrently.
pub struct TectonicOptimizer {
    config: TectonicConfig,
    engine: MutationEngine,
    scorer: FitnessScorer,
    /// Current best-known kernel source.
    kernel: String,
    history: Vec<TectonicShiftResult>,
}

impl TectonicOptimizer {
    pub fn new(
        config: TectonicConfig,
        engine: MutationEngine,
        scorer: FitnessScorer,
        kernel: impl Into<String>,
    ) -> Self {
        Self {
            config,
            engine,
            scorer,
            kernel: kernel.into(),
            history: Vec::new(),
        }
    }

    /// The kernel the optimizer currently considers best.
    pub fn kernel(&self) -> &str {
        &self.kernel
    }

    /// Results of completed runs, oldest first.
    pub fn history(&self) -> &[TectonicShiftResult] {
        &self.history
    }

    /// Run one tectonic shift.
    ///
    /// A baseline score for the unmodified kernel is computed first and used
    /// as the improvement reference for the whole run; a baseline that fails
    /// correctness aborts before any mutation is attempted.
    pub async fn run(
        &mut self,
        trigger: TriggerReason,
    ) -> Result<TectonicShiftResult, TectonicError> {
        info!(%trigger, "tectonic shift starting");

        let baseline = self.scorer.score("baseline", &self.kernel).await;
        if !baseline.correct {
            return Err(TectonicError::Setup(format!(
                "baseline kernel failed validation: {}",
                baseline.errors.join("; ")
            )));
        }
        if baseline.throughput <= 0.0 {
            return Err(TectonicError::Setup(
                "baseline throughput is not positive".into(),
            ));
        }

        let mut champion_source = self.kernel.clone();
        let mut champion = baseline.clone();
        let mut champion_trace = Vec::new();
        let mut elites: Vec<String> = Vec::new();
        let mut generations_run = 0;
        let mut improvement = 0.0;

        for generation in 1..=self.config.generations {
            generations_run = generation;

            let mut candidates = self
                .engine
                .generate(&champion_source, self.config.population_size);

            // Recombine a slice of the population with elite survivors of the
            // previous generation.
            if !elites.is_empty() && self.config.crossover_rate > 0.0 {
                let recombined =
                    (candidates.len() as f64 * self.config.crossover_rate).round() as usize;
                for (i, candidate) in candidates.iter_mut().take(recombined).enumerate() {
                    candidate.source = self
                        .engine
                        .crossover(&candidate.source, &elites[i % elites.len()]);
                }
            }

            let scores: HashMap<String, FitnessScore> = stream::iter(
                candidates
                    .iter()
                    .map(|c| self.scorer.score(&c.id, &c.source)),
            )
            .buffer_unordered(self.config.parallelism.max(1))
            .map(|score| (score.candidate_id.clone(), score))
            .collect()
            .await;

            // Scan in generation order so the earlier candidate wins ties.
            let mut generation_best: Option<(&str, &FitnessScore)> = None;
            let mut correct_ranked: Vec<(&str, &FitnessScore)> = Vec::new();
            for candidate in &candidates {
                let score = &scores[&candidate.id];
                if !score.correct {
                    continue;
                }
                correct_ranked.push((candidate.source.as_str(), score));
                let improves = generation_best
                    .map(|(_, best)| score.fitness > best.fitness)
                    .unwrap_or(true);
                if improves {
                    generation_best = Some((candidate.source.as_str(), score));
                }
            }

            let Some((best_source, best_score)) = generation_best else {
                warn!(generation, "generation produced no valid candidate");
                champion_trace.push(champion.fitness);
                continue;
            };

            correct_ranked
                .sort_by(|a, b| b.1.fitness.partial_cmp(&a.1.fitness).unwrap_or(std::cmp::Ordering::Equal));
            elites = correct_ranked
                .iter()
                .take(self.config.elite_count)
                .map(|(source, _)| source.to_string())
                .collect();

            if best_score.fitness > champion.fitness {
                info!(
                    generation,
                    candidate = %best_score.candidate_id,
                    fitness = best_score.fitness,
                    "new champion"
                );
                champion = best_score.clone();
                champion_source = best_source.to_string();
            }
            champion_trace.push(champion.fitness);

            improvement =
                (champion.throughput - baseline.throughput) / baseline.throughput;
            if improvement >= self.config.target_improvement {
                info!(generation, improvement, "target improvement reached");
                break;
            }
        }

        let success = improvement > 0.0;
        let result = TectonicShiftResult {
            success,
            trigger,
            generations_run,
            baseline_metric: baseline.throughput,
            final_metric: champion.throughput,
            improvement,
            champion_trace,
            best_candidate_id: (champion.candidate_id != "baseline")
                .then(|| champion.candidate_id.clone()),
            best_source: (champion.candidate_id != "baseline")
                .then(|| champion_source.clone()),
        };

        if success {
            self.kernel = champion_source;
        }
        self.history.push(result.clone());
        Ok(result)
    }
}
