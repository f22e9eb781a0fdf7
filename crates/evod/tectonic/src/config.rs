use serde::{Deserialize, Serialize};

/// Process-wide configuration for the generational optimizer, loaded once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TectonicConfig {
    /// Probability of drawing extra mutation operators per candidate.
    pub mutation_rate: f64,
    /// Maximum generations per shift.
    pub generations: usize,
    /// Candidates generated per generation.
    pub population_size: usize,
    /// Top scorers retained as crossover partners for the next generation.
    pub elite_count: usize,
    /// Probability that a candidate is recombined with an elite survivor.
    pub crossover_rate: f64,
    /// Fractional improvement over baseline that stops the run early.
    pub target_improvement: f64,
    /// Size ceiling for candidate kernels, in bytes.
    pub max_artifact_bytes: usize,
    /// Named procedures every candidate must keep.
    pub required_checks: Vec<String>,
    /// Concurrent fitness evaluations per generation.
    pub parallelism: usize,
}

impl Default for TectonicConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.5,
            generations: 5,
            population_size: 8,
            elite_count: 2,
            crossover_rate: 0.3,
            target_improvement: 0.2,
            max_artifact_bytes: 64 * 1024,
            required_checks: vec!["fn main".into()],
            parallelism: 4,
        }
    }
}

impl TectonicConfig {
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_target_improvement(mut self, target: f64) -> Self {
        self.target_improvement = target;
        self
    }
}
