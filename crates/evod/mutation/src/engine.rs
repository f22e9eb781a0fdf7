use crate::operators::MutationOperator;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// A derived kernel variant with its operator lineage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub source: String,
    pub operators: Vec<MutationOperator>,
}

/// Generates candidate kernel variants from a parent.
///
/// Each candidate receives 1–3 operators drawn without replacement from the
/// fixed set. The engine never mutates the parent; every call returns fresh
/// candidate text.
pub struct MutationEngine {
    rng: Mutex<StdRng>,
    operators: Vec<MutationOperator>,
    /// Probability of drawing an extra operator beyond the first, applied
    /// twice (so candidates carry 1..=3 operators).
    mutation_rate: f64,
    counter: AtomicU64,
}

impl MutationEngine {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            operators: MutationOperator::all().to_vec(),
            mutation_rate: 0.5,
            counter: AtomicU64::new(0),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            operators: MutationOperator::all().to_vec(),
            mutation_rate: 0.5,
            counter: AtomicU64::new(0),
        }
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Derive `count` candidates from the parent kernel.
    pub fn generate(&self, parent: &str, count: usize) -> Vec<Candidate> {
        let mut rng = self.rng.lock().expect("lock not poisoned");
        (0..count)
            .map(|_| {
                let mut draws = 1;
                if rng.gen_bool(self.mutation_rate) {
                    draws += 1;
                }
                if rng.gen_bool(self.mutation_rate) {
                    draws += 1;
                }
                let chosen: Vec<MutationOperator> = self
                    .operators
                    .choose_multiple(&mut *rng, draws)
                    .copied()
                    .collect();

                let mut source = parent.to_string();
                for op in &chosen {
                    source = op.apply(&source);
                }

                let n = self.counter.fetch_add(1, Ordering::SeqCst);
                let id = format!("cand-{:05}", n);
                debug!(%id, operators = ?chosen, "candidate generated");
                Candidate {
                    id,
                    source,
                    operators: chosen,
                }
            })
            .collect()
    }

    /// Splice two kernels at a line boundary (single-point crossover).
    ///
    /// Used by the optimizer to recombine the champion with elite survivors.
    pub fn crossover(&self, left: &str, right: &str) -> String {
        let left_lines: Vec<&str> = left.lines().collect();
        let right_lines: Vec<&str> = right.lines().collect();
        if left_lines.is_empty() || right_lines.is_empty() {
            return left.to_string();
        }
        let mut rng = self.rng.lock().expect("lock not poisoned");
        let cut_left = rng.gen_range(0..=left_lines.len());
        let cut_right = rng.gen_range(0..=right_lines.len());

        let mut spliced: Vec<&str> = Vec::with_capacity(cut_left + right_lines.len() - cut_right);
        spliced.extend(&left_lines[..cut_left]);
        spliced.extend(&right_lines[cut_right..]);

        // Duplicate markers confuse idempotency checks; keep the first of each.
        let mut seen_markers: Vec<&str> = Vec::new();
        let deduped: Vec<&str> = spliced
            .into_iter()
            .filter(|line| {
                let is_marker = MutationOperator::all()
                    .iter()
                    .any(|op| line.trim() == op.marker());
                if is_marker {
                    if seen_markers.contains(&line.trim()) {
                        return false;
                    }
                    seen_markers.push(line.trim());
                }
                true
            })
            .collect();

        deduped.join("\n")
    }
}
