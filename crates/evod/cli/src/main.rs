//! `evod` — run one tectonic shift against a kernel from the command line.

use anyhow::Context;
use clap::Parser;
use evod_fitness::{FitnessScorer, SimulatedBenchmark};
use evod_mutation::MutationEngine;
use evod_tectonic::{TectonicConfig, TectonicError, TectonicOptimizer, TriggerReason};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Reference kernel used when no file is given.
const DEFAULT_KERNEL: &str = "\
@group(0) @binding(0) var<storage, read> a: array<f32>;
@group(0) @binding(1) var<storage, read> b: array<f32>;
@group(0) @binding(2) var<storage, read_write> out: array<f32>;

@compute @workgroup_size(64)
fn main(@builtin(global_invocation_id) gid: vec3<u32>) {
    let row = gid.x;
    let stride = 64u;
    let n = arrayLength(&b);
    var acc: f32 = 0.0;
    for (var i: u32 = 0u; i < n; i = i + 1u) {
        acc = acc + a[row * stride + i] * b[i];
    }
    out[row] = acc;
}
";

#[derive(Parser, Debug)]
#[command(name = "evod", about = "Generational kernel optimization runner")]
struct Args {
    /// Maximum generations to run.
    #[arg(long, default_value_t = 5)]
    generations: usize,

    /// Candidates per generation.
    #[arg(long, default_value_t = 8)]
    population: usize,

    /// Fractional improvement that stops the run early (e.g. 0.2 for 20%).
    #[arg(long, default_value_t = 0.2)]
    target_improvement: f64,

    /// RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Kernel source file; a built-in reference kernel is used if omitted.
    #[arg(long)]
    kernel: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let kernel = match &args.kernel {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading kernel file {}", path.display()))?,
        None => DEFAULT_KERNEL.to_string(),
    };

    let config = TectonicConfig::default()
        .with_generations(args.generations)
        .with_population_size(args.population)
        .with_target_improvement(args.target_improvement);

    let engine = match args.seed {
        Some(seed) => MutationEngine::seeded(seed),
        None => MutationEngine::from_entropy(),
    };
    let scorer = FitnessScorer::new(Arc::new(SimulatedBenchmark::new(1.0, 10.0)));

    let mut optimizer = TectonicOptimizer::new(config, engine, scorer, kernel);
    let result = match optimizer.run(TriggerReason::Manual).await {
        Ok(result) => result,
        Err(e @ TectonicError::Setup(_)) => {
            // A run that cannot establish its baseline is unrecoverable.
            return Err(e).context("tectonic shift setup failed");
        }
    };

    info!(
        generations = result.generations_run,
        improvement = result.improvement,
        "shift finished"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
