//! Dissects a random hashed linear model.
//!
//! A vocabulary of names is hashed into a narrow vector so that collisions
//! are common. A handful of "planted" names get their own strong weights; the
//! dissector should rank them first even though their slots are shared.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use clap::Parser;
use hashscope_core::{DenseVector, FeatureTrace, FeatureVector, LinearClassifier, SparseVector};
use hashscope_dissect::{DissectorConfig, ModelDissector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
struct Args {
    /// Width of the hashed feature vector.
    #[arg(long, default_value_t = 64)]
    dim: usize,

    /// Number of model outputs.
    #[arg(long, default_value_t = 3)]
    outputs: usize,

    /// Number of distinct feature names.
    #[arg(long, default_value_t = 200)]
    vocab: usize,

    /// Slots touched by each name.
    #[arg(long, default_value_t = 2)]
    probes: usize,

    /// Names per update call.
    #[arg(long, default_value_t = 50)]
    batch: usize,

    /// Number of records to report.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Use a sparse scratch vector.
    #[arg(long)]
    sparse: bool,

    /// Random seed for model weights.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn slot_for(name: &str, probe: usize, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    probe.hash(&mut hasher);
    (hasher.finish() % dim as u64) as usize
}

fn build_model(args: &Args, planted: &[(String, usize)]) -> anyhow::Result<LinearClassifier> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut model = LinearClassifier::zeros(args.outputs, args.dim);
    for output in 0..args.outputs {
        for index in 0..args.dim {
            model.set_weight(output, index, rng.gen_range(-0.1..0.1))?;
        }
    }
    for (name, output) in planted {
        for probe in 0..args.probes {
            model.set_weight(*output, slot_for(name, probe, args.dim), 5.0)?;
        }
    }
    Ok(model)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive("hashscope=info".parse()?))
        .init();
    let args = Args::parse();
    anyhow::ensure!(args.dim > 0, "--dim must be positive");
    anyhow::ensure!(args.outputs > 0, "--outputs must be positive");

    let names: Vec<String> = (0..args.vocab).map(|i| format!("word={i}")).collect();
    let planted: Vec<(String, usize)> = names
        .iter()
        .step_by((args.vocab / 3).max(1))
        .take(3)
        .enumerate()
        .map(|(i, name)| (name.clone(), i % args.outputs))
        .collect();
    let model = build_model(&args, &planted)?;

    let mut scratch: Box<dyn FeatureVector> = if args.sparse {
        Box::new(SparseVector::new(args.dim))
    } else {
        Box::new(DenseVector::zeros(args.dim))
    };

    let config = DissectorConfig::builder()
        .capacity_hint(args.vocab)
        .default_summary_size(args.top.max(1))
        .build()?;
    let mut dissector = ModelDissector::with_config(config);

    for chunk in names.chunks(args.batch.max(1)) {
        let mut trace = FeatureTrace::new();
        for name in chunk {
            trace.record_all(name.as_str(), (0..args.probes).map(|p| slot_for(name, p, args.dim)));
        }
        let added = dissector.update(scratch.as_mut(), &trace, &model)?;
        tracing::info!(added, known = dissector.len(), "Processed batch");
    }

    tracing::info!(
        planted = ?planted.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
        "Planted features"
    );
    for (rank, weight) in dissector.summary(args.top).iter().enumerate() {
        println!(
            "{:>3}  {:<12} importance={:>8.4}  max_impact={:?}",
            rank + 1,
            weight.feature(),
            weight.weight(),
            weight.max_impact()
        );
    }
    Ok(())
}
