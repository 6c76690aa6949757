//! Prints mapped values over a range of raw search coordinates.

use clap::Parser;
use hashscope_mapping::{Mapping, MappingSet};

#[derive(Parser, Debug)]
struct Args {
    /// Lower bound of the soft limit.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    min: f64,

    /// Upper bound of the soft limit.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    max: f64,

    /// Lower bound of the log limit.
    #[arg(long, default_value_t = 1e-4)]
    low: f64,

    /// Upper bound of the log limit.
    #[arg(long, default_value_t = 1.0)]
    high: f64,

    /// Sharpness of the soft limit and rate of the exponential.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Largest absolute raw coordinate.
    #[arg(long, default_value_t = 6.0)]
    span: f64,

    /// Number of samples.
    #[arg(long, default_value_t = 13)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();
    anyhow::ensure!(args.steps >= 2, "--steps must be at least 2");

    let space = MappingSet::new()
        .with("identity", Mapping::identity())
        .with("exponential", Mapping::exponential_with_scale(args.scale))
        .with(
            "soft_limit",
            Mapping::soft_limit_with_scale(args.min, args.max, args.scale),
        )
        .with("log_limit", Mapping::log_limit(args.low, args.high)?);
    tracing::info!(coordinates = space.len(), "Sweeping mappings");

    let header: Vec<String> = space.names().map(|n| format!("{n:>14}")).collect();
    println!("{}", header.join(""));
    for step in 0..args.steps {
        let v = -args.span + 2.0 * args.span * step as f64 / (args.steps - 1) as f64;
        let mapped = space.map(&vec![v; space.len()])?;
        let row: Vec<String> = mapped.iter().map(|x| format!("{x:>14.6}")).collect();
        println!("{}", row.join(""));
    }
    Ok(())
}
