use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tsp_bench::{make_rng, report, run_sweep, Algorithm, CitySet, SweepConfig};

/// Times every solver on growing prefixes of one random city set.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// JSON sweep configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Size of the random city set
    #[arg(long)]
    cities: Option<usize>,

    /// Only run these algorithms (comma separated)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    algorithms: Vec<Algorithm>,

    /// Round distances to whole numbers
    #[arg(long)]
    round: bool,

    /// Cancel any single solve that runs longer than this many seconds
    #[arg(long)]
    time_limit: Option<u64>,

    #[arg(short, long, default_value = "results.txt")]
    output: PathBuf,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut config = match &cli.config {
        Some(path) => SweepConfig::from_file(path)
            .with_context(|| format!("reading sweep config {}", path.display()))?,
        None => SweepConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(cities) = cli.cities {
        config.cities = cities;
    }
    if cli.round {
        config.round_distances = true;
    }
    if cli.time_limit.is_some() {
        config.time_limit_secs = cli.time_limit;
    }
    if !cli.algorithms.is_empty() {
        for algorithm in Algorithm::ALL {
            if !cli.algorithms.contains(&algorithm) {
                *config.range_mut(algorithm) = None;
            }
        }
    }
    config.validate()?;

    let cities = CitySet::random(config.cities, config.coordinate_max, &mut make_rng(config.seed));
    let matrix = cities.distance_matrix(config.round_distances)?;

    let runs = run_sweep(&config, &matrix)?;
    for stopped in runs.iter().filter(|r| r.stopped.is_some()) {
        warn!(
            "{} sweep ended early after {} runs",
            stopped.algorithm.label(),
            stopped.runs.len()
        );
    }

    let text = report::write_results(&cities, &matrix, &runs);
    std::fs::write(&cli.output, text)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("Results saved to {}", cli.output.display());

    Ok(())
}
