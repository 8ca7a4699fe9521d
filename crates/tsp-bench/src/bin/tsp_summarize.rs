use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tsp_bench::{file_utils, Summary};

/// Averages runtimes over every results.txt under a folder and extrapolates
/// them with fitted cost models.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "results")]
    results: PathBuf,

    #[arg(short, long, default_value = "summary.txt")]
    output: PathBuf,

    #[arg(long, default_value_t = 4)]
    from: usize,

    /// Last N of the combined table
    #[arg(long, default_value_t = 30)]
    to: usize,

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

    let files = file_utils::find_results_files(&cli.results)
        .with_context(|| format!("scanning {}", cli.results.display()))?;
    info!("Found files: {:?}", files);

    let datasets = file_utils::load_runtimes(&files)?;
    let summary = Summary::new(datasets, cli.from, cli.to);

    std::fs::write(&cli.output, summary.render())
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("Finished writing summary to {}", cli.output.display());

    Ok(())
}
