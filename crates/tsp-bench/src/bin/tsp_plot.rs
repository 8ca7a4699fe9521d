use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tsp_bench::{draw_charts, SummaryTable};

/// Draws runtime charts from the combined table of a summary file.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "summary.txt")]
    summary: PathBuf,

    /// Folder the SVG charts are written to
    #[arg(short, long, default_value = "graphs")]
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

    let text = std::fs::read_to_string(&cli.summary)
        .with_context(|| format!("reading {}", cli.summary.display()))?;
    let table = SummaryTable::parse(&text)
        .with_context(|| format!("parsing {}", cli.summary.display()))?;

    let written = draw_charts(&table, &cli.output)
        .with_context(|| format!("drawing charts into {}", cli.output.display()))?;
    info!("Wrote {} charts to {}", written.len(), cli.output.display());

    Ok(())
}
