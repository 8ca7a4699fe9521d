//! Benchmark harness around the TSP solvers.
//!
//! Draws a random city set, solves growing prefixes of it with each
//! algorithm while timing the solver call, writes everything to a plain-text
//! results file, and later averages several such files and fits runtime
//! models to estimate the N no run reached. The fitted tables can then be
//! drawn as runtime charts.

pub mod config;
pub mod error;
pub mod file_utils;
pub mod instance;
pub mod plot;
pub mod report;
pub mod summary;
pub mod sweep;

pub use config::{Algorithm, CityRange, SweepConfig};
pub use error::BenchError;
pub use instance::{make_rng, CitySet};
pub use plot::{draw_charts, Chart, PlotSeries};
pub use summary::{
    AlgorithmSummary, Estimate, FittedModel, RuntimeModel, Summary, SummaryRow, SummaryTable,
};
pub use sweep::{run_sweep, timed_solve, AlgorithmRuns, RunRecord};
