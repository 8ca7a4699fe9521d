use thiserror::Error;
use tsp_core::TspError;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed summary: {0}")]
    Summary(String),

    #[error("Failed to draw chart: {0}")]
    Plot(String),

    #[error(transparent)]
    Solver(#[from] TspError),
}
