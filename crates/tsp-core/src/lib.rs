//! Shared building blocks for the TSP solvers.
//!
//! Every solver takes a [`DistanceMatrix`] and returns a [`SolverResult`]:
//! a tour that starts and ends at city 0 together with its exact cost.

mod cancel;
mod error;
mod matrix;
mod models;
mod solver;
mod utils;

pub use cancel::CancelToken;
pub use error::TspError;
pub use matrix::DistanceMatrix;
pub use models::{SolverResult, Tour};
pub use solver::{verify, TspSolver};
pub use utils::{euclidean_distance, Point};
