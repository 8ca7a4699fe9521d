#![deny(clippy::all)]

use napi_derive::napi;
use tsp_core::{DistanceMatrix, TspError, TspSolver};
use tsp_dynamic::DynamicSolver;
use tsp_exhaustive::ExhaustiveSolver;
use tsp_greedy::GreedySolver;

mod models;
mod utils;

use models::{Location, TspSolution};

fn to_napi_error(err: TspError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

fn run(solver: &dyn TspSolver, matrix: Vec<Vec<f64>>) -> napi::Result<TspSolution> {
    let matrix = DistanceMatrix::from_rows(matrix).map_err(to_napi_error)?;

    solver
        .solve(&matrix)
        .map(TspSolution::from)
        .map_err(to_napi_error)
}

#[napi]
pub fn solve_exhaustive(matrix: Vec<Vec<f64>>) -> napi::Result<TspSolution> {
    run(&ExhaustiveSolver::new(), matrix)
}

#[napi]
pub fn solve_dynamic(matrix: Vec<Vec<f64>>) -> napi::Result<TspSolution> {
    run(&DynamicSolver::new(), matrix)
}

#[napi]
pub fn solve_greedy(matrix: Vec<Vec<f64>>) -> napi::Result<TspSolution> {
    run(&GreedySolver, matrix)
}

#[napi]
pub fn build_distance_matrix(locations: Vec<Location>) -> Vec<Vec<f64>> {
    utils::distance_rows(&locations)
}
