//! Nearest-neighbour heuristic. Starting at city 0, always step to the
//! closest unvisited city, then return to 0.
//!
//! Never backtracks and never improves a finished tour, so the result is
//! only as good as the instance allows. Callers who need a quality bound
//! have to post-process it.

use serde::{Deserialize, Serialize};
use tracing::trace;
use tsp_core::{CancelToken, DistanceMatrix, SolverResult, Tour, TspError, TspSolver};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }
}

/// Closest unvisited city to `from`. Scans in index order and only accepts
/// strictly shorter edges, so the lowest index wins ties.
#[inline(always)]
fn nearest_unvisited(
    matrix: &DistanceMatrix,
    from: usize,
    visited: &[bool],
) -> Option<(usize, f64)> {
    let mut nearest: Option<(usize, f64)> = None;

    for (city, &distance) in matrix.row(from).iter().enumerate() {
        if visited[city] {
            continue;
        }
        if distance < nearest.map_or(f64::INFINITY, |(_, d)| d) {
            nearest = Some((city, distance));
        }
    }

    nearest
}

impl TspSolver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve_with(
        &self,
        matrix: &DistanceMatrix,
        cancel: &CancelToken,
    ) -> Result<SolverResult, TspError> {
        let n = matrix.len();
        if n < 2 {
            return Ok(SolverResult::trivial());
        }

        let mut visited = vec![false; n];
        visited[0] = true;
        let mut order = Vec::with_capacity(n - 1);
        let mut current = 0;
        let mut cost = 0.0;

        for _ in 1..n {
            cancel.check()?;

            let Some((next, distance)) = nearest_unvisited(matrix, current, &visited) else {
                return Err(TspError::InvalidInput(format!(
                    "city {current} has no finite edge to an unvisited city"
                )));
            };
            trace!(from = current, to = next, distance, "nearest neighbour");

            visited[next] = true;
            order.push(next);
            cost += distance;
            current = next;
        }

        cost += matrix.get(current, 0);
        if cost == f64::INFINITY {
            return Err(TspError::InvalidInput(format!(
                "city {current} has no finite edge back to city 0"
            )));
        }

        Ok(SolverResult {
            cost,
            tour: Tour::from_order(&order),
        })
    }
}
