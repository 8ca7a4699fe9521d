//! Brute-force TSP: fix city 0 as the start and try every ordering of the
//! remaining cities.
//!
//! Runs in Θ((n-1)!) time, so it is only usable for a dozen or so cities.
//! No size limit is enforced here; picking a tractable `n` is up to the
//! caller. Orders are explored lexicographically and the incumbent is only
//! replaced on a strict improvement, so among equally cheap tours the
//! lexicographically first one is returned.

mod permutations;
mod search;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tsp_core::{CancelToken, DistanceMatrix, SolverResult, Tour, TspError, TspSolver};

pub use permutations::{next_permutation, LexicographicPermutations};

use search::{BestTour, SearchContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustiveSolver {
    /// Abandon partial paths that already cost at least as much as the best
    /// complete tour. Changes runtime only, never the answer.
    pub pruning: bool,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self { pruning: true }
    }
}

impl ExhaustiveSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }
}

fn into_result(best: BestTour) -> Result<SolverResult, TspError> {
    if !best.found {
        return Err(TspError::InvalidInput(
            "no tour with finite cost exists".to_string(),
        ));
    }

    Ok(SolverResult {
        cost: best.cost,
        tour: Tour::from_order(&best.order),
    })
}

impl TspSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve_with(
        &self,
        matrix: &DistanceMatrix,
        cancel: &CancelToken,
    ) -> Result<SolverResult, TspError> {
        if matrix.len() < 2 {
            return Ok(SolverResult::trivial());
        }

        if self.pruning {
            let ctx = SearchContext::new(matrix, cancel).run()?;
            debug!(
                cities = matrix.len(),
                leaves = ctx.leaves,
                pruned = ctx.pruned,
                "branch-and-bound search finished"
            );
            into_result(ctx.best)
        } else {
            let (best, evaluated) = search::enumerate(matrix, cancel)?;
            debug!(
                cities = matrix.len(),
                evaluated, "permutation enumeration finished"
            );
            into_result(best)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use tsp_core::{verify, Point};

    fn sample() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    fn random_cities(n: usize, rng: &mut Xoshiro256PlusPlus) -> DistanceMatrix {
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.gen_range(0..100) as f64, rng.gen_range(0..100) as f64))
            .collect();
        DistanceMatrix::euclidean(&points).unwrap()
    }

    fn both() -> [ExhaustiveSolver; 2] {
        [
            ExhaustiveSolver::new(),
            ExhaustiveSolver::new().with_pruning(false),
        ]
    }

    #[test]
    fn sample_matrix_costs_eighty() {
        for solver in both() {
            let result = solver.solve(&sample()).unwrap();
            assert_eq!(result.cost, 80.0);
            assert_eq!(result.tour.cities(), &[0, 1, 3, 2, 0]);
            verify(&sample(), &result).unwrap();
        }
    }

    #[test]
    fn single_city() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        for solver in both() {
            let result = solver.solve(&matrix).unwrap();
            assert_eq!(result, SolverResult::trivial());
        }
    }

    #[test]
    fn two_cities_forced_tour() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 4.0], vec![6.0, 0.0]]).unwrap();
        for solver in both() {
            let result = solver.solve(&matrix).unwrap();
            assert_eq!(result.cost, 10.0);
            assert_eq!(result.tour.cities(), &[0, 1, 0]);
        }
    }

    #[test]
    fn ties_go_to_first_order() {
        let n = 5;
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { 1.0 })
                    .collect::<Vec<f64>>()
            })
            .collect();
        let matrix = DistanceMatrix::from_rows(rows).unwrap();

        for solver in both() {
            let result = solver.solve(&matrix).unwrap();
            assert_eq!(result.cost, 5.0);
            assert_eq!(result.tour.cities(), &[0, 1, 2, 3, 4, 0]);
        }
    }

    #[test]
    fn pruning_matches_enumeration_bit_for_bit() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for n in 1..=8 {
            for _ in 0..5 {
                let matrix = random_cities(n, &mut rng);
                let pruned = ExhaustiveSolver::new().solve(&matrix).unwrap();
                let full = ExhaustiveSolver::new()
                    .with_pruning(false)
                    .solve(&matrix)
                    .unwrap();

                assert_eq!(pruned.cost.to_bits(), full.cost.to_bits());
                assert_eq!(pruned.tour, full.tour);
                verify(&matrix, &pruned).unwrap();
            }
        }
    }

    #[test]
    fn asymmetric_matrix() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 9.0],
            vec![9.0, 0.0, 1.0],
            vec![1.0, 9.0, 0.0],
        ])
        .unwrap();

        for solver in both() {
            let result = solver.solve(&matrix).unwrap();
            assert_eq!(result.cost, 3.0);
            assert_eq!(result.tour.cities(), &[0, 1, 2, 0]);
        }
    }

    #[test]
    fn deterministic() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let matrix = random_cities(8, &mut rng);
        let solver = ExhaustiveSolver::new();
        assert_eq!(solver.solve(&matrix).unwrap(), solver.solve(&matrix).unwrap());
    }

    #[test]
    fn all_infinite_is_invalid_input() {
        let inf = f64::INFINITY;
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, inf, inf],
            vec![inf, 0.0, inf],
            vec![inf, inf, 0.0],
        ])
        .unwrap();

        for solver in both() {
            assert!(matches!(
                solver.solve(&matrix),
                Err(TspError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        for solver in both() {
            assert_eq!(
                solver.solve_with(&sample(), &cancel),
                Err(TspError::Cancelled)
            );
        }
    }

    #[test]
    fn config_from_json() {
        let solver: ExhaustiveSolver = serde_json::from_str("{}").unwrap();
        assert!(solver.pruning);

        let solver: ExhaustiveSolver = serde_json::from_str(r#"{"pruning": false}"#).unwrap();
        assert!(!solver.pruning);
    }
}
