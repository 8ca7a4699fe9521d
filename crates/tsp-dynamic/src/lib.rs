//! Held-Karp: exact TSP by dynamic programming over subsets of visited
//! cities.
//!
//! `cost(mask, u)` is the cheapest path that leaves city 0, visits exactly
//! the cities in `mask` and stops at `u`. Masks are processed in increasing
//! numeric order; every transition adds one city, so a state is final
//! before anything reads it. The optimal tour closes the cheapest full-mask
//! state back to 0 and is rebuilt by walking the predecessor table.
//!
//! O(2^n · n²) time and O(2^n · n) memory. The table is allocated up front
//! and a too-large one is reported as [`TspError::ResourceExhausted`].

mod table;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tsp_core::{CancelToken, DistanceMatrix, SolverResult, Tour, TspError, TspSolver};

pub use table::table_bytes;

use table::{city_bit, HeldKarpTable, NO_PREDECESSOR};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicSolver {
    /// Refuse to allocate tables larger than this many bytes.
    ///
    /// Without a limit only size overflow and a failed reservation are
    /// reported. On a system that overcommits memory the reservation can
    /// succeed and the process is killed while the table is filled, so set
    /// a limit below physical memory wherever that matters.
    pub max_table_bytes: Option<usize>,
}

impl DynamicSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_table_bytes(mut self, bytes: usize) -> Self {
        self.max_table_bytes = Some(bytes);
        self
    }
}

fn fill_table(
    table: &mut HeldKarpTable,
    matrix: &DistanceMatrix,
    cancel: &CancelToken,
) -> Result<(), TspError> {
    let n = matrix.len();
    table.set(0, 0, 0.0, NO_PREDECESSOR);

    for mask in 0..=table.full_mask() {
        cancel.check()?;

        for u in 0..n {
            let cost = table.cost(mask, u);
            if cost == f64::INFINITY {
                continue;
            }

            for v in 1..n {
                let bit = city_bit(v);
                if mask & bit != 0 {
                    continue;
                }

                let next = mask | bit;
                let candidate = cost + matrix.get(u, v);
                if candidate < table.cost(next, v) {
                    table.set(next, v, candidate, u as u8);
                }
            }
        }
    }

    Ok(())
}

/// Picks the cheapest way to close the full mask back to city 0. Ties go to
/// the smallest city index.
fn close_tour(table: &HeldKarpTable, matrix: &DistanceMatrix) -> Option<(f64, usize)> {
    let full = table.full_mask();
    let mut best: Option<(f64, usize)> = None;

    for u in 1..matrix.len() {
        let cost = table.cost(full, u) + matrix.get(u, 0);
        if cost < best.map_or(f64::INFINITY, |(c, _)| c) {
            best = Some((cost, u));
        }
    }

    best
}

fn reconstruct(table: &HeldKarpTable, n: usize, last: usize) -> Tour {
    let mut order = Vec::with_capacity(n - 1);
    let mut mask = table.full_mask();
    let mut city = last;

    for _ in 1..n {
        order.push(city);
        let prev = table.parent(mask, city);
        mask ^= city_bit(city);
        city = prev as usize;
    }
    debug_assert_eq!((mask, city), (0, 0));

    order.reverse();
    Tour::from_order(&order)
}

impl TspSolver for DynamicSolver {
    fn name(&self) -> &'static str {
        "dynamic"
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

        let mut table = HeldKarpTable::allocate(n, self.max_table_bytes)?;
        debug!(cities = n, bytes = ?table_bytes(n), "allocated Held-Karp table");

        fill_table(&mut table, matrix, cancel)?;

        let Some((cost, last)) = close_tour(&table, matrix) else {
            return Err(TspError::InvalidInput(
                "no finite-cost tour visits every city".to_string(),
            ));
        };

        Ok(SolverResult {
            cost,
            tour: reconstruct(&table, n, last),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use tsp_core::{verify, Point};
    use tsp_exhaustive::ExhaustiveSolver;

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
            .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();
        DistanceMatrix::euclidean(&points).unwrap()
    }

    #[test]
    fn sample_matrix_costs_eighty() {
        let result = DynamicSolver::new().solve(&sample()).unwrap();
        assert_eq!(result.cost, 80.0);
        // Closing through city 1 is tried first and already reaches 80
        assert_eq!(result.tour.cities(), &[0, 2, 3, 1, 0]);
        verify(&sample(), &result).unwrap();
    }

    #[test]
    fn single_city() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap();
        let result = DynamicSolver::new().solve(&matrix).unwrap();
        assert_eq!(result, SolverResult::trivial());
    }

    #[test]
    fn two_cities_forced_tour() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 4.0], vec![6.0, 0.0]]).unwrap();
        let result = DynamicSolver::new().solve(&matrix).unwrap();
        assert_eq!(result.cost, 10.0);
        assert_eq!(result.tour.cities(), &[0, 1, 0]);
    }

    #[test]
    fn agrees_with_exhaustive_search() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let dynamic = DynamicSolver::new();
        let exhaustive = ExhaustiveSolver::new();

        for n in 1..=10 {
            for _ in 0..3 {
                let matrix = random_cities(n, &mut rng);
                let exact = exhaustive.solve(&matrix).unwrap();
                let result = dynamic.solve(&matrix).unwrap();

                assert!(
                    (exact.cost - result.cost).abs() < 1e-9,
                    "n={n}: exhaustive {} vs dynamic {}",
                    exact.cost,
                    result.cost
                );
                verify(&matrix, &result).unwrap();
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
        let result = DynamicSolver::new().solve(&matrix).unwrap();
        assert_eq!(result.cost, 3.0);
        assert_eq!(result.tour.cities(), &[0, 1, 2, 0]);
    }

    #[test]
    fn ties_close_through_smallest_city() {
        let n = 4;
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { 1.0 })
                    .collect::<Vec<f64>>()
            })
            .collect();
        let matrix = DistanceMatrix::from_rows(rows).unwrap();
        let result = DynamicSolver::new().solve(&matrix).unwrap();
        assert_eq!(result.cost, 4.0);
        assert_eq!(result.tour.cities().last(), Some(&0));
        assert_eq!(result.tour.cities()[3], 1);
    }

    #[test]
    fn unreachable_city_is_invalid_input() {
        let inf = f64::INFINITY;
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, inf],
            vec![1.0, 0.0, inf],
            vec![1.0, 1.0, 0.0],
        ])
        .unwrap();
        assert!(matches!(
            DynamicSolver::new().solve(&matrix),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn memory_limit_is_reported() {
        let solver = DynamicSolver::new().with_max_table_bytes(64);
        let result = solver.solve(&sample());
        assert_eq!(
            result,
            Err(TspError::ResourceExhausted {
                cities: 4,
                bytes: table_bytes(4).unwrap()
            })
        );
    }

    #[test]
    fn too_many_cities_for_a_mask() {
        let n = usize::BITS as usize + 1;
        let matrix = DistanceMatrix::from_flat(n, vec![1.0; n * n]).unwrap();
        assert!(matches!(
            DynamicSolver::new().solve(&matrix),
            Err(TspError::ResourceExhausted { cities, .. }) if cities == n
        ));
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            DynamicSolver::new().solve_with(&sample(), &cancel),
            Err(TspError::Cancelled)
        );
    }

    #[test]
    fn concurrent_solves_are_independent() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let matrices: Vec<DistanceMatrix> = (0..4).map(|_| random_cities(9, &mut rng)).collect();
        let solver = DynamicSolver::new();

        let sequential: Vec<SolverResult> =
            matrices.iter().map(|m| solver.solve(m).unwrap()).collect();

        let parallel: Vec<SolverResult> = std::thread::scope(|scope| {
            let handles: Vec<_> = matrices
                .iter()
                .map(|m| scope.spawn(move || solver.solve(m).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn config_from_json() {
        let solver: DynamicSolver = serde_json::from_str(r#"{"max_table_bytes": 1024}"#).unwrap();
        assert_eq!(solver.max_table_bytes, Some(1024));
        assert_eq!(serde_json::from_str::<DynamicSolver>("{}").unwrap(), DynamicSolver::new());
    }
}
