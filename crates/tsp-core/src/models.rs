use serde::{Deserialize, Serialize};

use crate::error::TspError;
use crate::matrix::DistanceMatrix;

/// A closed tour written open-ended: starts at city 0, visits every other
/// city once and returns to 0, so it holds `n + 1` entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    pub fn new(cities: Vec<usize>) -> Self {
        Self(cities)
    }

    /// The degenerate one-city tour `[0, 0]`.
    pub fn closed_at_origin() -> Self {
        Self(vec![0, 0])
    }

    /// Wraps `order` (the cities after 0, in visiting order) with the start
    /// and return to city 0.
    pub fn from_order(order: &[usize]) -> Self {
        let mut cities = Vec::with_capacity(order.len() + 2);
        cities.push(0);
        cities.extend_from_slice(order);
        cities.push(0);
        Self(cities)
    }

    pub fn cities(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Sum of the edge weights along the tour, accumulated left to right.
    pub fn cost(&self, matrix: &DistanceMatrix) -> f64 {
        self.0
            .windows(2)
            .fold(0.0, |acc, edge| acc + matrix.get(edge[0], edge[1]))
    }

    /// Checks that this is a tour over `n` cities: `n + 1` entries, 0 at
    /// both ends and every city of `1..n` exactly once in between.
    pub fn validate(&self, n: usize) -> Result<(), TspError> {
        let cities = &self.0;
        if n == 0 {
            return Err(TspError::InvalidTour("tour over zero cities".to_string()));
        }
        if cities.len() != n + 1 {
            return Err(TspError::InvalidTour(format!(
                "expected {} entries, found {}",
                n + 1,
                cities.len()
            )));
        }
        if cities[0] != 0 || cities[n] != 0 {
            return Err(TspError::InvalidTour(
                "tour must start and end at city 0".to_string(),
            ));
        }

        let mut seen = vec![false; n];
        for &city in &cities[1..n] {
            if city == 0 || city >= n {
                return Err(TspError::InvalidTour(format!(
                    "city {city} is out of range 1..{n}"
                )));
            }
            if seen[city] {
                return Err(TspError::InvalidTour(format!("city {city} is visited twice")));
            }
            seen[city] = true;
        }

        Ok(())
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.0
    }
}

/// Cost of a tour together with the tour itself. `cost` always equals
/// [`Tour::cost`] of `tour` on the matrix it was solved for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub cost: f64,
    pub tour: Tour,
}

impl SolverResult {
    /// Answer for a single-city matrix: stay at city 0 for free.
    pub fn trivial() -> Self {
        Self {
            cost: 0.0,
            tour: Tour::closed_at_origin(),
        }
    }
}
