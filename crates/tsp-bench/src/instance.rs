use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tsp_core::{DistanceMatrix, Point, TspError};

/// Seeded generator when `seed` is given, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    }
}

/// Cities with integer coordinates on a square grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CitySet {
    points: Vec<Point>,
}

impl CitySet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// `count` cities with coordinates drawn uniformly from
    /// `0..coordinate_max`.
    pub fn random<R: Rng>(count: usize, coordinate_max: u32, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| {
                Point::new(
                    rng.gen_range(0..coordinate_max) as f64,
                    rng.gen_range(0..coordinate_max) as f64,
                )
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn distance_matrix(&self, rounded: bool) -> Result<DistanceMatrix, TspError> {
        if rounded {
            DistanceMatrix::euclidean_rounded(&self.points)
        } else {
            DistanceMatrix::euclidean(&self.points)
        }
    }
}
