use serde::{Deserialize, Serialize};

use crate::error::TspError;
use crate::utils::{euclidean_distance, Point};

/// Dense n×n travel cost table between cities.
///
/// Entries are stored flattened, row-major: the cost of going from `i` to
/// `j` lives at `i * n + j`. Every entry is non-negative; `f64::INFINITY`
/// marks a missing edge. The diagonal is assumed to be zero and is not
/// checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    data: Vec<f64>,
    n: usize,
}

impl DistanceMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TspError> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::invalid_input("distance matrix has no cities"));
        }

        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid_input(format!(
                    "distance matrix is not square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        Self::from_flat(n, data)
    }

    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self, TspError> {
        if n == 0 {
            return Err(TspError::invalid_input("distance matrix has no cities"));
        }
        if n.checked_mul(n) != Some(data.len()) {
            return Err(TspError::invalid_input(format!(
                "distance matrix is not square: {} entries for {n} cities",
                data.len()
            )));
        }

        if let Some(idx) = data.iter().position(|d| d.is_nan() || *d < 0.0) {
            return Err(TspError::invalid_input(format!(
                "distance from {} to {} is {}, expected a non-negative number",
                idx / n,
                idx % n,
                data[idx]
            )));
        }

        Ok(Self { data, n })
    }

    /// Pairwise straight-line distances between `points`.
    pub fn euclidean(points: &[Point]) -> Result<Self, TspError> {
        Self::build_from_points(points, |d| d)
    }

    /// Same as [`DistanceMatrix::euclidean`], with each distance rounded to
    /// the nearest integer.
    pub fn euclidean_rounded(points: &[Point]) -> Result<Self, TspError> {
        Self::build_from_points(points, f64::round)
    }

    fn build_from_points(points: &[Point], map: impl Fn(f64) -> f64) -> Result<Self, TspError> {
        let n = points.len();
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] = map(euclidean_distance(&points[i], &points[j]));
                }
            }
        }

        Self::from_flat(n, data)
    }

    /// Number of cities.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false, a matrix holds at least one city.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline(always)]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// The leading `k`×`k` block: the same instance restricted to cities
    /// `0..k`.
    pub fn prefix(&self, k: usize) -> Result<Self, TspError> {
        if k == 0 || k > self.n {
            return Err(TspError::invalid_input(format!(
                "cannot take a {k}-city prefix of a {}-city matrix",
                self.n
            )));
        }

        let data = (0..k)
            .flat_map(|i| self.row(i)[..k].iter().copied())
            .collect();

        Ok(Self { data, n: k })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.n).map(<[f64]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = TspError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.to_rows()
    }
}
