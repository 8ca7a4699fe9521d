use tsp_core::{CancelToken, DistanceMatrix, TspError};

use crate::permutations::LexicographicPermutations;

/// Best complete tour seen so far, as the order of cities after 0.
#[derive(Debug)]
pub(crate) struct BestTour {
    pub cost: f64,
    pub order: Vec<usize>,
    pub found: bool,
}

impl BestTour {
    fn new(capacity: usize) -> Self {
        Self {
            cost: f64::INFINITY,
            order: Vec::with_capacity(capacity),
            found: false,
        }
    }

    /// Replaces the incumbent only on a strict improvement, so the first
    /// minimum in enumeration order wins ties.
    #[inline(always)]
    fn offer(&mut self, cost: f64, order: &[usize]) {
        if cost < self.cost {
            self.cost = cost;
            self.order.clear();
            self.order.extend_from_slice(order);
            self.found = true;
        }
    }
}

/// Cost of `0 -> order... -> 0`, summed edge by edge from city 0.
#[inline(always)]
fn order_cost(matrix: &DistanceMatrix, order: &[usize]) -> f64 {
    let mut prev = 0;
    let mut cost = 0.0;
    for &city in order {
        cost += matrix.get(prev, city);
        prev = city;
    }
    cost + matrix.get(prev, 0)
}

/// Plain enumeration: cost every permutation, no pruning.
pub(crate) fn enumerate(
    matrix: &DistanceMatrix,
    cancel: &CancelToken,
) -> Result<(BestTour, u64), TspError> {
    let n = matrix.len();
    let mut best = BestTour::new(n - 1);
    let mut permutations = LexicographicPermutations::new(n);
    let mut evaluated = 0u64;

    while let Some(order) = permutations.advance() {
        cancel.check()?;
        evaluated += 1;
        best.offer(order_cost(matrix, order), order);
    }

    Ok((best, evaluated))
}

/// State of one branch-and-bound run. Lives for a single solve call.
pub(crate) struct SearchContext<'a> {
    matrix: &'a DistanceMatrix,
    cancel: &'a CancelToken,
    n: usize,

    // Current partial path (cities after 0) and its membership flags
    path: Vec<usize>,
    visited: Vec<bool>,

    pub best: BestTour,
    pub leaves: u64,
    pub pruned: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(matrix: &'a DistanceMatrix, cancel: &'a CancelToken) -> Self {
        let n = matrix.len();
        let mut visited = vec![false; n];
        visited[0] = true;

        Self {
            matrix,
            cancel,
            n,
            path: Vec::with_capacity(n - 1),
            visited,
            best: BestTour::new(n - 1),
            leaves: 0,
            pruned: 0,
        }
    }

    pub fn run(mut self) -> Result<Self, TspError> {
        self.extend(0, 0.0)?;
        Ok(self)
    }

    /// Tries every unvisited city after `last`, smallest index first, which
    /// reproduces the lexicographic order of full enumeration.
    fn extend(&mut self, last: usize, cost: f64) -> Result<(), TspError> {
        self.cancel.check()?;

        // Distances are non-negative, so no completion of this prefix can
        // beat the incumbent.
        if cost >= self.best.cost {
            self.pruned += 1;
            return Ok(());
        }

        if self.path.len() == self.n - 1 {
            self.leaves += 1;
            let total = cost + self.matrix.get(last, 0);
            self.best.offer(total, &self.path);
            return Ok(());
        }

        for next in 1..self.n {
            if self.visited[next] {
                continue;
            }

            self.visited[next] = true;
            self.path.push(next);

            let step = self.matrix.get(last, next);
            let result = self.extend(next, cost + step);

            self.path.pop();
            self.visited[next] = false;
            result?;
        }

        Ok(())
    }
}
