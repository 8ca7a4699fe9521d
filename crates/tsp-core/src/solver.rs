use crate::cancel::CancelToken;
use crate::error::TspError;
use crate::matrix::DistanceMatrix;
use crate::models::SolverResult;

/// A TSP algorithm over an explicit distance matrix.
///
/// Implementations are stateless between calls: every solve allocates its
/// own working storage, so one solver value can serve many threads.
pub trait TspSolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve_with(
        &self,
        matrix: &DistanceMatrix,
        cancel: &CancelToken,
    ) -> Result<SolverResult, TspError>;

    fn solve(&self, matrix: &DistanceMatrix) -> Result<SolverResult, TspError> {
        self.solve_with(matrix, &CancelToken::new())
    }
}

/// Checks a result against the matrix it was solved for: the tour is well
/// formed and the reported cost is exactly the sum of its edges.
pub fn verify(matrix: &DistanceMatrix, result: &SolverResult) -> Result<(), TspError> {
    result.tour.validate(matrix.len())?;

    let expected = result.tour.cost(matrix);
    if expected != result.cost {
        return Err(TspError::InvalidTour(format!(
            "reported cost {} differs from tour cost {expected}",
            result.cost
        )));
    }

    Ok(())
}
