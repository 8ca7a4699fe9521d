use napi_derive::napi;
use tsp_core::SolverResult;

#[napi(object)]
#[derive(Clone, Debug)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[napi(object)]
#[derive(Clone, Debug)]
pub struct TspSolution {
    pub cost: f64,
    pub tour: Vec<u32>,
}

impl From<SolverResult> for TspSolution {
    fn from(result: SolverResult) -> Self {
        TspSolution {
            cost: result.cost,
            tour: result.tour.cities().iter().map(|&c| c as u32).collect(),
        }
    }
}
