use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use serde::Serialize;
use tracing::{info, warn};
use tsp_core::{verify, CancelToken, DistanceMatrix, SolverResult, TspError, TspSolver};

use crate::config::{Algorithm, SweepConfig};
use crate::error::BenchError;

const WARM_UP_CITIES: usize = 4;

/// One timed solve of an `n`-city prefix.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunRecord {
    pub n: usize,
    pub runtime_secs: f64,
    pub cost: f64,
    pub tour: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmRuns {
    pub algorithm: Algorithm,
    pub runs: Vec<RunRecord>,
    /// Why the sweep ended before the top of its range, if it did.
    pub stopped: Option<TspError>,
}

/// Solves `matrix`, measuring wall-clock time around the solver call only.
///
/// With a `time_limit`, a watchdog thread waits on a channel that the
/// solving side disconnects when it returns; if the wait times out first the
/// watchdog cancels the solve.
pub fn timed_solve(
    solver: &dyn TspSolver,
    matrix: &DistanceMatrix,
    time_limit: Option<Duration>,
) -> Result<(SolverResult, Duration), TspError> {
    let cancel = CancelToken::new();

    let Some(limit) = time_limit else {
        let start = Instant::now();
        let result = solver.solve_with(matrix, &cancel)?;
        return Ok((result, start.elapsed()));
    };

    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
    std::thread::scope(|scope| {
        let watchdog = cancel.clone();
        scope.spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(limit) {
                watchdog.cancel();
            }
        });

        let start = Instant::now();
        let result = solver.solve_with(matrix, &cancel);
        let elapsed = start.elapsed();
        drop(done_tx);

        result.map(|r| (r, elapsed))
    })
}

/// Sweeps one algorithm over its configured range of prefixes of `matrix`.
pub fn run_algorithm(
    config: &SweepConfig,
    algorithm: Algorithm,
    matrix: &DistanceMatrix,
) -> Result<Option<AlgorithmRuns>, BenchError> {
    let Some(range) = config.range(algorithm) else {
        return Ok(None);
    };
    let solver = config.solver(algorithm);
    let time_limit = config.time_limit_secs.map(Duration::from_secs);

    info!("{} search", algorithm.label());

    if config.warm_up {
        let warm_up = matrix.prefix(WARM_UP_CITIES.min(matrix.len()))?;
        solver.solve(&warm_up)?;
    }

    let mut runs = Vec::with_capacity(range.iter().count());
    let mut stopped = None;

    for n in range.iter() {
        let prefix = matrix.prefix(n)?;

        match timed_solve(solver.as_ref(), &prefix, time_limit) {
            Ok((result, elapsed)) => {
                verify(&prefix, &result)?;

                let record = RunRecord {
                    n,
                    runtime_secs: elapsed.as_secs_f64(),
                    cost: result.cost,
                    tour: result.tour.into_inner(),
                };
                info!(
                    "N={}, Runtime={:.6}s, Cost={:.2}, Path={:?}",
                    record.n, record.runtime_secs, record.cost, record.tour
                );
                runs.push(record);
            }
            Err(err) => {
                warn!(algorithm = algorithm.label(), n, "stopping sweep: {err}");
                stopped = Some(err);
                break;
            }
        }
    }

    Ok(Some(AlgorithmRuns {
        algorithm,
        runs,
        stopped,
    }))
}

pub fn run_sweep(
    config: &SweepConfig,
    matrix: &DistanceMatrix,
) -> Result<Vec<AlgorithmRuns>, BenchError> {
    config.validate()?;
    if matrix.len() < config.cities {
        return Err(BenchError::Config(format!(
            "matrix has {} cities, configuration expects {}",
            matrix.len(),
            config.cities
        )));
    }

    let mut all = Vec::new();
    for algorithm in Algorithm::ALL {
        if let Some(runs) = run_algorithm(config, algorithm, matrix)? {
            all.push(runs);
        }
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityRange;
    use crate::instance::{make_rng, CitySet};

    fn small_config() -> SweepConfig {
        SweepConfig {
            cities: 9,
            seed: Some(17),
            exhaustive: Some(CityRange::new(1, 8)),
            dynamic: Some(CityRange::new(1, 9)),
            greedy: Some(CityRange::new(2, 9)),
            ..SweepConfig::default()
        }
    }

    fn matrix(config: &SweepConfig) -> DistanceMatrix {
        CitySet::random(config.cities, config.coordinate_max, &mut make_rng(config.seed))
            .distance_matrix(config.round_distances)
            .unwrap()
    }

    #[test]
    fn sweep_covers_every_range() {
        let config = small_config();
        let all = run_sweep(&config, &matrix(&config)).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(all[0].algorithm, Algorithm::Exhaustive);
        assert_eq!(all[0].runs.len(), 8);
        assert_eq!(all[1].runs.len(), 9);
        assert_eq!(all[2].runs.len(), 8);
        assert!(all.iter().all(|a| a.stopped.is_none()));

        let first = &all[0].runs[0];
        assert_eq!(first.n, 1);
        assert_eq!(first.cost, 0.0);
        assert_eq!(first.tour, vec![0, 0]);
    }

    #[test]
    fn exact_solvers_agree_per_prefix() {
        let config = small_config();
        let all = run_sweep(&config, &matrix(&config)).unwrap();

        for (exhaustive, dynamic) in all[0].runs.iter().zip(&all[1].runs) {
            assert_eq!(exhaustive.n, dynamic.n);
            assert!((exhaustive.cost - dynamic.cost).abs() < 1e-9);
        }
    }

    #[test]
    fn disabled_algorithms_are_skipped() {
        let config = SweepConfig {
            exhaustive: None,
            dynamic: None,
            ..small_config()
        };
        let all = run_sweep(&config, &matrix(&config)).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].algorithm, Algorithm::Greedy);
    }

    #[test]
    fn resource_limit_stops_the_sweep() {
        let mut config = SweepConfig {
            exhaustive: None,
            greedy: None,
            ..small_config()
        };
        config.dynamic_solver.max_table_bytes = tsp_dynamic::table_bytes(6);
        config.dynamic = Some(CityRange::new(5, 9));

        let all = run_sweep(&config, &matrix(&config)).unwrap();
        let dynamic = &all[0];
        assert_eq!(dynamic.runs.len(), 2);
        assert!(matches!(
            dynamic.stopped,
            Some(TspError::ResourceExhausted { cities: 7, .. })
        ));
    }

    #[test]
    fn generous_time_limit_completes() {
        let config = small_config();
        let solver = config.solver(Algorithm::Dynamic);
        let matrix = matrix(&config);

        let (result, _) = timed_solve(solver.as_ref(), &matrix, Some(Duration::from_secs(60)))
            .unwrap();
        verify(&matrix, &result).unwrap();
    }

    #[test]
    fn zero_time_limit_cancels_long_solve() {
        let config = SweepConfig {
            cities: 13,
            ..small_config()
        };
        let solver = tsp_exhaustive::ExhaustiveSolver::new().with_pruning(false);
        let matrix = matrix(&config);

        let result = timed_solve(&solver, &matrix, Some(Duration::ZERO));
        assert!(matches!(result, Err(TspError::Cancelled)));
    }

    #[test]
    fn mismatched_matrix_is_rejected() {
        let config = small_config();
        let smaller = matrix(&config).prefix(5).unwrap();
        assert!(matches!(
            run_sweep(&config, &smaller),
            Err(BenchError::Config(_))
        ));
    }
}
