//! Plain-text results file shared by the sweep and the summariser.
//!
//! Sections open with a `#` header line and run until the next one:
//!
//! ```text
//! # Cities
//! 12 85
//! ...
//!
//! # Distance Matrix D
//! 0.00 73.25 ...
//!
//! # Dynamic Results
//! 5 0.000012 221.47 [0, 3, 1, 4, 2, 0]
//! ```

use tsp_core::DistanceMatrix;

use crate::config::Algorithm;
use crate::instance::CitySet;
use crate::sweep::AlgorithmRuns;

pub const CITIES_HEADER: &str = "# Cities";
pub const MATRIX_HEADER: &str = "# Distance Matrix D";

pub fn write_results(cities: &CitySet, matrix: &DistanceMatrix, runs: &[AlgorithmRuns]) -> String {
    let mut out = String::new();

    out.push_str(CITIES_HEADER);
    out.push('\n');
    for p in cities.points() {
        out.push_str(&format!("{} {}\n", p.x, p.y));
    }

    out.push('\n');
    out.push_str(MATRIX_HEADER);
    out.push('\n');
    for i in 0..matrix.len() {
        let row: Vec<String> = matrix.row(i).iter().map(|d| format!("{d:.2}")).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    for algorithm_runs in runs {
        out.push('\n');
        out.push_str(&algorithm_runs.algorithm.results_header());
        out.push('\n');
        for run in &algorithm_runs.runs {
            out.push_str(&format!(
                "{} {:.6} {:.2} {:?}\n",
                run.n, run.runtime_secs, run.cost, run.tour
            ));
        }
    }

    out
}

/// Reads the `(N, runtime)` pairs of one algorithm's section.
///
/// `None` when the section is missing. Lines that do not start with a
/// number pair are skipped.
pub fn parse_runtimes(text: &str, algorithm: Algorithm) -> Option<Vec<(usize, f64)>> {
    let header = algorithm.results_header();
    let mut lines = text.lines();
    lines.by_ref().find(|line| line.trim().contains(&header))?;

    let mut data = Vec::new();
    for line in lines {
        if line.starts_with('#') {
            break;
        }

        let mut parts = line.split_whitespace();
        let (Some(n), Some(runtime)) = (parts.next(), parts.next()) else {
            continue;
        };
        let (Ok(n), Ok(runtime)) = (n.parse::<f64>(), runtime.parse::<f64>()) else {
            continue;
        };
        data.push((n as usize, runtime));
    }

    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::RunRecord;
    use tsp_core::Point;

    fn fixture() -> String {
        let cities = CitySet::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        let matrix = cities.distance_matrix(false).unwrap();
        let runs = vec![
            AlgorithmRuns {
                algorithm: Algorithm::Dynamic,
                runs: vec![
                    RunRecord {
                        n: 1,
                        runtime_secs: 0.0000012,
                        cost: 0.0,
                        tour: vec![0, 0],
                    },
                    RunRecord {
                        n: 2,
                        runtime_secs: 0.25,
                        cost: 10.0,
                        tour: vec![0, 1, 0],
                    },
                ],
                stopped: None,
            },
            AlgorithmRuns {
                algorithm: Algorithm::Greedy,
                runs: vec![],
                stopped: None,
            },
        ];
        write_results(&cities, &matrix, &runs)
    }

    #[test]
    fn layout() {
        let expected = "\
# Cities
0 0
3 4

# Distance Matrix D
0.00 5.00
5.00 0.00

# Dynamic Results
1 0.000001 0.00 [0, 0]
2 0.250000 10.00 [0, 1, 0]

# Greedy Results
";
        assert_eq!(fixture(), expected);
    }

    #[test]
    fn reads_back_runtimes() {
        let text = fixture();
        assert_eq!(
            parse_runtimes(&text, Algorithm::Dynamic),
            Some(vec![(1, 0.000001), (2, 0.25)])
        );
        assert_eq!(parse_runtimes(&text, Algorithm::Greedy), Some(vec![]));
        assert_eq!(parse_runtimes(&text, Algorithm::Exhaustive), None);
    }

    #[test]
    fn skips_garbage_and_stops_at_next_section() {
        let text = "\
# Exhaustive Results
5.0 0.5 10.00 [0, 1, 2, 3, 4, 0]
not a row

6 oops
7 1.5
# Dynamic Results
8 2.0
";
        assert_eq!(
            parse_runtimes(text, Algorithm::Exhaustive),
            Some(vec![(5, 0.5), (7, 1.5)])
        );
        assert_eq!(parse_runtimes(text, Algorithm::Dynamic), Some(vec![(8, 2.0)]));
    }
}
