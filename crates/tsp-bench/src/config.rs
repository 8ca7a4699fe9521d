use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tsp_core::TspSolver;
use tsp_dynamic::DynamicSolver;
use tsp_exhaustive::ExhaustiveSolver;
use tsp_greedy::GreedySolver;

use crate::error::BenchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Exhaustive,
    Dynamic,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Exhaustive, Algorithm::Dynamic, Algorithm::Greedy];

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Exhaustive => "Exhaustive",
            Algorithm::Dynamic => "Dynamic",
            Algorithm::Greedy => "Greedy",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == label)
    }

    /// Header line that opens this algorithm's section in a results file.
    pub fn results_header(&self) -> String {
        format!("# {} Results", self.label())
    }
}

/// Inclusive range of city counts to sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRange {
    pub from: usize,
    pub to: usize,
}

impl CityRange {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.from..=self.to
    }
}

/// Held-Karp table limit of the default sweep. Fits the default dynamic
/// range (25 cities take about 3.8 GB) and turns anything bigger into
/// [`TspError::ResourceExhausted`](tsp_core::TspError::ResourceExhausted)
/// before the allocation can overcommit.
pub const DEFAULT_MAX_TABLE_BYTES: u64 = 4 << 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Size of the random city set every sweep draws its prefixes from.
    pub cities: usize,
    /// Coordinates are integers drawn uniformly from `0..coordinate_max`.
    pub coordinate_max: u32,
    pub seed: Option<u64>,
    pub round_distances: bool,
    /// Solve a 4-city prefix once before timing each algorithm.
    pub warm_up: bool,
    pub time_limit_secs: Option<u64>,

    /// `None` leaves the algorithm out of the sweep.
    pub exhaustive: Option<CityRange>,
    pub dynamic: Option<CityRange>,
    pub greedy: Option<CityRange>,

    pub exhaustive_solver: ExhaustiveSolver,
    pub dynamic_solver: DynamicSolver,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            cities: 30,
            coordinate_max: 100,
            seed: None,
            round_distances: false,
            warm_up: true,
            time_limit_secs: None,
            exhaustive: Some(CityRange::new(5, 13)),
            dynamic: Some(CityRange::new(5, 25)),
            greedy: Some(CityRange::new(5, 30)),
            exhaustive_solver: ExhaustiveSolver::default(),
            dynamic_solver: DynamicSolver::default().with_max_table_bytes(
                usize::try_from(DEFAULT_MAX_TABLE_BYTES).unwrap_or(usize::MAX),
            ),
        }
    }
}

impl SweepConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BenchError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn range(&self, algorithm: Algorithm) -> Option<CityRange> {
        match algorithm {
            Algorithm::Exhaustive => self.exhaustive,
            Algorithm::Dynamic => self.dynamic,
            Algorithm::Greedy => self.greedy,
        }
    }

    pub fn range_mut(&mut self, algorithm: Algorithm) -> &mut Option<CityRange> {
        match algorithm {
            Algorithm::Exhaustive => &mut self.exhaustive,
            Algorithm::Dynamic => &mut self.dynamic,
            Algorithm::Greedy => &mut self.greedy,
        }
    }

    pub fn solver(&self, algorithm: Algorithm) -> Box<dyn TspSolver> {
        match algorithm {
            Algorithm::Exhaustive => Box::new(self.exhaustive_solver),
            Algorithm::Dynamic => Box::new(self.dynamic_solver),
            Algorithm::Greedy => Box::new(GreedySolver),
        }
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.cities == 0 {
            return Err(BenchError::Config("cities must be at least 1".to_string()));
        }
        if self.coordinate_max == 0 {
            return Err(BenchError::Config(
                "coordinate_max must be at least 1".to_string(),
            ));
        }

        for algorithm in Algorithm::ALL {
            let Some(range) = self.range(algorithm) else {
                continue;
            };
            if range.from == 0 || range.from > range.to || range.to > self.cities {
                return Err(BenchError::Config(format!(
                    "{} range {}..={} must lie within 1..={}",
                    algorithm.label(),
                    range.from,
                    range.to,
                    self.cities
                )));
            }
        }

        Ok(())
    }
}
