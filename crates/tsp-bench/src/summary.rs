use std::fmt;

use crate::config::Algorithm;
use crate::error::BenchError;

/// Opens the combined table of a summary file.
pub const SUMMARY_HEADER: &str = "# Summary (Average Runtime per Algorithm)";

/// Suffix that marks a fitted value in the combined table.
pub const EXTRAPOLATED_MARKER: char = '*';

/// Asymptotic cost model used to extrapolate runtimes past the measured N.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeModel {
    /// `N!`
    Factorial,
    /// `N² · 2^N`
    SubsetTable,
    /// `N²`
    Quadratic,
}

impl RuntimeModel {
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Exhaustive => RuntimeModel::Factorial,
            Algorithm::Dynamic => RuntimeModel::SubsetTable,
            Algorithm::Greedy => RuntimeModel::Quadratic,
        }
    }

    pub fn eval(&self, n: usize) -> f64 {
        let n_f = n as f64;
        match self {
            RuntimeModel::Factorial => (1..=n).map(|k| k as f64).product(),
            RuntimeModel::SubsetTable => n_f * n_f * 2f64.powi(n as i32),
            RuntimeModel::Quadratic => n_f * n_f,
        }
    }
}

/// `T(N) ≈ scale · model(N)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedModel {
    pub model: RuntimeModel,
    pub scale: f64,
}

impl FittedModel {
    /// One-parameter least squares: `scale = Σ f·T / Σ f²`.
    pub fn fit(model: RuntimeModel, samples: &[(usize, f64)]) -> Option<Self> {
        let (num, den) = samples.iter().fold((0.0, 0.0), |(num, den), &(n, t)| {
            let f = model.eval(n);
            (num + f * t, den + f * f)
        });

        if den == 0.0 || !den.is_finite() {
            return None;
        }

        Some(Self {
            model,
            scale: num / den,
        })
    }

    pub fn predict(&self, n: usize) -> f64 {
        self.scale * self.model.eval(n)
    }
}

/// One cell of the combined table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Estimate {
    /// Average over the results files.
    Measured(f64),
    /// Fitted model outside the measured N.
    Extrapolated(f64),
}

impl Estimate {
    pub fn value(&self) -> f64 {
        match *self {
            Estimate::Measured(t) | Estimate::Extrapolated(t) => t,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Estimate::Measured(_))
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Measured(t) => write!(f, "{t:.6}"),
            Estimate::Extrapolated(t) => write!(f, "{t:.6}{EXTRAPOLATED_MARKER}"),
        }
    }
}

/// Runtimes of one algorithm across several results files.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    pub n_values: Vec<usize>,
    /// `runtimes[row][file]`
    pub runtimes: Vec<Vec<f64>>,
    pub averages: Vec<f64>,
}

impl AlgorithmSummary {
    /// Lines up the datasets row by row, truncated to the shortest one, and
    /// averages each row. N values come from the first dataset.
    pub fn from_datasets(algorithm: Algorithm, datasets: &[Vec<(usize, f64)>]) -> Option<Self> {
        let rows = datasets.iter().map(Vec::len).min()?;
        if rows == 0 {
            return None;
        }

        let n_values = datasets[0][..rows].iter().map(|&(n, _)| n).collect();
        let runtimes: Vec<Vec<f64>> = (0..rows)
            .map(|row| datasets.iter().map(|d| d[row].1).collect())
            .collect();
        let averages = runtimes
            .iter()
            .map(|r| r.iter().sum::<f64>() / r.len() as f64)
            .collect();

        Some(Self {
            algorithm,
            n_values,
            runtimes,
            averages,
        })
    }

    pub fn measured(&self, n: usize) -> Option<f64> {
        self.n_values
            .iter()
            .position(|&m| m == n)
            .map(|idx| self.averages[idx])
    }

    pub fn fit(&self) -> Option<FittedModel> {
        let samples: Vec<(usize, f64)> = self
            .n_values
            .iter()
            .copied()
            .zip(self.averages.iter().copied())
            .collect();
        FittedModel::fit(RuntimeModel::for_algorithm(self.algorithm), &samples)
    }

    /// Measured average where there is one, fitted model elsewhere.
    pub fn estimate(&self, n: usize) -> Option<Estimate> {
        match self.measured(n) {
            Some(t) => Some(Estimate::Measured(t)),
            None => self.fit().map(|m| Estimate::Extrapolated(m.predict(n))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub algorithms: Vec<(Algorithm, Option<AlgorithmSummary>)>,
    pub extrapolate_from: usize,
    pub extrapolate_to: usize,
}

impl Summary {
    pub fn new(
        datasets: Vec<(Algorithm, Vec<Vec<(usize, f64)>>)>,
        extrapolate_from: usize,
        extrapolate_to: usize,
    ) -> Self {
        let algorithms = datasets
            .into_iter()
            .map(|(algorithm, data)| (algorithm, AlgorithmSummary::from_datasets(algorithm, &data)))
            .collect();

        Self {
            algorithms,
            extrapolate_from,
            extrapolate_to,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for (algorithm, summary) in &self.algorithms {
            out.push_str(&format!("# {} Summary\n", algorithm.label()));
            let Some(summary) = summary else {
                out.push_str("No data found.\n\n");
                continue;
            };

            let files = summary.runtimes.first().map_or(0, Vec::len);
            let tests: Vec<String> = (1..=files).map(|i| format!("Test{i}")).collect();
            out.push_str(&format!("N {} Average\n", tests.join(" ")));

            for ((n, row), avg) in summary
                .n_values
                .iter()
                .zip(&summary.runtimes)
                .zip(&summary.averages)
            {
                let cells: Vec<String> = row.iter().map(|t| format!("{t:.6}")).collect();
                out.push_str(&format!("{n} {} {avg:.6}\n", cells.join(" ")));
            }
            out.push_str("\n\n");
        }

        let present: Vec<&AlgorithmSummary> = self
            .algorithms
            .iter()
            .filter_map(|(_, summary)| summary.as_ref())
            .collect();

        if present.is_empty() {
            out.push_str("# No valid data found.\n");
            return out;
        }

        out.push_str(SUMMARY_HEADER);
        out.push('\n');
        let labels: Vec<&str> = present.iter().map(|s| s.algorithm.label()).collect();
        out.push_str(&format!("N {}\n", labels.join(" ")));

        for n in self.extrapolate_from..=self.extrapolate_to {
            let cells: Vec<String> = present
                .iter()
                .map(|s| match s.estimate(n) {
                    Some(estimate) => estimate.to_string(),
                    None => "-".to_string(),
                })
                .collect();
            out.push_str(&format!("{n} {}\n", cells.join(" ")));
        }
        out.push('\n');

        out
    }
}

/// The combined table read back from a summary file.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryTable {
    pub algorithms: Vec<Algorithm>,
    pub rows: Vec<SummaryRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub n: usize,
    /// One cell per entry of [`SummaryTable::algorithms`]; `None` for `-`.
    pub cells: Vec<Option<Estimate>>,
}

impl SummaryTable {
    /// Reads the table under [`SUMMARY_HEADER`] up to the next blank or `#`
    /// line.
    pub fn parse(text: &str) -> Result<Self, BenchError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .skip_while(|line| *line != SUMMARY_HEADER);
        if lines.next().is_none() {
            return Err(BenchError::Summary(format!("missing {SUMMARY_HEADER:?} section")));
        }

        let header = lines
            .next()
            .ok_or_else(|| BenchError::Summary("missing column header".to_string()))?;
        let mut labels = header.split_whitespace();
        if labels.next() != Some("N") {
            return Err(BenchError::Summary(format!("bad column header {header:?}")));
        }
        let algorithms = labels
            .map(|label| {
                Algorithm::from_label(label)
                    .ok_or_else(|| BenchError::Summary(format!("unknown algorithm {label:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::new();
        for line in lines.take_while(|line| !line.is_empty() && !line.starts_with('#')) {
            let mut fields = line.split_whitespace();
            let n = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or_else(|| BenchError::Summary(format!("bad row {line:?}")))?;
            let cells = fields.map(parse_cell).collect::<Result<Vec<_>, _>>()?;
            if cells.len() != algorithms.len() {
                return Err(BenchError::Summary(format!(
                    "row {n} has {} cells, expected {}",
                    cells.len(),
                    algorithms.len()
                )));
            }
            rows.push(SummaryRow { n, cells });
        }

        Ok(Self { algorithms, rows })
    }
}

fn parse_cell(cell: &str) -> Result<Option<Estimate>, BenchError> {
    if cell == "-" {
        return Ok(None);
    }

    let (digits, extrapolated) = match cell.strip_suffix(EXTRAPOLATED_MARKER) {
        Some(digits) => (digits, true),
        None => (cell, false),
    };
    let t: f64 = digits
        .parse()
        .map_err(|_| BenchError::Summary(format!("bad runtime {cell:?}")))?;

    Ok(Some(if extrapolated {
        Estimate::Extrapolated(t)
    } else {
        Estimate::Measured(t)
    }))
}
