use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Algorithm;

pub const RESULTS_FILE_NAME: &str = "results.txt";

/// Every `results.txt` below `folder_path`, sorted.
pub fn find_results_files(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            if path.file_name().is_some_and(|name| name == RESULTS_FILE_NAME) {
                files.push(path);
            }
        } else if path.is_dir() {
            files.extend(find_results_files(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// Per-algorithm runtime series, one per file that has data for it.
pub fn load_runtimes(
    files: &[PathBuf],
) -> Result<Vec<(Algorithm, Vec<Vec<(usize, f64)>>)>, std::io::Error> {
    let texts = files
        .iter()
        .map(|path| std::fs::read_to_string(path).map(|text| (path, text)))
        .collect::<Result<Vec<_>, _>>()?;

    let datasets = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut series = Vec::new();
            for (path, text) in &texts {
                match crate::report::parse_runtimes(text, algorithm) {
                    Some(data) if !data.is_empty() => {
                        info!(
                            "Parsed {} for {}: {} rows",
                            path.display(),
                            algorithm.label(),
                            data.len()
                        );
                        series.push(data);
                    }
                    _ => warn!(
                        "No data found for {} in {}",
                        algorithm.label(),
                        path.display()
                    ),
                }
            }
            (algorithm, series)
        })
        .collect();

    Ok(datasets)
}
