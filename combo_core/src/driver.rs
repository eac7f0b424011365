//! # Combination Driver
//!
//! Runs the whole batch: load both tables, combine every point with every
//! combination, write the result table.
//!
//! Result rows are ordered point-major, combination-minor. The PointID of a
//! result row is the point's 0-based rank among the sorted identifiers, not
//! the identifier itself; ComboID is the 0-based row of the combination.
//!
//! Every row is computed before the output is opened, and the output is
//! saved atomically, so a failed run leaves the target untouched.
//!
//! ## Example
//!
//! ```rust,no_run
//! use combo_core::config::RunConfig;
//! use combo_core::driver::run;
//!
//! let summary = run(&RunConfig::new("points.csv", "combos.csv", "combined.csv"))?;
//! println!("{} rows written", summary.rows);
//! # Ok::<(), combo_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::errors::CalcResult;
use crate::file_io::save_results;
use crate::loads::{combine, load_combinations, CombinationRecord, LoadType, LoadVector};
use crate::points::{load_points, PointTable};

/// One row of the result table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Rank of the point among the sorted point identifiers
    pub point_index: usize,
    /// Row of the combination in the combination table
    pub combo_index: usize,
    /// Combined forces and moments
    pub vector: LoadVector,
}

impl ResultRow {
    pub fn new(point_index: usize, combo_index: usize, vector: LoadVector) -> Self {
        ResultRow {
            point_index,
            combo_index,
            vector,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub points: usize,
    pub combinations: usize,
    pub rows: usize,
    pub output_file: String,
}

/// Combine every point with every combination.
///
/// Stops at the first combination that cannot be evaluated.
pub fn compute_rows(points: &PointTable, combos: &[CombinationRecord]) -> CalcResult<Vec<ResultRow>> {
    let mut rows = Vec::with_capacity(points.len() * combos.len());

    for (point_index, (point_id, loads)) in points.iter().enumerate() {
        for (combo_index, combo) in combos.iter().enumerate() {
            let vector = combine(loads, combo)?;
            rows.push(ResultRow::new(point_index, combo_index, vector));
        }
        for load_type in LoadType::ALL.iter().filter(|lt| !loads.has(**lt)) {
            debug!(point = %point_id, load_type = load_type.description(), "no load given, counted as zero");
        }
        debug!(
            point = %point_id,
            rank = point_index,
            load_types = ?loads.codes().collect::<Vec<_>>(),
            "point combined"
        );
    }

    Ok(rows)
}

/// Execute one run described by `config`.
///
/// # Errors
///
/// Any load or compute failure aborts the run before the output is written;
/// see [`CalcError`](crate::errors::CalcError) for the kinds.
pub fn run(config: &RunConfig) -> CalcResult<RunSummary> {
    config.validate()?;
    let delimiter = config.delimiter_byte();

    let points = load_points(&config.point_file, delimiter)?;
    let combos = load_combinations(&config.combo_file, delimiter)?;
    info!(points = points.len(), combinations = combos.len(), "inputs loaded");

    let rows = compute_rows(&points, &combos)?;
    save_results(&rows, &config.output_file, delimiter)?;

    let summary = RunSummary {
        points: points.len(),
        combinations: combos.len(),
        rows: rows.len(),
        output_file: config.output_file.display().to_string(),
    };
    info!(rows = summary.rows, output = %summary.output_file, "result table written");
    Ok(summary)
}
