//! Load combination table and the combiner
//!
//! A combination table has one row per combination and one column per load
//! type holding that load type's coefficient:
//!
//! ```text
//! Name,D,EX,EY,EZ,T
//! 1.0D,1.0,0,0,0,0
//! 1.2D+1.3EX,1.2,1.3,0,0,0
//! ```
//!
//! Columns D, EX, EY, EZ and T are required. Other columns (a `Name` for
//! instance) are kept on the record but never combined. Coefficients are kept
//! as raw cells and only parsed when the combiner asks for them, so a bad
//! cell is reported as a compute failure naming the combination.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::load_types::LoadType;
use super::vector::LoadVector;
use super::PointLoads;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::{column_index, open_table};

/// Column that, when present, names a combination in log messages
pub const LABEL_COLUMN: &str = "Name";

/// One row of the combination table.
///
/// `index` is the 0-based row position and becomes the ComboID of every
/// result row produced from this record.
///
/// # Example
/// ```
/// use combo_core::loads::{CombinationRecord, LoadType};
///
/// let combo = CombinationRecord::new(0)
///     .with_value("Name", "ULS-1")
///     .with_coefficient(LoadType::Dead, 1.35);
///
/// assert_eq!(combo.coefficient(LoadType::Dead).unwrap(), 1.35);
/// assert_eq!(combo.coefficient(LoadType::Thermal).unwrap(), 0.0); // absent
/// assert_eq!(combo.label(), Some("ULS-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRecord {
    /// Position in the combination table (ComboID)
    pub index: usize,

    /// Column name and raw cell value, in table column order
    columns: Vec<(String, String)>,
}

impl CombinationRecord {
    /// Create an empty record at the given table position
    pub fn new(index: usize) -> Self {
        CombinationRecord {
            index,
            columns: Vec::new(),
        }
    }

    /// Set a raw cell value (builder pattern)
    pub fn with_value(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((column, value)),
        }
        self
    }

    /// Set a load-type coefficient (builder pattern)
    pub fn with_coefficient(self, load_type: LoadType, coefficient: f64) -> Self {
        self.with_value(load_type.code(), coefficient.to_string())
    }

    /// Raw cell for a column, if the column exists
    pub fn value(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Coefficient for a load type.
    ///
    /// - column absent: `0.0`
    /// - empty cell: NaN (missing value)
    /// - unparsable cell: [`CalcError::Compute`]
    pub fn coefficient(&self, load_type: LoadType) -> CalcResult<f64> {
        let Some(raw) = self.value(load_type.code()) else {
            return Ok(0.0);
        };

        let cell = raw.trim();
        if cell.is_empty() {
            return Ok(f64::NAN);
        }

        cell.parse::<f64>()
            .map_err(|_| CalcError::compute(self.index, load_type.code(), raw))
    }

    /// Value of the optional `Name` column
    pub fn label(&self) -> Option<&str> {
        self.value(LABEL_COLUMN).filter(|s| !s.trim().is_empty())
    }

    /// Columns other than the five load-type coefficients
    pub fn extra_columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .filter(|(name, _)| name.parse::<LoadType>().is_err())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Load the combination table.
///
/// Required columns are checked in combination order (D, EX, EY, EZ, T) and
/// the first one missing is reported. Coefficients are not parsed here.
///
/// # Errors
///
/// * `CalcError::FileAccess` - the file cannot be opened or read
/// * `CalcError::MissingColumn` - a required column is absent
/// * `CalcError::FileFormat` - a row has the wrong number of fields
pub fn load_combinations(path: &Path, delimiter: u8) -> CalcResult<Vec<CombinationRecord>> {
    let path_display = path.display().to_string();
    let (mut reader, headers) = open_table(path, delimiter)?;

    for load_type in LoadType::ALL {
        column_index(&headers, path, load_type.code())?;
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| CalcError::from_csv(&path_display, e))?;

        let record = CombinationRecord {
            index: records.len(),
            columns: headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        };

        trace!(index = record.index, label = ?record.label(), "combination loaded");
        records.push(record);
    }

    debug!(path = %path_display, combinations = records.len(), "loaded combination table");
    Ok(records)
}

/// Combine one point's loads under one combination.
///
/// Starts from the zero vector and, for each of D, EX, EY, EZ and T in that
/// order, adds `coefficient × vector`. A load type missing from either side
/// contributes nothing. Load types outside that set are never consulted.
///
/// # Example
/// ```
/// use combo_core::loads::{combine, CombinationRecord, LoadType, LoadVector, PointLoads};
///
/// let point = PointLoads::new()
///     .with_load(LoadType::Dead, LoadVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
/// let combo = CombinationRecord::new(0).with_coefficient(LoadType::Dead, 2.0);
///
/// let result = combine(&point, &combo).unwrap();
/// assert_eq!(result, LoadVector::new([2.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
/// ```
pub fn combine(point: &PointLoads, combo: &CombinationRecord) -> CalcResult<LoadVector> {
    LoadType::ALL.iter().try_fold(LoadVector::ZERO, |acc, load_type| {
        let coefficient = combo.coefficient(*load_type)?;
        Ok(acc + point.get_or_zero(*load_type).scale(coefficient))
    })
}
