//! # Point Load Table
//!
//! Parses the point-load table into a [`PointTable`]: one [`PointLoads`] per
//! point identifier, sorted by identifier.
//!
//! ```text
//! PointID,LoadType,Fx,Fy,Fz,Mx,My,Mz
//! 101,D,0,0,-12.5,0,0,0
//! 101,EX,3.2,0,0,0,4.1,0
//! 102,D,0,0,-9.8,0,0,0
//! ```
//!
//! ## Identifier ordering
//!
//! The whole PointID column decides how identifiers compare. If every cell
//! is an integer the points sort numerically, likewise if every cell is a
//! finite real; otherwise every identifier is text and sorts lexically. So
//! `2` sorts before `10` in a numeric table, but `P10` sorts before `P2`.
//! A column whose distinct values would collapse to the same `f64` (very long
//! integers, say) is typed as text so no two points merge.
//!
//! ## Duplicates
//!
//! Rows are grouped by (PointID, LoadType). The first row seen for a key wins
//! and later rows with the same key are ignored.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::{column_index, open_table};
use crate::loads::{LoadVector, PointLoads};

/// Column holding the point identifier
pub const POINT_ID_COLUMN: &str = "PointID";

/// Column holding the load-type code
pub const LOAD_TYPE_COLUMN: &str = "LoadType";

/// Identifier of a structural point.
///
/// Numerically equal identifiers (`1`, `01`, `+1`) are the same point.
#[derive(Debug, Clone)]
pub enum PointId {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl PointId {
    pub fn text(id: impl Into<String>) -> Self {
        PointId::Text(id.into())
    }

    fn kind_rank(&self) -> u8 {
        match self {
            PointId::Integer(_) => 0,
            PointId::Real(_) => 1,
            PointId::Text(_) => 2,
        }
    }
}

impl PartialEq for PointId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointId {}

impl PartialOrd for PointId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PointId::Integer(a), PointId::Integer(b)) => a.cmp(b),
            (PointId::Real(a), PointId::Real(b)) => a.total_cmp(b),
            (PointId::Text(a), PointId::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Integer(v) => write!(f, "{}", v),
            PointId::Real(v) => write!(f, "{}", v),
            PointId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// All points of a run, sorted ascending by identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointTable {
    points: BTreeMap<PointId, PointLoads>,
}

impl PointTable {
    pub fn new() -> Self {
        PointTable::default()
    }

    /// Add or replace a point (builder pattern)
    pub fn with_point(mut self, id: PointId, loads: PointLoads) -> Self {
        self.points.insert(id, loads);
        self
    }

    pub fn get(&self, id: &PointId) -> Option<&PointLoads> {
        self.points.get(id)
    }

    /// Identifiers in ascending order; the position of an identifier here
    /// is the PointID written to the result table.
    pub fn sorted_ids(&self) -> impl Iterator<Item = &PointId> {
        self.points.keys()
    }

    /// Points in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&PointId, &PointLoads)> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A parsed data row, before identifiers are typed
struct PointRow {
    line: u64,
    point_id: String,
    load_type: String,
    vector: LoadVector,
}

/// Load the point-load table.
///
/// Rows whose PointID or LoadType cell is blank cannot be grouped and are
/// skipped with a warning. An empty force/moment cell is a missing value and
/// reads as NaN.
///
/// # Errors
///
/// * `CalcError::FileAccess` - the file cannot be opened or read
/// * `CalcError::MissingColumn` - a required column is absent
/// * `CalcError::FileFormat` - a malformed row or a non-numeric force/moment
pub fn load_points(path: &Path, delimiter: u8) -> CalcResult<PointTable> {
    let path_display = path.display().to_string();
    let (mut reader, headers) = open_table(path, delimiter)?;

    let id_col = column_index(&headers, path, POINT_ID_COLUMN)?;
    let type_col = column_index(&headers, path, LOAD_TYPE_COLUMN)?;
    let mut vector_cols = [0usize; 6];
    for (slot, name) in vector_cols.iter_mut().zip(LoadVector::COMPONENTS) {
        *slot = column_index(&headers, path, name)?;
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| CalcError::from_csv(&path_display, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let point_id = record.get(id_col).unwrap_or("");
        let load_type = record.get(type_col).unwrap_or("");
        if point_id.trim().is_empty() || load_type.trim().is_empty() {
            warn!(path = %path_display, line, "skipping row with blank PointID or LoadType");
            continue;
        }

        let mut values = [0.0f64; 6];
        for ((value, col), name) in values.iter_mut().zip(vector_cols).zip(LoadVector::COMPONENTS) {
            let cell = record.get(col).unwrap_or("");
            *value = parse_real(cell).ok_or_else(|| {
                CalcError::file_format(
                    path_display.clone(),
                    line,
                    format!("column '{}' has non-numeric value '{}'", name, cell),
                )
            })?;
        }

        rows.push(PointRow {
            line,
            point_id: point_id.to_string(),
            load_type: load_type.to_string(),
            vector: LoadVector::new(values),
        });
    }

    let table = group_rows(rows);
    debug!(path = %path_display, points = table.len(), "loaded point table");
    Ok(table)
}

/// Parse a force/moment cell; blank means a missing value
fn parse_real(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}

/// Type every identifier by the rule that fits the whole column, then group
/// by (PointID, LoadType) keeping the first row per key.
fn group_rows(rows: Vec<PointRow>) -> PointTable {
    let all_integer = rows.iter().all(|r| r.point_id.trim().parse::<i64>().is_ok());
    let all_real = all_integer || reals_are_exact(&rows);

    let mut points: BTreeMap<PointId, PointLoads> = BTreeMap::new();
    for row in rows {
        let id = match (all_integer, all_real) {
            (true, _) => row.point_id.trim().parse().map(PointId::Integer).ok(),
            // -0.0 and 0.0 are the same point
            (false, true) => row.point_id.trim().parse::<f64>().map(|v| PointId::Real(v + 0.0)).ok(),
            _ => None,
        }
        .unwrap_or_else(|| PointId::Text(row.point_id.clone()));

        let loads = points.entry(id).or_default();
        if !loads.insert_first(row.load_type.as_str(), row.vector) {
            debug!(
                point = %row.point_id,
                load_type = %row.load_type,
                line = row.line,
                "duplicate point load ignored, first row kept"
            );
        }
    }

    PointTable { points }
}

/// True when every identifier is a finite real and no two identifiers with
/// different decimal values round to the same `f64`.
fn reals_are_exact(rows: &[PointRow]) -> bool {
    let mut seen: BTreeMap<u64, (bool, String, i64)> = BTreeMap::new();
    for row in rows {
        let text = row.point_id.trim();
        let value = match text.parse::<f64>() {
            Ok(v) if v.is_finite() => v + 0.0,
            _ => return false,
        };
        let Some(decimal) = decimal_key(text) else {
            return false;
        };
        match seen.get(&value.to_bits()) {
            Some(existing) if *existing != decimal => {
                debug!(point = %text, value, "identifiers collide as reals, typing PointID as text");
                return false;
            }
            Some(_) => {}
            None => {
                seen.insert(value.to_bits(), decimal);
            }
        }
    }
    true
}

/// Exact decimal value of a numeric cell as (negative, significant digits,
/// exponent), so `1`, `01`, `1.0` and `10e-1` share a key.
fn decimal_key(text: &str) -> Option<(bool, String, i64)> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], unsigned[pos + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, fraction);
    let digits = digits.trim_start_matches('0');
    let significant = digits.trim_end_matches('0');
    if significant.is_empty() {
        return Some((false, String::new(), 0));
    }
    let exponent = exponent
        .checked_sub(i64::try_from(fraction.len()).ok()?)?
        .checked_add(i64::try_from(digits.len() - significant.len()).ok()?)?;
    Some((negative, significant.to_string(), exponent))
}
