//! Point loads and load combinations
//!
//! # Overview
//!
//! - [`LoadType`] - The five load categories the combiner consumes (D, EX, EY, EZ, T)
//! - [`LoadVector`] - Forces and moments at a point (Fx, Fy, Fz, Mx, My, Mz)
//! - [`PointLoads`] - Load vectors for one point, keyed by load-type code
//! - [`CombinationRecord`] - One row of the combination table
//! - [`combine`] - Weighted sum of a point's load vectors for one combination
//!
//! # Example
//!
//! ```
//! use combo_core::loads::{combine, CombinationRecord, LoadType, LoadVector, PointLoads};
//!
//! let point = PointLoads::new()
//!     .with_load(LoadType::Dead, LoadVector::new([0.0, 0.0, -10.0, 0.0, 0.0, 0.0]))
//!     .with_load(LoadType::SeismicX, LoadVector::new([4.0, 0.0, 0.0, 0.0, 2.0, 0.0]));
//!
//! let combo = CombinationRecord::new(0)
//!     .with_coefficient(LoadType::Dead, 1.0)
//!     .with_coefficient(LoadType::SeismicX, 0.7);
//!
//! let result = combine(&point, &combo).unwrap();
//! assert_eq!(result.fz(), -10.0);
//! assert!((result.fx() - 2.8).abs() < 1e-12);
//! ```

pub mod combinations;
pub mod load_types;
pub mod vector;

pub use combinations::{combine, load_combinations, CombinationRecord};
pub use load_types::LoadType;
pub use vector::LoadVector;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Load vectors acting at a single point, keyed by load-type code.
///
/// Codes are an open set: anything found in the point table's LoadType
/// column is kept, but only the five [`LoadType`] codes are combined.
///
/// # Example
/// ```
/// use combo_core::loads::{LoadType, LoadVector, PointLoads};
///
/// let point = PointLoads::new()
///     .with_load(LoadType::Dead, LoadVector::new([1.0; 6]));
///
/// assert_eq!(point.get_or_zero(LoadType::Dead), LoadVector::new([1.0; 6]));
/// assert_eq!(point.get_or_zero(LoadType::Thermal), LoadVector::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointLoads {
    loads: BTreeMap<String, LoadVector>,
}

impl PointLoads {
    /// Create an empty set of point loads
    pub fn new() -> Self {
        PointLoads::default()
    }

    /// Add or replace a load vector (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, vector: LoadVector) -> Self {
        self.loads.insert(load_type.code().to_string(), vector);
        self
    }

    /// Insert a vector unless the code is already present.
    ///
    /// Returns `false` when an earlier vector was kept and `vector` dropped.
    pub fn insert_first(&mut self, code: impl Into<String>, vector: LoadVector) -> bool {
        match self.loads.entry(code.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(vector);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Look up a vector by raw code, including codes the combiner ignores
    pub fn get(&self, code: &str) -> Option<&LoadVector> {
        self.loads.get(code)
    }

    /// Vector for a combined load type, or the zero vector if not present
    pub fn get_or_zero(&self, load_type: LoadType) -> LoadVector {
        self.loads
            .get(load_type.code())
            .copied()
            .unwrap_or(LoadVector::ZERO)
    }

    /// Check if a load type is defined (even if zero)
    pub fn has(&self, load_type: LoadType) -> bool {
        self.loads.contains_key(load_type.code())
    }

    /// All codes present, in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.loads.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}
