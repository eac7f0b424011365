//! Load type definitions
//!
//! The combination engine consumes a fixed set of five load types. Point
//! tables may carry other load-type codes; those are kept but never combined.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Load types consumed by the combiner
///
/// Each variant maps to the column/code used in the input tables.
///
/// # Example
/// ```
/// use combo_core::loads::LoadType;
///
/// let ex = LoadType::SeismicX;
/// assert_eq!(ex.code(), "EX");
/// assert_eq!("EX".parse::<LoadType>().unwrap(), ex);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load
    Dead,
    /// EX - Seismic load along X
    SeismicX,
    /// EY - Seismic load along Y
    SeismicY,
    /// EZ - Seismic load along Z
    SeismicZ,
    /// T - Temperature (self-straining) load
    Thermal,
}

impl LoadType {
    /// All load types in combination order
    pub const ALL: [LoadType; 5] = [
        LoadType::Dead,
        LoadType::SeismicX,
        LoadType::SeismicY,
        LoadType::SeismicZ,
        LoadType::Thermal,
    ];

    /// Code used as the LoadType cell in point tables and as the column
    /// header in combination tables (D, EX, EY, EZ, T)
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::SeismicX => "EX",
            LoadType::SeismicY => "EY",
            LoadType::SeismicZ => "EZ",
            LoadType::Thermal => "T",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::SeismicX => "Seismic load (X)",
            LoadType::SeismicY => "Seismic load (Y)",
            LoadType::SeismicZ => "Seismic load (Z)",
            LoadType::Thermal => "Temperature load",
        }
    }
}

impl FromStr for LoadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoadType::ALL
            .iter()
            .copied()
            .find(|lt| lt.code() == s)
            .ok_or_else(|| format!("unknown load type code '{}'", s))
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_type_codes() {
        assert_eq!(LoadType::Dead.code(), "D");
        assert_eq!(LoadType::SeismicX.code(), "EX");
        assert_eq!(LoadType::SeismicY.code(), "EY");
        assert_eq!(LoadType::SeismicZ.code(), "EZ");
        assert_eq!(LoadType::Thermal.code(), "T");
    }

    #[test]
    fn test_all_is_combination_order() {
        let codes: Vec<&str> = LoadType::ALL.iter().map(|lt| lt.code()).collect();
        assert_eq!(codes, vec!["D", "EX", "EY", "EZ", "T"]);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("T".parse::<LoadType>(), Ok(LoadType::Thermal));
        assert!("t".parse::<LoadType>().is_err());
        assert!("L".parse::<LoadType>().is_err());
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(LoadType::SeismicY.to_string(), "EY");
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(LoadType::Dead.description(), "Dead load");
        assert_eq!(LoadType::SeismicZ.description(), "Seismic load (Z)");
    }
}
