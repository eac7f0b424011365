//! # Run Configuration
//!
//! Everything a run needs is passed in explicitly through [`RunConfig`]:
//! the two input tables, the output table and the field delimiter shared by
//! all three. Configs serialize to JSON so a run can be saved and replayed.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "point_file": "points.csv",
//!   "combo_file": "combos.csv",
//!   "output_file": "combined.csv",
//!   "delimiter": ","
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default field delimiter for all tables
pub const DEFAULT_DELIMITER: char = ',';

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

/// Paths and options for one combination run.
///
/// # Example
/// ```
/// use combo_core::config::RunConfig;
///
/// let config = RunConfig::new("points.csv", "combos.csv", "out.csv").with_delimiter(';');
/// assert!(config.validate().is_ok());
/// assert_eq!(config.delimiter_byte(), b';');
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Point-load table (PointID, LoadType, Fx..Mz)
    pub point_file: PathBuf,

    /// Combination table (D, EX, EY, EZ, T)
    pub combo_file: PathBuf,

    /// Result table to write
    pub output_file: PathBuf,

    /// Field delimiter, a single ASCII character
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl RunConfig {
    /// Create a config with the default delimiter
    pub fn new(
        point_file: impl Into<PathBuf>,
        combo_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        RunConfig {
            point_file: point_file.into(),
            combo_file: combo_file.into(),
            output_file: output_file.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Set the delimiter (builder pattern)
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a config from a JSON file
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_access("read config", path.display().to_string(), e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| CalcError::Serialization {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }

    /// Check the config before any file is opened.
    ///
    /// - all three paths are non-empty
    /// - the output is not one of the inputs
    /// - the delimiter is a single ASCII character other than a quote or line break
    pub fn validate(&self) -> CalcResult<()> {
        for (field, path) in [
            ("point_file", &self.point_file),
            ("combo_file", &self.combo_file),
            ("output_file", &self.output_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(CalcError::invalid_config(field, "path is empty"));
            }
        }

        if self.output_file == self.point_file || self.output_file == self.combo_file {
            return Err(CalcError::invalid_config(
                "output_file",
                "output would overwrite an input table",
            ));
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(CalcError::invalid_config(
                "delimiter",
                format!("'{}' cannot be used as a field delimiter", self.delimiter.escape_default()),
            ));
        }

        Ok(())
    }

    /// Delimiter as the byte the csv reader and writer expect.
    ///
    /// Only meaningful after [`validate`](Self::validate) has passed.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}
