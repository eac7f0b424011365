//! # combo_core - Point Load Combination Engine
//!
//! `combo_core` applies load combination coefficients to 6-component point
//! loads (Fx, Fy, Fz, Mx, My, Mz) and writes a combined-load table: for each
//! point and each combination, the weighted sum of the point's D, EX, EY, EZ
//! and T load vectors.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: a run takes a [`RunConfig`] and returns a summary or an error
//! - **All or nothing**: any bad row aborts the run and no output is written
//! - **Rich Errors**: structured error kinds, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use combo_core::loads::{combine, CombinationRecord, LoadType, LoadVector, PointLoads};
//!
//! let point = PointLoads::new()
//!     .with_load(LoadType::Dead, LoadVector::new([0.0, 0.0, -20.0, 0.0, 0.0, 0.0]))
//!     .with_load(LoadType::Thermal, LoadVector::new([1.5, 0.0, 0.0, 0.0, 0.0, 0.0]));
//!
//! let combo = CombinationRecord::new(0)
//!     .with_coefficient(LoadType::Dead, 1.5)
//!     .with_coefficient(LoadType::Thermal, 1.0);
//!
//! let combined = combine(&point, &combo).unwrap();
//! assert_eq!(combined.fx(), 1.5);
//! assert_eq!(combined.fz(), -30.0);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load types, load vectors, point loads, combinations and the combiner
//! - [`points`] - Point-load table reader and point identifiers
//! - [`driver`] - The batch run: load, combine, write
//! - [`config`] - Run configuration
//! - [`errors`] - Structured error types
//! - [`file_io`] - Table reading helpers and the atomic result writer

pub mod config;
pub mod driver;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod points;

// Re-export commonly used types at crate root for convenience
pub use config::RunConfig;
pub use driver::{compute_rows, run, ResultRow, RunSummary};
pub use errors::{CalcError, CalcResult};
pub use points::{load_points, PointId, PointTable};
