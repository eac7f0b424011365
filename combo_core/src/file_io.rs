//! # File I/O Module
//!
//! Reading and writing the delimited tables a run works with:
//! - **Input tables**: header row required; columns are located by name
//! - **Result table**: written with atomic save semantics, so a failed run
//!   never leaves a partial or truncated output behind
//!
//! ## Example
//!
//! ```rust,no_run
//! use combo_core::driver::ResultRow;
//! use combo_core::file_io::save_results;
//! use combo_core::loads::LoadVector;
//! use std::path::Path;
//!
//! let rows = vec![ResultRow::new(0, 0, LoadVector::new([2.0, 0.0, 0.0, 0.0, 0.0, 0.0]))];
//! save_results(&rows, Path::new("combined.csv"), b',')?;
//! # Ok::<(), combo_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use crate::driver::ResultRow;
use crate::errors::{CalcError, CalcResult};

/// Header of the result table
pub const RESULT_HEADER: [&str; 8] = ["PointID", "ComboID", "Fx", "Fy", "Fz", "Mx", "My", "Mz"];

/// Open a delimited table for reading and return it with its header row.
///
/// Field counts must match the header on every row.
pub(crate) fn open_table(path: &Path, delimiter: u8) -> CalcResult<(Reader<File>, StringRecord)> {
    let file = File::open(path)
        .map_err(|e| CalcError::file_access("open", path.display().to_string(), e.to_string()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| CalcError::from_csv(&path.display().to_string(), e))?
        .clone();

    debug!(path = %path.display(), columns = headers.len(), "opened table");
    Ok((reader, headers))
}

/// Position of a named column in the header row.
pub(crate) fn column_index(headers: &StringRecord, path: &Path, name: &str) -> CalcResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CalcError::missing_column(path.display().to_string(), name))
}

/// Render a real the way the result table stores it: shortest form that
/// parses back to the same value (`2`, `0.5`, `-1.25`, `NaN`, `inf`).
pub fn format_real(value: f64) -> String {
    value.to_string()
}

/// Save the result table with atomic write semantics.
///
/// The save process:
/// 1. Write header and rows to a new temporary sibling (`<name>.<pid>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
///
/// If any step fails the temporary file is removed and `path` is untouched.
/// An existing file at the temporary path is never overwritten or removed.
pub fn save_results(rows: &[ResultRow], path: &Path, delimiter: u8) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);
    let tmp_display = tmp_path.display().to_string();

    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => {
                CalcError::file_access("create temp file", tmp_display.clone(), "file already exists")
            }
            _ => CalcError::file_access("create temp file", tmp_display.clone(), e.to_string()),
        })?;

    if let Err(e) = write_table(rows, file, &tmp_display, delimiter) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_access("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), rows = rows.len(), "saved result table");
    Ok(())
}

fn write_table(rows: &[ResultRow], file: File, tmp_display: &str, delimiter: u8) -> CalcResult<()> {
    let write_err = |e: csv::Error| CalcError::file_access("write temp file", tmp_display, e.to_string());

    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(file);
    writer.write_record(RESULT_HEADER).map_err(write_err)?;

    for row in rows {
        writer.write_record(result_record(row)).map_err(write_err)?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| CalcError::file_access("flush temp file", tmp_display, e.to_string()))?;

    file.sync_all()
        .map_err(|e| CalcError::file_access("sync temp file", tmp_display, e.to_string()))
}

fn result_record(row: &ResultRow) -> Vec<String> {
    let mut record = Vec::with_capacity(RESULT_HEADER.len());
    record.push(row.point_index.to_string());
    record.push(row.combo_index.to_string());
    record.extend(row.vector.values().iter().map(|v| format_real(*v)));
    record
}

/// Temporary sibling used while saving: `out.csv` becomes `out.csv.<pid>.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("results"));
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadVector;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("combo_file_io_{}_{}.csv", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        let path = Path::new("/data/out/results.csv");
        let expected = format!("/data/out/results.csv.{}.tmp", std::process::id());
        assert_eq!(tmp_path_for(path), Path::new(&expected));
    }

    #[test]
    fn test_save_results_keeps_foreign_tmp_file() {
        let path = temp_path("foreign_tmp");
        let tmp_path = tmp_path_for(&path);
        fs::write(&tmp_path, "not ours").unwrap();

        let rows = vec![ResultRow::new(0, 0, LoadVector::ZERO)];
        let err = save_results(&rows, &path, b',').unwrap_err();
        assert_eq!(err.error_code(), "FILE_ACCESS");
        assert_eq!(fs::read_to_string(&tmp_path).unwrap(), "not ours");
        assert!(!path.exists());

        let _ = fs::remove_file(&tmp_path);
    }

    #[test]
    fn test_save_results_ignores_plain_tmp_sibling() {
        let path = temp_path("plain_tmp");
        let mut plain = path.clone().into_os_string();
        plain.push(".tmp");
        let plain = PathBuf::from(plain);
        fs::write(&plain, "user data").unwrap();

        save_results(&[ResultRow::new(0, 0, LoadVector::ZERO)], &path, b',').unwrap();
        assert_eq!(fs::read_to_string(&plain).unwrap(), "user data");
        assert!(path.exists());

        let _ = fs::remove_file(&plain);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(2.0), "2");
        assert_eq!(format_real(0.5), "0.5");
        assert_eq!(format_real(-1.25), "-1.25");
        assert_eq!(format_real(f64::NAN), "NaN");
        assert_eq!(format_real(f64::INFINITY), "inf");
    }

    #[test]
    fn test_save_results_layout() {
        let path = temp_path("layout");
        let rows = vec![
            ResultRow::new(0, 0, LoadVector::new([2.0, 0.0, 0.0, 0.0, 0.0, 0.0])),
            ResultRow::new(0, 1, LoadVector::new([0.5, -1.0, 0.0, 0.0, 0.0, 3.0])),
        ];

        save_results(&rows, &path, b',').unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "PointID,ComboID,Fx,Fy,Fz,Mx,My,Mz\n0,0,2,0,0,0,0,0\n0,1,0.5,-1,0,0,0,3\n"
        );
        assert!(!tmp_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_results_custom_delimiter() {
        let path = temp_path("semicolon");
        let rows = vec![ResultRow::new(3, 2, LoadVector::new([1.0; 6]))];

        save_results(&rows, &path, b';').unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("PointID;ComboID;Fx;"));
        assert!(text.ends_with("3;2;1;1;1;1;1;1\n"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_results_unwritable_leaves_nothing() {
        let dir = temp_dir().join(format!("combo_missing_dir_{}", std::process::id()));
        let path = dir.join("out.csv");

        let err = save_results(&[], &path, b',').unwrap_err();
        assert_eq!(err.error_code(), "FILE_ACCESS");
        assert!(!path.exists());
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_open_table_missing_file() {
        let err = open_table(Path::new("/definitely/not/here.csv"), b',').unwrap_err();
        assert_eq!(err.error_code(), "FILE_ACCESS");
    }

    #[test]
    fn test_column_index() {
        let headers = StringRecord::from(vec!["PointID", "LoadType", "Fx"]);
        let path = Path::new("points.csv");
        assert_eq!(column_index(&headers, path, "Fx").unwrap(), 2);
        assert_eq!(
            column_index(&headers, path, "Mz").unwrap_err(),
            CalcError::missing_column("points.csv", "Mz")
        );
    }
}
