//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const POINTS: &str = "PointID,LoadType,Fx,Fy,Fz,Mx,My,Mz\nP1,D,1,0,0,0,0,0\n";
const COMBOS: &str = "D,EX,EY,EZ,T\n2,0,0,0,0\n";

fn fixtures(dir: &TempDir, points: &str, combos: &str) -> (PathBuf, PathBuf, PathBuf) {
    let point_file = dir.path().join("points.csv");
    let combo_file = dir.path().join("combos.csv");
    fs::write(&point_file, points).expect("write points");
    fs::write(&combo_file, combos).expect("write combos");
    (point_file, combo_file, dir.path().join("out.csv"))
}

fn combo() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("combo"))
}

#[test]
fn test_cli_version() {
    combo().arg("--version").assert().success().stdout(predicate::str::contains("combo"));
}

#[test]
fn test_cli_help() {
    combo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("load combination"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_run_writes_result_table() {
    let dir = TempDir::new().expect("temp dir");
    let (points, combos, out) = fixtures(&dir, POINTS, COMBOS);

    combo()
        .arg("run")
        .arg("--points")
        .arg(&points)
        .arg("--combos")
        .arg(&combos)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 rows"));

    let text = fs::read_to_string(&out).expect("read output");
    assert_eq!(text, "PointID,ComboID,Fx,Fy,Fz,Mx,My,Mz\n0,0,2,0,0,0,0,0\n");
}

#[test]
fn test_run_json_summary() {
    let dir = TempDir::new().expect("temp dir");
    let (points, combos, out) = fixtures(&dir, POINTS, COMBOS);

    combo()
        .arg("run")
        .arg("--points")
        .arg(&points)
        .arg("--combos")
        .arg(&combos)
        .arg("--output")
        .arg(&out)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rows\": 1"))
        .stdout(predicate::str::contains("\"combinations\": 1"));
}

#[test]
fn test_run_requires_paths() {
    combo()
        .args(["run", "--points", "points.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--combos"));
}

#[test]
fn test_rust_log_enables_debug_output() {
    let dir = TempDir::new().expect("temp dir");
    let (points, combos, out) = fixtures(&dir, POINTS, COMBOS);

    combo()
        .env("RUST_LOG", "debug")
        .arg("run")
        .arg("--points")
        .arg(&points)
        .arg("--combos")
        .arg(&combos)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("opened table"));
}

#[test]
fn test_default_log_level_is_quiet() {
    let dir = TempDir::new().expect("temp dir");
    let (points, combos, out) = fixtures(&dir, POINTS, COMBOS);

    combo()
        .env_remove("RUST_LOG")
        .arg("run")
        .arg("--points")
        .arg(&points)
        .arg("--combos")
        .arg(&combos)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_missing_column_fails_without_output() {
    let dir = TempDir::new().expect("temp dir");
    let (points, combos, out) = fixtures(&dir, POINTS, "D,EX,EY,EZ\n1,0,0,0\n");

    combo()
        .arg("run")
        .arg("--points")
        .arg(&points)
        .arg("--combos")
        .arg(&combos)
        .arg("--output")
        .arg(&out)
        .arg("--json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column 'T'"))
        .stderr(predicate::str::contains("\"type\": \"MissingColumn\""));

    assert!(!out.exists());
}

#[test]
fn test_run_from_config_with_override() {
    let dir = TempDir::new().expect("temp dir");
    let points_semicolon = "PointID;LoadType;Fx;Fy;Fz;Mx;My;Mz\n7;T;0;0;0;0;0;4\n";
    let combos_semicolon = "D;EX;EY;EZ;T\n1;0;0;0;0.5\n";
    let (points, combos, out) = fixtures(&dir, points_semicolon, combos_semicolon);

    let config_file = dir.path().join("job.json");
    let config = serde_json::json!({
        "point_file": points,
        "combo_file": combos,
        "output_file": dir.path().join("ignored.csv"),
        "delimiter": ";"
    });
    fs::write(&config_file, config.to_string()).expect("write config");

    combo()
        .arg("run")
        .arg("--config")
        .arg(&config_file)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let text = fs::read_to_string(&out).expect("read output");
    assert_eq!(text, "PointID;ComboID;Fx;Fy;Fz;Mx;My;Mz\n0;0;0;0;0;0;0;2\n");
    assert!(!dir.path().join("ignored.csv").exists());
}
