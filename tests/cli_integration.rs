//! CLI integration tests for edaflow.
//!
//! These tests drive the binary against throwaway projects. Builds use
//! `true`/`false` as the pipeline runner so no FPGA tools are needed.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the edaflow binary command, isolated from the user's global config.
fn edaflow(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("edaflow").unwrap();
    cmd.env("EDAFLOW_HOME", home.join(".edaflow-home"));
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a project with the given `[[files]]` entries.
fn write_project(dir: &Path, files: &[(&str, &str)]) {
    let mut manifest = String::from("[project]\nname = \"blinky\"\ntoplevel = \"top\"\n");
    for (path, file_type) in files {
        manifest.push_str(&format!(
            "\n[[files]]\npath = \"{}\"\nfile-type = \"{}\"\n",
            path, file_type
        ));
    }
    fs::write(dir.join("Edaflow.toml"), manifest).unwrap();
}

fn write_runner_config(dir: &Path, make: &str) {
    fs::create_dir_all(dir.join(".edaflow")).unwrap();
    fs::write(
        dir.join(".edaflow/config.toml"),
        format!("[tools]\nmake = \"{}\"\n", make),
    )
    .unwrap();
}

// ============================================================================
// edaflow configure
// ============================================================================

#[test]
fn test_configure_writes_artifacts() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .success();

    let work_root = tmp.path().join("build/blinky");
    assert!(work_root.join("Makefile").exists());

    let script = fs::read_to_string(work_root.join("blinky.ys")).unwrap();
    assert!(script.contains("read_verilog ../../top.v"));
    assert!(script.contains("synth_ice40 -blif blinky.blif -top top"));

    let config_mk = fs::read_to_string(work_root.join("config.mk")).unwrap();
    assert!(config_mk.contains("TARGET   := blinky"));
    assert!(config_mk.contains("PCF_FILE := ../../pins.pcf"));
}

#[test]
fn test_configure_param_override() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .args(["configure", "--param", "WIDTH=16", "--param", "NAME=uart"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let script = fs::read_to_string(tmp.path().join("build/blinky/blinky.ys")).unwrap();
    assert!(script.contains("chparam -set NAME \"uart\" $abstract\\top"));
    assert!(script.contains("chparam -set WIDTH 16 $abstract\\top"));
}

#[test]
fn test_configure_json_lists_artifacts() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .args(["configure", "--json"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"artifacts\""))
        .stdout(predicate::str::contains("blinky.ys"))
        .stdout(predicate::str::contains("\"sha256\""));
}

#[test]
fn test_configure_missing_constraint_file() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource")]);

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing constraint file"));

    // The script is written before validation
    assert!(tmp.path().join("build/blinky/blinky.ys").exists());
    assert!(!tmp.path().join("build/blinky/config.mk").exists());
}

#[test]
fn test_configure_multiple_constraint_files() {
    let tmp = temp_dir();
    write_project(
        tmp.path(),
        &[("top.v", "verilogSource"), ("a.pcf", "PCF"), ("b.pcf", "PCF")],
    );

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple constraint files"))
        .stderr(predicate::str::contains("a.pcf"))
        .stderr(predicate::str::contains("b.pcf"));
}

#[test]
fn test_manifest_path_flag() {
    let tmp = temp_dir();
    let project = tmp.path().join("hw");
    fs::create_dir_all(&project).unwrap();
    write_project(&project, &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .args(["--manifest-path", "hw/Edaflow.toml", "configure"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(project.join("build/blinky/config.mk").exists());
}

#[test]
fn test_missing_manifest() {
    let tmp = temp_dir();

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `Edaflow.toml`"));
}

// ============================================================================
// edaflow build
// ============================================================================

#[cfg(unix)]
#[test]
fn test_build_succeeds_when_runner_succeeds() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);
    write_runner_config(tmp.path(), "true");

    edaflow(tmp.path())
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished `blinky`"));

    assert!(tmp.path().join("build/blinky/config.mk").exists());
}

#[cfg(unix)]
#[test]
fn test_build_fails_when_runner_fails() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);
    write_runner_config(tmp.path(), "false");

    edaflow(tmp.path())
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 1"));
}

#[test]
fn test_build_no_configure_requires_configure() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .args(["build", "--no-configure"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not configured"));
}

// ============================================================================
// edaflow clean / backends / completions
// ============================================================================

#[test]
fn test_clean_all_removes_work_root() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .success();

    edaflow(tmp.path())
        .args(["clean", "--all"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join("build/blinky").exists());
}

#[test]
fn test_clean_all_keeps_project_used_as_work_root() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource"), ("pins.pcf", "PCF")]);
    let manifest = fs::read_to_string(tmp.path().join("Edaflow.toml")).unwrap();
    fs::write(
        tmp.path().join("Edaflow.toml"),
        manifest.replace("toplevel = \"top\"\n", "toplevel = \"top\"\nwork-root = \".\"\n"),
    )
    .unwrap();
    fs::write(tmp.path().join("top.v"), "module top; endmodule\n").unwrap();
    fs::write(tmp.path().join("pins.pcf"), "set_io led 1\n").unwrap();

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .success();
    assert!(tmp.path().join("config.mk").exists());

    edaflow(tmp.path())
        .args(["clean", "--all"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("Edaflow.toml").exists());
    assert!(tmp.path().join("top.v").exists());
    assert!(tmp.path().join("pins.pcf").exists());
    assert!(!tmp.path().join("Makefile").exists());
    assert!(!tmp.path().join("config.mk").exists());
    assert!(!tmp.path().join("blinky.ys").exists());
}

#[test]
fn test_clean_after_failed_configure() {
    let tmp = temp_dir();
    write_project(tmp.path(), &[("top.v", "verilogSource")]);
    // A runner that always fails shows clean does not invoke it
    write_runner_config(tmp.path(), "false");

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .failure();
    let work_root = tmp.path().join("build/blinky");
    assert!(work_root.join("Makefile").exists());

    edaflow(tmp.path())
        .arg("clean")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    assert!(!work_root.join("Makefile").exists());
    assert!(!work_root.join("blinky.ys").exists());
}

#[test]
fn test_errors_are_plain_when_piped() {
    let tmp = temp_dir();
    write_project(
        tmp.path(),
        &[("top.v", "verilogSource"), ("a.pcf", "PCF"), ("b.pcf", "PCF")],
    );

    edaflow(tmp.path())
        .arg("configure")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("help"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_backends_lists_icestorm() {
    let tmp = temp_dir();

    edaflow(tmp.path())
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::contains("icestorm"))
        .stdout(predicate::str::contains("yosys"));
}

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    edaflow(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edaflow"));
}
