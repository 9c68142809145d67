use std::{fs, process::Command};

fn trashbot() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_trashbot"));
    let _ = command.env("RUST_LOG", "off");
    command
}

#[test]
fn generate_writes_city_block_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("city.txt");

    let status = trashbot()
        .arg("generate")
        .arg("--output")
        .arg(&output)
        .args([
            "--housing", "1", "--sidewalk", "1", "--road", "1", "--blocks-x", "1", "--blocks-y",
            "1",
        ])
        .status()
        .expect("failed to launch trashbot");

    assert!(status.success());
    let contents = fs::read_to_string(&output).expect("generated grid exists");
    assert_eq!(contents, "=====\n=...=\n=.#.=\n=...=\n=====\n");
}

#[test]
fn generate_rejects_non_positive_parameters() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("city.txt");

    let result = trashbot()
        .arg("generate")
        .arg("--output")
        .arg(&output)
        .args([
            "--housing", "0", "--sidewalk", "1", "--road", "1", "--blocks-x", "1", "--blocks-y",
            "1",
        ])
        .output()
        .expect("failed to launch trashbot");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("housing must be positive"));
    assert!(!output.exists());
}

#[test]
fn generate_rejects_layouts_beyond_cell_limit() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("city.txt");

    let result = trashbot()
        .arg("generate")
        .arg("--output")
        .arg(&output)
        .args([
            "--housing",
            "2000000000",
            "--sidewalk",
            "1",
            "--road",
            "1",
            "--blocks-x",
            "1",
            "--blocks-y",
            "1",
        ])
        .output()
        .expect("failed to launch trashbot");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("exceeds the limit"));
    assert!(!output.exists());
}

#[test]
fn inspect_reports_dimensions_and_counts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = dir.path().join("grid.txt");
    fs::write(&grid, "..#\n===\n").expect("write fixture");

    let result = trashbot()
        .arg("inspect")
        .arg("--grid")
        .arg(&grid)
        .output()
        .expect("failed to launch trashbot");

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("2 rows, nominal width 3"), "{stdout}");
    assert!(stdout.contains("Wall: 1"), "{stdout}");
    assert!(stdout.contains("Road: 3"), "{stdout}");
    assert!(stdout.contains("Sidewalk: 2"), "{stdout}");
}

#[test]
fn inspect_fails_for_missing_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let result = trashbot()
        .arg("inspect")
        .arg("--grid")
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("failed to launch trashbot");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("does not exist"));
}
