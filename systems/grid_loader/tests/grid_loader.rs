use std::fs;

use trashbot_core::CellType;
use trashbot_system_grid_loader::{load_grid, read_grid, GridLoadError};

#[test]
fn missing_file_loads_as_empty_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = load_grid(dir.path().join("absent.txt"));

    assert_eq!(grid.row_count(), 0, "missing file must yield zero rows");
}

#[test]
fn strict_reader_reports_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let error = read_grid(dir.path().join("absent.txt")).expect_err("file is missing");

    assert!(
        matches!(error, GridLoadError::NotFound { .. }),
        "expected NotFound, got {error:?}"
    );
}

#[test]
fn strict_reader_distinguishes_empty_file_from_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").expect("write fixture");

    let grid = read_grid(&path).expect("empty file is readable");

    assert!(grid.is_empty());
}

#[test]
fn loads_rows_in_file_order() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("grid.txt");
    fs::write(&path, "..#\n===\n").expect("write fixture");

    let grid = load_grid(&path);

    assert_eq!(
        grid.rows(),
        &[
            vec![CellType::Sidewalk, CellType::Sidewalk, CellType::Wall],
            vec![CellType::Road, CellType::Road, CellType::Road],
        ]
    );
}

#[test]
fn unknown_symbols_load_as_walls_and_rows_may_be_jagged() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("jagged.txt");
    fs::write(&path, "=?=\n.\n").expect("write fixture");

    let grid = load_grid(&path);

    assert_eq!(grid.nominal_width(), 3);
    assert_eq!(grid.cell(1, 0), Some(CellType::Wall));
    assert_eq!(grid.rows()[1], vec![CellType::Sidewalk]);
}

#[test]
fn non_utf8_bytes_load_as_walls_instead_of_discarding_the_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("binary.txt");
    fs::write(&path, b"..\xFF#\n===\n").expect("write fixture");

    let grid = load_grid(&path);

    assert_eq!(grid.row_count(), 2);
    assert_eq!(
        grid.rows()[0],
        vec![
            CellType::Sidewalk,
            CellType::Sidewalk,
            CellType::Wall,
            CellType::Wall
        ]
    );
    assert_eq!(grid.rows()[1], vec![CellType::Road; 3]);
}

#[test]
fn directory_path_is_not_a_readable_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let grid = load_grid(dir.path());

    assert!(grid.is_empty());
}
