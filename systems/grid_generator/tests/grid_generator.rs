use std::fs;

use trashbot_core::CellType;
use trashbot_system_grid_generator::{write_grid_file, BlockLayout, GenerationError};
use trashbot_system_grid_loader::load_grid;

#[test]
fn single_block_grid_has_road_border_and_housing_center() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("city.txt");
    let layout = BlockLayout::new(1, 1, 1, 1, 1).expect("valid layout");

    write_grid_file(&path, &layout).expect("grid written");
    let grid = load_grid(&path);

    assert_eq!(grid.row_count(), 5);
    assert!(grid.rows().iter().all(|row| row.len() == 5));
    for index in 0..5 {
        assert_eq!(grid.cell(index, 0), Some(CellType::Road));
        assert_eq!(grid.cell(index, 4), Some(CellType::Road));
        assert_eq!(grid.cell(0, index), Some(CellType::Road));
        assert_eq!(grid.cell(4, index), Some(CellType::Road));
    }
    assert_eq!(grid.cell(2, 2), Some(CellType::Wall));
}

#[test]
fn generated_file_round_trips_through_loader() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("city.txt");
    let layout = BlockLayout::new(5, 2, 3, 3, 2).expect("valid layout");

    write_grid_file(&path, &layout).expect("grid written");

    assert_eq!(load_grid(&path), layout.grid());
}

#[test]
fn existing_file_is_truncated() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("city.txt");
    fs::write(&path, "x".repeat(4096)).expect("write fixture");
    let layout = BlockLayout::new(1, 1, 1, 1, 1).expect("valid layout");

    write_grid_file(&path, &layout).expect("grid written");

    let contents = fs::read_to_string(&path).expect("read generated grid");
    assert_eq!(contents, layout.render());
}

#[test]
fn unwritable_destination_reports_error_without_creating_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing").join("city.txt");
    let layout = BlockLayout::new(1, 1, 1, 1, 1).expect("valid layout");

    let error = write_grid_file(&path, &layout).expect_err("parent directory is missing");

    assert!(matches!(error, GenerationError::Io { .. }));
    assert!(!path.exists(), "no file may be produced on failure");
}

#[test]
fn multi_block_grid_repeats_pattern() {
    let layout = BlockLayout::new(2, 1, 1, 2, 2).expect("valid layout");
    let grid = layout.grid();
    let unit = layout.unit() as usize;

    assert_eq!(grid.row_count(), 2 * unit + 1);
    for row in 0..unit {
        for column in 0..unit {
            assert_eq!(
                grid.cell(column, row),
                grid.cell(column + unit, row + unit),
                "pattern must repeat at ({column}, {row})"
            );
        }
    }
}
