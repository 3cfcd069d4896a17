//! Grid data file tests - saving, loading, size normalization, bad input

mod common;

use std::fs;

use cellgrid::grid::{CellGrid, CellPos, GridDataError, GridDataStore, GridSize, LoadOutcome};
use common::{temp_dir, test_model_at};

const GLIDER_4X4: &str = "\t0\t1\t2\t3\n\
                          0\t0\t1\t0\t0\n\
                          1\t0\t0\t1\t0\n\
                          2\t1\t1\t1\t0\n\
                          3\t0\t0\t0\t0\n";

fn glider() -> CellGrid {
    CellGrid::from_rows(&[[0u8, 1, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]])
}

fn loaded(outcome: LoadOutcome) -> CellGrid {
    match outcome {
        LoadOutcome::Loaded(grid) => grid,
        LoadOutcome::Missing { file_name } => panic!("{} unexpectedly missing", file_name),
    }
}

// ========================================================================
// Saving
// ========================================================================

#[test]
fn test_save_writes_labelled_rows() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    let store = GridDataStore::new(&path);

    store
        .save(&CellGrid::from_rows(&[[0u8, 1, 0], [1, 0, 0]]))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\t0\t1\t2\n0\t0\t1\t0\n1\t1\t0\t0\n"
    );
}

#[test]
fn test_save_then_load_restores_cells() {
    let dir = temp_dir();
    let store = GridDataStore::new(dir.path().join("grid.csv"));
    let grid = glider();

    store.save(&grid).unwrap();
    let restored = loaded(store.load(GridSize::new(4, 4)).unwrap());

    assert_eq!(restored, grid);
    assert_eq!(restored.alive_count(), 5);
}

#[test]
fn test_save_replaces_existing_file_without_leftovers() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4).unwrap();

    GridDataStore::new(&path)
        .save(&CellGrid::new(GridSize::new(2, 1)))
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "\t0\t1\n0\t0\t0\n");
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "temporary file left behind");
}

#[test]
#[cfg(unix)]
fn test_save_keeps_existing_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    GridDataStore::new(&path)
        .save(&CellGrid::new(GridSize::new(1, 1)))
        .unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
    assert_eq!(fs::read_to_string(&path).unwrap(), "\t0\n0\t0\n");
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = temp_dir();
    let store = GridDataStore::new(dir.path().join("nope").join("grid.csv"));

    let err = store.save(&glider()).unwrap_err();
    assert!(matches!(err, GridDataError::Io { .. }));
    assert_eq!(err.line(), None);
}

// ========================================================================
// Loading
// ========================================================================

#[test]
fn test_load_missing_file_reports_base_name() {
    let dir = temp_dir();
    let store = GridDataStore::new(dir.path().join("griddata.csv"));

    let outcome = store.load(GridSize::new(5, 5)).unwrap();
    assert_eq!(
        outcome,
        LoadOutcome::Missing {
            file_name: "griddata.csv".to_string()
        }
    );
}

#[test]
fn test_load_pads_smaller_file() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4).unwrap();

    let grid = loaded(GridDataStore::new(&path).load(GridSize::new(5, 5)).unwrap());

    assert_eq!(grid.size(), GridSize::new(5, 5));
    assert!(grid.get(CellPos::new(1, 0)));
    assert!(grid.get(CellPos::new(2, 2)));
    assert_eq!(grid.alive_count(), 5);
    assert!(grid.row(4).iter().all(|alive| !alive));
    assert!((0..5).all(|row| !grid.get(CellPos::new(4, row))));
}

#[test]
fn test_load_truncates_larger_file() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4).unwrap();

    let grid = loaded(GridDataStore::new(&path).load(GridSize::new(2, 2)).unwrap());

    assert_eq!(grid, CellGrid::from_rows(&[[0u8, 1], [0, 0]]));
}

#[test]
fn test_load_accepts_crlf_line_endings() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4.replace('\n', "\r\n")).unwrap();

    let grid = loaded(GridDataStore::new(&path).load(GridSize::new(4, 4)).unwrap());
    assert_eq!(grid, glider());
}

#[test]
fn test_load_skips_row_labels_unchecked() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, "\t0\t1\nabc\t1\t0\n").unwrap();

    let grid = loaded(GridDataStore::new(&path).load(GridSize::new(2, 1)).unwrap());
    assert_eq!(grid, CellGrid::from_rows(&[[1u8, 0]]));
}

#[test]
fn test_load_rejects_non_binary_cell() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, "\t0\t1\n0\t0\t1\n1\t1\tx\n").unwrap();

    let err = GridDataStore::new(&path)
        .load(GridSize::new(2, 2))
        .unwrap_err();

    match &err {
        GridDataError::InvalidCell { column, token, .. } => {
            assert_eq!(*column, 2);
            assert_eq!(token, "x");
        }
        other => panic!("expected InvalidCell, got {:?}", other),
    }
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("\"x\""));
}

// ========================================================================
// Model integration
// ========================================================================

#[test]
fn test_model_load_missing_file_clears_grid() {
    let dir = temp_dir();
    let mut model = test_model_at(&dir.path().join("griddata.csv"));
    model.grid.set(CellPos::new(3, 3), true);
    model.mark_drawn();

    let missing = model.load_grid().unwrap();

    assert_eq!(missing.as_deref(), Some("griddata.csv"));
    assert_eq!(model.grid.alive_count(), 0);
    assert!(model.needs_redraw());
}

#[test]
fn test_model_load_error_keeps_grid() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, "\t0\n0\t7\n").unwrap();
    let mut model = test_model_at(&path);
    model.grid.set(CellPos::new(3, 3), true);

    assert!(model.load_grid().is_err());
    assert!(model.grid.get(CellPos::new(3, 3)));
}

#[test]
fn test_model_loads_small_pattern_into_managed_grid() {
    let dir = temp_dir();
    let path = dir.path().join("grid.csv");
    fs::write(&path, GLIDER_4X4).unwrap();
    let mut model = test_model_at(&path);

    assert_eq!(model.load_grid().unwrap(), None);

    assert_eq!(model.grid.size(), model.viewport.managed_size());
    assert_eq!(model.grid.alive_count(), 5);
    assert!(model.grid.get(CellPos::new(0, 2)));
}
