#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid loading system that turns grid files into classified cell rows.
//!
//! Two entry points are offered. [`load_grid`] keeps the forgiving behaviour
//! where an unreadable file simply produces an empty grid, while
//! [`read_grid`] reports why the file could not be read.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};
use trashbot_core::Grid;

/// Errors raised by [`read_grid`].
#[derive(Debug, Error)]
pub enum GridLoadError {
    /// The grid file does not exist.
    #[error("grid file {} does not exist", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The grid file exists but could not be read.
    #[error("failed to read grid file {}", path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl GridLoadError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Loads the grid stored at `path`, yielding an empty grid when it cannot be read.
#[must_use]
pub fn load_grid(path: impl AsRef<Path>) -> Grid {
    match read_grid(path) {
        Ok(grid) => grid,
        Err(error) => {
            warn!(%error, "falling back to an empty grid");
            Grid::default()
        }
    }
}

/// Loads the grid stored at `path`, reporting missing or unreadable files.
pub fn read_grid(path: impl AsRef<Path>) -> Result<Grid, GridLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GridLoadError::from_io(path, source))?;
    let grid = parse_reader(BufReader::new(file))
        .map_err(|source| GridLoadError::from_io(path, source))?;
    debug!(
        path = %path.display(),
        rows = grid.row_count(),
        width = grid.nominal_width(),
        "grid loaded"
    );
    Ok(grid)
}

/// Classifies every line produced by the reader, one row per line.
///
/// Lines are split on `\n` with one trailing `\r` removed. Bytes that are not
/// valid UTF-8 classify as walls instead of failing the read.
pub fn parse_reader(reader: impl BufRead) -> io::Result<Grid> {
    let mut lines = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            let _ = line.pop();
        }
        lines.push(String::from_utf8_lossy(&line).into_owned());
    }
    Ok(Grid::from_lines(lines))
}
