#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural city-block grid generation.
//!
//! A generated grid repeats a square block pattern: a road band, a sidewalk
//! band, a housing interior and a closing sidewalk band along each axis. One
//! extra road band seals the right and bottom edges.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{error, info};
use trashbot_core::{CellType, Grid};

/// Largest number of cells a generated grid may contain.
pub const MAX_GRID_CELLS: u64 = 64 * 1024 * 1024;

/// Errors raised while validating or writing a generated grid.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A layout parameter was zero or negative.
    #[error("{parameter} must be positive (received {value})")]
    NonPositive {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// Value that failed validation.
        value: i64,
    },
    /// A layout parameter does not fit the generator's integer range.
    #[error("grid dimensions overflow for the requested layout")]
    Overflow,
    /// The layout describes more cells than [`MAX_GRID_CELLS`].
    #[error("{width}x{height} grid exceeds the limit of {limit} cells")]
    TooLarge {
        /// Columns the layout would produce.
        width: u64,
        /// Rows the layout would produce.
        height: u64,
        /// Cell limit that was exceeded.
        limit: u64,
    },
    /// The destination file could not be opened or written.
    #[error("failed to write grid file {}", path.display())]
    Io {
        /// Destination that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Validated parameters describing a repeating city-block pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    housing: u32,
    sidewalk: u32,
    road: u32,
    blocks_x: u32,
    blocks_y: u32,
}

impl BlockLayout {
    /// Validates the provided band widths and block counts.
    ///
    /// Every parameter must be strictly positive and the resulting grid may
    /// hold at most [`MAX_GRID_CELLS`] cells.
    pub fn new(
        housing: i64,
        sidewalk: i64,
        road: i64,
        blocks_x: i64,
        blocks_y: i64,
    ) -> Result<Self, GenerationError> {
        let layout = Self {
            housing: positive("housing", housing)?,
            sidewalk: positive("sidewalk", sidewalk)?,
            road: positive("road", road)?,
            blocks_x: positive("blocks_x", blocks_x)?,
            blocks_y: positive("blocks_y", blocks_y)?,
        };
        layout.check_size()?;
        Ok(layout)
    }

    /// Period of the pattern: one road band, two sidewalk bands and the housing.
    #[must_use]
    pub fn unit(&self) -> u64 {
        u64::from(self.road) + 2 * u64::from(self.sidewalk) + u64::from(self.housing)
    }

    /// Number of columns in the generated grid.
    #[must_use]
    pub fn width(&self) -> u64 {
        u64::from(self.blocks_x)
            .saturating_mul(self.unit())
            .saturating_add(u64::from(self.road))
    }

    /// Number of rows in the generated grid.
    #[must_use]
    pub fn height(&self) -> u64 {
        u64::from(self.blocks_y)
            .saturating_mul(self.unit())
            .saturating_add(u64::from(self.road))
    }

    /// Classification of the cell at the provided column and row.
    #[must_use]
    pub fn cell_at(&self, x: u64, y: u64) -> CellType {
        let unit = self.unit();
        let x_band = self.band(x % unit);
        let y_band = self.band(y % unit);

        match (x_band, y_band) {
            (Band::Road, _) | (_, Band::Road) => CellType::Road,
            (Band::Sidewalk, _) | (_, Band::Sidewalk) => CellType::Sidewalk,
            (Band::Housing, Band::Housing) => CellType::Wall,
        }
    }

    /// Produces the textual grid, each row terminated by a line break.
    #[must_use]
    pub fn render(&self) -> String {
        let mut contents = String::new();
        for y in 0..self.height() {
            self.push_row(y, &mut contents);
        }
        contents
    }

    /// Streams the textual grid into `writer` one row at a time.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        let mut line = String::new();
        for y in 0..self.height() {
            line.clear();
            self.push_row(y, &mut line);
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()
    }

    /// Produces the classified grid without touching the filesystem.
    #[must_use]
    pub fn grid(&self) -> Grid {
        let (width, height) = (self.width(), self.height());
        let rows = (0..height)
            .map(|y| (0..width).map(|x| self.cell_at(x, y)).collect())
            .collect();
        Grid::from_rows(rows)
    }

    fn check_size(&self) -> Result<(), GenerationError> {
        let (width, height) = (self.width(), self.height());
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => Err(GenerationError::TooLarge {
                width,
                height,
                limit: MAX_GRID_CELLS,
            }),
        }
    }

    fn push_row(&self, y: u64, out: &mut String) {
        for x in 0..self.width() {
            out.push(self.cell_at(x, y).symbol());
        }
        out.push('\n');
    }

    fn band(&self, offset: u64) -> Band {
        let road = u64::from(self.road);
        let sidewalk = u64::from(self.sidewalk);
        let housing = u64::from(self.housing);

        if offset < road {
            Band::Road
        } else if offset < road + sidewalk || offset >= road + sidewalk + housing {
            Band::Sidewalk
        } else {
            Band::Housing
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Band {
    Road,
    Sidewalk,
    Housing,
}

fn positive(parameter: &'static str, value: i64) -> Result<u32, GenerationError> {
    if value <= 0 {
        return Err(GenerationError::NonPositive { parameter, value });
    }
    u32::try_from(value).map_err(|_| GenerationError::Overflow)
}

/// Writes the layout's pattern to `path`, truncating any existing file.
///
/// Rows are streamed as they are generated. When the destination cannot be
/// opened the failure is logged and returned without writing anything.
pub fn write_grid_file(
    path: impl AsRef<Path>,
    layout: &BlockLayout,
) -> Result<(), GenerationError> {
    let path = path.as_ref();
    let result = File::create(path).and_then(|file| layout.write_to(BufWriter::new(file)));

    match result {
        Ok(()) => {
            info!(
                path = %path.display(),
                width = layout.width(),
                height = layout.height(),
                "grid generated"
            );
            Ok(())
        }
        Err(source) => {
            error!(path = %path.display(), error = %source, "unable to write generated grid");
            Err(GenerationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
