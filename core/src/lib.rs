#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the TrashBot simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw device input
//! into [`InputEvent`] values, systems turn those into [`Command`] values, the
//! world executes commands via its `apply` entry point and broadcasts
//! [`Event`] values describing what changed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Impassable housing or boundary cell.
    Wall,
    /// Vehicle road cell.
    Road,
    /// Pedestrian sidewalk cell.
    Sidewalk,
}

impl CellType {
    /// Every cell classification in declaration order.
    pub const ALL: [CellType; 3] = [CellType::Wall, CellType::Road, CellType::Sidewalk];

    /// Classifies a grid file character.
    ///
    /// Unrecognised characters fall back to [`CellType::Wall`].
    #[must_use]
    pub const fn classify(symbol: char) -> Self {
        match symbol {
            '.' => Self::Sidewalk,
            '=' => Self::Road,
            _ => Self::Wall,
        }
    }

    /// Character written to grid files for this classification.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Road => '=',
            Self::Sidewalk => '.',
        }
    }
}

/// Rows of classified cells describing the simulated environment.
///
/// Rows are allowed to differ in length; consumers that need a single width
/// use [`Grid::nominal_width`], which reports the length of the first row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<CellType>>,
}

impl Grid {
    /// Creates a grid from pre-classified rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellType>>) -> Self {
        Self { rows }
    }

    /// Classifies every character of the provided text, one row per line.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        Self::from_lines(contents.lines())
    }

    /// Classifies the provided lines, one row per line.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = lines
            .into_iter()
            .map(|line| line.as_ref().chars().map(CellType::classify).collect())
            .collect();
        Self { rows }
    }

    /// Rows of the grid in top-to-bottom order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellType>] {
        &self.rows
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row, or zero for an empty grid.
    #[must_use]
    pub fn nominal_width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Reports whether the grid contains no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell stored at the provided column and row, if present.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<CellType> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Counts how many cells carry the provided classification.
    #[must_use]
    pub fn count(&self, cell_type: CellType) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| **cell == cell_type)
            .count()
    }
}

/// Unique identifier assigned to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Agent location expressed in whole grid cells.
///
/// Coordinates are signed because agents may wander off the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column offset from the grid origin.
    pub x: i32,
    /// Row offset from the grid origin.
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position translated by the provided delta.
    ///
    /// Coordinates clamp at the `i32` bounds instead of wrapping.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Unit delta along the grid axes for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Application screen that decides how input is routed and what is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Title menu offering navigation buttons.
    #[default]
    Menu,
    /// Placeholder for choosing a grid file.
    PickGrid,
    /// Grid view with the controllable agent.
    Simulation,
}

/// Abstract keys recognised by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Directional key moving the agent.
    Arrow(Direction),
    /// Returns to the menu from any other screen.
    Cancel,
    /// Terminates the application.
    Quit,
}

/// Input observed by an adapter during a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A recognised key was pressed.
    KeyPressed(Key),
    /// The primary pointer button was clicked at the provided screen position.
    PointerClicked {
        /// Horizontal screen coordinate in pixels.
        x: f32,
        /// Vertical screen coordinate in pixels.
        y: f32,
    },
    /// The window was asked to close.
    CloseRequested,
}

/// Axis-aligned rectangle expressed in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub width: f32,
    /// Vertical extent of the rectangle.
    pub height: f32,
}

impl ScreenRect {
    /// Creates a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reports whether the point lies within the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Placement of the menu title and buttons in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuLayout {
    /// Baseline origin of the title text.
    pub title_origin: (f32, f32),
    /// Bounds of the button that opens the grid picker.
    pub pick_grid: ScreenRect,
    /// Bounds of the button that starts the simulation.
    pub run_simulation: ScreenRect,
}

impl MenuLayout {
    /// Label drawn on the grid picker button.
    pub const PICK_GRID_LABEL: &'static str = "Pick Grid";
    /// Label drawn on the simulation button.
    pub const RUN_SIMULATION_LABEL: &'static str = "Run Simulation";
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            title_origin: (300.0, 200.0),
            pick_grid: ScreenRect::new(300.0, 300.0, 400.0, 80.0),
            run_simulation: ScreenRect::new(300.0, 420.0, 400.0, 80.0),
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the world's grid wholesale.
    ReplaceGrid {
        /// Grid that becomes authoritative.
        grid: Grid,
    },
    /// Requests that the application switch to the provided screen.
    SetScreen {
        /// Screen that should become active.
        screen: Screen,
    },
    /// Requests that an agent move by the provided delta measured in cells.
    MoveAgent {
        /// Identifier of the agent to move.
        agent: AgentId,
        /// Horizontal displacement in cells.
        dx: i32,
        /// Vertical displacement in cells.
        dy: i32,
    },
    /// Requests that the application terminate.
    RequestExit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new grid replaced the previous one.
    GridReplaced {
        /// Number of rows in the new grid.
        rows: usize,
        /// Length of the first row of the new grid.
        nominal_width: usize,
    },
    /// Announces that the active screen changed.
    ScreenChanged {
        /// Screen that was active before the change.
        from: Screen,
        /// Screen that is active after the change.
        to: Screen,
    },
    /// Confirms that an agent moved.
    AgentMoved {
        /// Identifier of the agent that moved.
        agent: AgentId,
        /// Position before the move.
        from: Position,
        /// Position after the move.
        to: Position,
    },
    /// Announces that the application should terminate.
    ExitRequested,
}
