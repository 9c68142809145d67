#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for TrashBot adapters.
//!
//! Scenes are flattened into an ordered list of [`DrawCommand`] values so
//! backends only need to know how to fill rectangles and print text.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use trashbot_core::{CellType, Grid, InputEvent, MenuLayout, Position, Screen, ScreenRect};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input gathered by adapters before updating the scene.
///
/// At most one event is reported per frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Event observed during the frame, if any.
    pub event: Option<InputEvent>,
}

impl FrameInput {
    /// Creates frame input carrying a single event.
    #[must_use]
    pub const fn with_event(event: InputEvent) -> Self {
        Self { event: Some(event) }
    }
}

/// Decision returned by the scene update closure for each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep running the frame loop.
    Continue,
    /// Stop the frame loop and close the window.
    Exit,
}

/// Colors assigned to each cell classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPalette {
    /// Fill used for wall and housing cells.
    pub wall: Color,
    /// Fill used for road cells.
    pub road: Color,
    /// Fill used for sidewalk cells.
    pub sidewalk: Color,
}

impl CellPalette {
    /// Fill color for the provided cell classification.
    #[must_use]
    pub const fn color(&self, cell_type: CellType) -> Color {
        match cell_type {
            CellType::Wall => self.wall,
            CellType::Road => self.road,
            CellType::Sidewalk => self.sidewalk,
        }
    }
}

impl Default for CellPalette {
    fn default() -> Self {
        Self {
            wall: Color::from_rgb_u8(70, 70, 255),
            road: Color::from_rgb_u8(71, 71, 71),
            sidewalk: Color::from_rgb_u8(178, 178, 178),
        }
    }
}

/// Describes how grid cells are laid out on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Edge length of a single cell in pixels.
    pub cell_size: f32,
    /// Colors used for each cell classification.
    pub palette: CellPalette,
}

impl GridPresentation {
    /// Default edge length of a cell in pixels.
    pub const DEFAULT_CELL_SIZE: f32 = 5.0;

    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_size` is not a positive finite number.
    pub fn new(cell_size: f32, palette: CellPalette) -> Result<Self, RenderingError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self { cell_size, palette })
    }

    /// Converts a cell position into the pixel position of its top-left corner.
    #[must_use]
    pub fn cell_origin(&self, column: f32, row: f32) -> Vec2 {
        Vec2::new(column, row) * self.cell_size
    }
}

impl Default for GridPresentation {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            palette: CellPalette::default(),
        }
    }
}

/// Agent rendered as a filled square anchored at its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentPresentation {
    /// Cell coordinates of the agent.
    pub position: Position,
    /// Edge length of the square measured in cells.
    pub size_in_cells: f32,
    /// Fill color of the square.
    pub color: Color,
}

impl AgentPresentation {
    /// Default edge length of the agent square measured in cells.
    pub const DEFAULT_SIZE_IN_CELLS: f32 = 2.0;

    /// Creates a new agent descriptor using the default size and color.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            size_in_cells: Self::DEFAULT_SIZE_IN_CELLS,
            color: Color::from_rgb_u8(255, 0, 0),
        }
    }
}

/// Menu content drawn on the title screen.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuPresentation {
    /// Title printed above the buttons.
    pub title: String,
    /// Placement of the title and buttons.
    pub layout: MenuLayout,
    /// Fill color of the buttons.
    pub button_color: Color,
    /// Color of the title and button labels.
    pub text_color: Color,
}

impl MenuPresentation {
    /// Font size of the title text.
    pub const TITLE_FONT_SIZE: f32 = 48.0;
    /// Font size of the button labels.
    pub const LABEL_FONT_SIZE: f32 = 32.0;

    /// Creates a menu descriptor with the default colors.
    #[must_use]
    pub fn new<T>(title: T, layout: MenuLayout) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            layout,
            button_color: Color::from_rgb_u8(70, 70, 70),
            text_color: Color::from_rgb_u8(255, 255, 255),
        }
    }
}

/// Scene description combining the active screen with its content.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Screen whose content should be drawn.
    pub screen: Screen,
    /// Grid drawn on the simulation screen.
    pub grid: Grid,
    /// Cell layout used for the grid and the agent.
    pub grid_presentation: GridPresentation,
    /// Agent drawn on top of the grid.
    pub agent: AgentPresentation,
    /// Title screen content.
    pub menu: MenuPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        screen: Screen,
        grid: Grid,
        grid_presentation: GridPresentation,
        agent: AgentPresentation,
        menu: MenuPresentation,
    ) -> Self {
        Self {
            screen,
            grid,
            grid_presentation,
            agent,
            menu,
        }
    }

    /// Pixel extent of the grid using the first row as the nominal width.
    #[must_use]
    pub fn grid_extent(&self) -> Vec2 {
        Vec2::new(
            self.grid.nominal_width() as f32,
            self.grid.row_count() as f32,
        ) * self.grid_presentation.cell_size
    }
}

/// Primitive drawing instruction produced from a scene.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Fills an axis-aligned rectangle.
    FillRect {
        /// Top-left corner in pixels.
        origin: Vec2,
        /// Width and height in pixels.
        size: Vec2,
        /// Fill color.
        color: Color,
    },
    /// Prints a line of text.
    Text {
        /// Text to print.
        text: String,
        /// Baseline origin in pixels.
        origin: Vec2,
        /// Font size in pixels.
        font_size: f32,
        /// Text color.
        color: Color,
    },
}

/// Flattens the scene into draw commands for its active screen.
///
/// Commands are ordered back to front.
#[must_use]
pub fn draw_list(scene: &Scene) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    match scene.screen {
        Screen::Menu => push_menu(&scene.menu, &mut commands),
        Screen::PickGrid => {}
        Screen::Simulation => {
            push_grid(&scene.grid, &scene.grid_presentation, &mut commands);
            push_agent(&scene.agent, &scene.grid_presentation, &mut commands);
        }
    }
    commands
}

fn push_menu(menu: &MenuPresentation, commands: &mut Vec<DrawCommand>) {
    let (title_x, title_y) = menu.layout.title_origin;
    commands.push(DrawCommand::Text {
        text: menu.title.clone(),
        origin: Vec2::new(title_x, title_y),
        font_size: MenuPresentation::TITLE_FONT_SIZE,
        color: menu.text_color,
    });

    let buttons = [
        (menu.layout.pick_grid, MenuLayout::PICK_GRID_LABEL),
        (menu.layout.run_simulation, MenuLayout::RUN_SIMULATION_LABEL),
    ];
    for (bounds, label) in buttons {
        push_button(bounds, label, menu, commands);
    }
}

fn push_button(
    bounds: ScreenRect,
    label: &str,
    menu: &MenuPresentation,
    commands: &mut Vec<DrawCommand>,
) {
    let border = 2.0;
    commands.push(DrawCommand::FillRect {
        origin: Vec2::new(bounds.x, bounds.y),
        size: Vec2::new(bounds.width, bounds.height),
        color: menu.button_color.lighten(0.3),
    });
    commands.push(DrawCommand::FillRect {
        origin: Vec2::new(bounds.x + border, bounds.y + border),
        size: Vec2::new(
            (bounds.width - 2.0 * border).max(0.0),
            (bounds.height - 2.0 * border).max(0.0),
        ),
        color: menu.button_color,
    });
    commands.push(DrawCommand::Text {
        text: label.to_owned(),
        origin: Vec2::new(
            bounds.x + 20.0,
            bounds.y + (bounds.height + MenuPresentation::LABEL_FONT_SIZE) * 0.5,
        ),
        font_size: MenuPresentation::LABEL_FONT_SIZE,
        color: menu.text_color,
    });
}

fn push_grid(grid: &Grid, presentation: &GridPresentation, commands: &mut Vec<DrawCommand>) {
    let size = Vec2::splat(presentation.cell_size);
    for (row, cells) in grid.rows().iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            commands.push(DrawCommand::FillRect {
                origin: presentation.cell_origin(column as f32, row as f32),
                size,
                color: presentation.palette.color(*cell),
            });
        }
    }
}

fn push_agent(
    agent: &AgentPresentation,
    presentation: &GridPresentation,
    commands: &mut Vec<DrawCommand>,
) {
    commands.push(DrawCommand::FillRect {
        origin: presentation.cell_origin(agent.position.x as f32, agent.position.y as f32),
        size: Vec2::splat(agent.size_in_cells * presentation.cell_size),
        color: agent.color,
    });
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting TrashBot scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure requests an exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// frame's input, may mutate the scene before it is drawn, and decides
    /// whether the loop keeps running.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell size must be positive to produce visible cells.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(screen: Screen, grid: Grid) -> Scene {
        Scene::new(
            screen,
            grid,
            GridPresentation::default(),
            AgentPresentation::new(Position::new(3, 1)),
            MenuPresentation::new("TrashBot", MenuLayout::default()),
        )
    }

    fn fill_rects(commands: &[DrawCommand]) -> Vec<(Vec2, Vec2, Color)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => Some((*origin, *size, *color)),
                DrawCommand::Text { .. } => None,
            })
            .collect()
    }

    #[test]
    fn grid_presentation_rejects_non_positive_cell_size() {
        for cell_size in [0.0, -4.0, f32::NAN] {
            let error = GridPresentation::new(cell_size, CellPalette::default())
                .expect_err("invalid cell size must be rejected");

            assert!(matches!(error, RenderingError::InvalidCellSize { .. }));
        }
    }

    #[test]
    fn grid_presentation_accepts_positive_cell_size() {
        let presentation =
            GridPresentation::new(8.0, CellPalette::default()).expect("positive cell size");

        assert_eq!(presentation.cell_origin(2.0, 3.0), Vec2::new(16.0, 24.0));
    }

    #[test]
    fn pick_grid_screen_draws_nothing() {
        let commands = draw_list(&scene(Screen::PickGrid, Grid::parse("==")));

        assert!(commands.is_empty());
    }

    #[test]
    fn menu_draws_title_and_both_buttons() {
        let commands = draw_list(&scene(Screen::Menu, Grid::default()));

        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::FillRect { .. } => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "TrashBot",
                MenuLayout::PICK_GRID_LABEL,
                MenuLayout::RUN_SIMULATION_LABEL
            ]
        );

        let layout = MenuLayout::default();
        let rects = fill_rects(&commands);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0].0, Vec2::new(layout.pick_grid.x, layout.pick_grid.y));
        assert_eq!(
            rects[2].0,
            Vec2::new(layout.run_simulation.x, layout.run_simulation.y)
        );
    }

    #[test]
    fn simulation_draws_grid_then_agent_on_top() {
        let commands = draw_list(&scene(Screen::Simulation, Grid::parse("=.#\n=")));
        let rects = fill_rects(&commands);
        let palette = CellPalette::default();

        assert_eq!(rects.len(), 5, "four cells plus the agent");
        assert_eq!(rects[0], (Vec2::ZERO, Vec2::splat(5.0), palette.road));
        assert_eq!(
            rects[1],
            (Vec2::new(5.0, 0.0), Vec2::splat(5.0), palette.sidewalk)
        );
        assert_eq!(
            rects[2],
            (Vec2::new(10.0, 0.0), Vec2::splat(5.0), palette.wall)
        );
        assert_eq!(rects[3].0, Vec2::new(0.0, 5.0));

        let agent = rects.last().copied().expect("agent drawn");
        assert_eq!(agent.0, Vec2::new(15.0, 5.0));
        assert_eq!(agent.1, Vec2::splat(10.0));
        assert_eq!(agent.2, Color::from_rgb_u8(255, 0, 0));
    }

    #[test]
    fn simulation_with_empty_grid_still_draws_agent() {
        let commands = draw_list(&scene(Screen::Simulation, Grid::default()));

        assert_eq!(fill_rects(&commands).len(), 1);
    }

    #[test]
    fn off_grid_agent_is_drawn_at_negative_offset() {
        let mut scene = scene(Screen::Simulation, Grid::default());
        scene.agent.position = Position::new(-2, -1);

        let rects = fill_rects(&draw_list(&scene));

        assert_eq!(rects[0].0, Vec2::new(-10.0, -5.0));
    }

    #[test]
    fn grid_extent_uses_first_row_as_width() {
        let scene = scene(Screen::Simulation, Grid::parse("==\n====\n="));

        assert_eq!(scene.grid_extent(), Vec2::new(10.0, 15.0));
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::new(0.0, 0.5, 1.0, 0.25).lighten(0.5);

        assert_eq!(color, Color::new(0.5, 0.75, 1.0, 0.25));
    }
}
