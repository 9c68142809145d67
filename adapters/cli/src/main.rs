#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the TrashBot experience.

mod config;
mod simulation;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trashbot_core::CellType;
use trashbot_rendering::{Color, Presentation, RenderingBackend};
use trashbot_rendering_macroquad::MacroquadBackend;
use trashbot_system_grid_generator::{write_grid_file, BlockLayout};
use trashbot_system_grid_loader::{load_grid, read_grid};
use trashbot_world::query;

use self::{
    config::{ConfigLayer, RunConfig},
    simulation::Simulation,
};

const CLEAR_COLOR: Color = Color::from_rgb_u8(30, 30, 30);

#[derive(Debug, Parser)]
#[command(name = "trashbot", version, about = "Grid city simulation with a steerable bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Opens the simulation window.
    Run(RunArgs),
    /// Writes a procedurally generated city-block grid file.
    Generate(GenerateArgs),
    /// Prints the dimensions and cell counts of a grid file.
    Inspect(InspectArgs),
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Grid file displayed by the simulation screen.
    #[arg(long)]
    grid: Option<PathBuf>,
    /// TOML file providing defaults for the remaining options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Edge length of a grid cell in pixels.
    #[arg(long)]
    cell_size: Option<f32>,
    /// Cells travelled by the agent per arrow key press.
    #[arg(long)]
    step: Option<i32>,
    /// Pause inserted after each frame, in milliseconds.
    #[arg(long)]
    frame_delay_ms: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_enum)]
    vsync: Option<Toggle>,
    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

impl RunArgs {
    fn overrides(&self) -> ConfigLayer {
        ConfigLayer {
            grid_path: self.grid.clone(),
            cell_size: self.cell_size,
            step: self.step,
            frame_delay_ms: self.frame_delay_ms,
            vsync: self.vsync.map(|toggle| toggle == Toggle::On),
            show_fps: self.show_fps.then_some(true),
            window_title: None,
            window_width: None,
            window_height: None,
            agent: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Destination file, truncated if it already exists.
    #[arg(long)]
    output: PathBuf,
    /// Width of the housing interior of each block.
    #[arg(long, allow_negative_numbers = true)]
    housing: i64,
    /// Width of each sidewalk band.
    #[arg(long, allow_negative_numbers = true)]
    sidewalk: i64,
    /// Width of each road band.
    #[arg(long, allow_negative_numbers = true)]
    road: i64,
    /// Number of blocks laid out horizontally.
    #[arg(long, allow_negative_numbers = true)]
    blocks_x: i64,
    /// Number of blocks laid out vertically.
    #[arg(long, allow_negative_numbers = true)]
    blocks_y: i64,
}

#[derive(Debug, Args)]
struct InspectArgs {
    /// Grid file to inspect.
    #[arg(long)]
    grid: PathBuf,
}

/// Entry point for the TrashBot command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command.unwrap_or(CliCommand::Run(RunArgs::default())) {
        CliCommand::Run(args) => run(&args),
        CliCommand::Generate(args) => generate(&args),
        CliCommand::Inspect(args) => inspect(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: &RunArgs) -> Result<()> {
    let file_layer = match &args.config {
        Some(path) => ConfigLayer::load(path)?,
        None => ConfigLayer::default(),
    };
    let config = RunConfig::try_from(file_layer.merge(args.overrides()))
        .context("invalid run configuration")?;

    let grid = load_grid(&config.grid_path);
    let mut simulation = Simulation::new(&config, grid)?;
    let scene = simulation.scene();
    let extent = scene.grid_extent();
    info!(
        path = %config.grid_path.display(),
        rows = scene.grid.row_count(),
        width = scene.grid.nominal_width(),
        extent_px = %format!("{}x{}", extent.x, extent.y),
        "grid ready"
    );
    info!("{}", query::agent(simulation.world()).report_position());

    let presentation = Presentation::new(config.window_title.clone(), CLEAR_COLOR, scene);
    let (window_width, window_height) = config.window_size;
    let mut backend = MacroquadBackend::new()
        .with_frame_delay(config.frame_delay)
        .with_window_size(window_width, window_height)
        .with_show_fps(config.show_fps);
    if let Some(enabled) = config.vsync {
        backend = backend.with_vsync(enabled);
    }

    backend.run(presentation, move |_dt: Duration, input, scene| {
        let (control, events) = simulation.step(input);
        simulation.populate_scene(scene, &events);
        control
    })
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let layout = BlockLayout::new(
        args.housing,
        args.sidewalk,
        args.road,
        args.blocks_x,
        args.blocks_y,
    )
    .context("invalid block layout")?;

    write_grid_file(&args.output, &layout)
        .with_context(|| format!("could not generate {}", args.output.display()))?;

    println!(
        "wrote {}x{} grid to {}",
        layout.width(),
        layout.height(),
        args.output.display()
    );
    Ok(())
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let grid = read_grid(&args.grid)?;

    println!(
        "{}: {} rows, nominal width {}",
        args.grid.display(),
        grid.row_count(),
        grid.nominal_width()
    );
    for cell_type in CellType::ALL {
        println!("  {cell_type:?}: {}", grid.count(cell_type));
    }
    Ok(())
}
