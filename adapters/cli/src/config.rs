//! Layered run configuration: defaults, then an optional TOML file, then flags.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use trashbot_core::{AgentId, Position};

const DEFAULT_GRID_PATH: &str = "grid.txt";
const DEFAULT_CELL_SIZE: f32 = 5.0;
const DEFAULT_STEP: i32 = 1;
const DEFAULT_FRAME_DELAY_MS: u64 = 16;
const DEFAULT_WINDOW_TITLE: &str = "TrashBot";
const DEFAULT_WINDOW_SIZE: i32 = 1000;
const DEFAULT_AGENT_ID: u32 = 1;

/// Partially specified settings from a single configuration source.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigLayer {
    pub(crate) grid_path: Option<PathBuf>,
    pub(crate) cell_size: Option<f32>,
    pub(crate) step: Option<i32>,
    pub(crate) frame_delay_ms: Option<u64>,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: Option<bool>,
    pub(crate) window_title: Option<String>,
    pub(crate) window_width: Option<i32>,
    pub(crate) window_height: Option<i32>,
    pub(crate) agent: Option<AgentLayer>,
}

/// Agent settings accepted in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AgentLayer {
    #[serde(default = "default_agent_id")]
    pub(crate) id: u32,
    #[serde(default)]
    pub(crate) start: Position,
}

fn default_agent_id() -> u32 {
    DEFAULT_AGENT_ID
}

impl ConfigLayer {
    /// Reads a configuration layer from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid TOML configuration")
    }

    /// Returns a layer where every value set in `overrides` replaces this layer's value.
    #[must_use]
    pub(crate) fn merge(self, overrides: ConfigLayer) -> Self {
        Self {
            grid_path: overrides.grid_path.or(self.grid_path),
            cell_size: overrides.cell_size.or(self.cell_size),
            step: overrides.step.or(self.step),
            frame_delay_ms: overrides.frame_delay_ms.or(self.frame_delay_ms),
            vsync: overrides.vsync.or(self.vsync),
            show_fps: overrides.show_fps.or(self.show_fps),
            window_title: overrides.window_title.or(self.window_title),
            window_width: overrides.window_width.or(self.window_width),
            window_height: overrides.window_height.or(self.window_height),
            agent: overrides.agent.or(self.agent),
        }
    }
}

/// Fully resolved settings for the interactive simulation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunConfig {
    pub(crate) grid_path: PathBuf,
    pub(crate) cell_size: f32,
    pub(crate) step: i32,
    pub(crate) frame_delay: Duration,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: bool,
    pub(crate) window_title: String,
    pub(crate) window_size: (i32, i32),
    pub(crate) agent_id: AgentId,
    pub(crate) agent_start: Position,
}

impl TryFrom<ConfigLayer> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(layer: ConfigLayer) -> Result<Self> {
        let cell_size = layer.cell_size.unwrap_or(DEFAULT_CELL_SIZE);
        ensure!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell_size must be positive (received {cell_size})"
        );
        let step = layer.step.unwrap_or(DEFAULT_STEP);
        ensure!(step > 0, "step must be positive (received {step})");
        let window_size = (
            layer.window_width.unwrap_or(DEFAULT_WINDOW_SIZE),
            layer.window_height.unwrap_or(DEFAULT_WINDOW_SIZE),
        );
        ensure!(
            window_size.0 > 0 && window_size.1 > 0,
            "window size must be positive (received {}x{})",
            window_size.0,
            window_size.1
        );

        let agent = layer.agent.unwrap_or(AgentLayer {
            id: DEFAULT_AGENT_ID,
            start: Position::default(),
        });

        Ok(Self {
            grid_path: layer
                .grid_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GRID_PATH)),
            cell_size,
            step,
            frame_delay: Duration::from_millis(
                layer.frame_delay_ms.unwrap_or(DEFAULT_FRAME_DELAY_MS),
            ),
            vsync: layer.vsync,
            show_fps: layer.show_fps.unwrap_or(false),
            window_title: layer
                .window_title
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_owned()),
            window_size,
            agent_id: AgentId::new(agent.id),
            agent_start: agent.start,
        })
    }
}
