//! Frame-by-frame wiring between input, the navigation system and the world.

use anyhow::Result;
use trashbot_core::{Command, Event, Grid, MenuLayout};
use trashbot_rendering::{
    AgentPresentation, CellPalette, FrameControl, FrameInput, GridPresentation, MenuPresentation,
    Scene,
};
use trashbot_system_navigation::Navigation;
use trashbot_world::{self as world, query, Agent, World};

use crate::config::RunConfig;

/// Owns the world and the systems driving it for the interactive session.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    navigation: Navigation,
    grid_presentation: GridPresentation,
    title: String,
}

impl Simulation {
    /// Builds a session around the provided grid.
    pub(crate) fn new(config: &RunConfig, grid: Grid) -> Result<Self> {
        let grid_presentation = GridPresentation::new(config.cell_size, CellPalette::default())?;
        let mut world = World::with_agent(Agent::new(config.agent_id, config.agent_start));
        let mut events = Vec::new();
        world::apply(&mut world, Command::ReplaceGrid { grid }, &mut events);

        Ok(Self {
            world,
            navigation: Navigation::new(MenuLayout::default(), config.step),
            grid_presentation,
            title: config.window_title.clone(),
        })
    }

    /// Read-only access to the authoritative world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Routes the frame's input through navigation and applies the resulting commands.
    pub(crate) fn step(&mut self, input: FrameInput) -> (FrameControl, Vec<Event>) {
        let mut commands = Vec::new();
        let agent = query::agent(&self.world).id();
        self.navigation.handle(
            query::screen(&self.world),
            agent,
            input.event,
            &mut commands,
        );

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        let control = if query::exit_requested(&self.world) {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        };
        (control, events)
    }

    /// Builds the initial scene for the rendering backend.
    pub(crate) fn scene(&self) -> Scene {
        Scene::new(
            query::screen(&self.world),
            query::grid(&self.world).clone(),
            self.grid_presentation,
            AgentPresentation::new(query::agent(&self.world).position()),
            MenuPresentation::new(self.title.clone(), *self.navigation.layout()),
        )
    }

    /// Refreshes the scene after the world reported changes.
    pub(crate) fn populate_scene(&self, scene: &mut Scene, events: &[Event]) {
        for event in events {
            match event {
                Event::GridReplaced { .. } => {
                    scene.grid = query::grid(&self.world).clone();
                }
                Event::ScreenChanged { to, .. } => scene.screen = *to,
                Event::AgentMoved { to, .. } => scene.agent.position = *to,
                Event::ExitRequested => {}
            }
        }
    }
}
