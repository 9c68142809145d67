#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for TrashBot.

use std::fmt;

use tracing::{debug, info};
use trashbot_core::{AgentId, Command, Event, Grid, Position, Screen};

const DEFAULT_AGENT_ID: AgentId = AgentId::new(1);

/// Single simulated entity that moves across the grid.
///
/// Positions are measured in cells. Movement is not bounded by the grid, so an
/// agent may leave it or take negative coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    position: Position,
}

impl Agent {
    /// Creates a new agent at the provided position.
    #[must_use]
    pub const fn new(id: AgentId, position: Position) -> Self {
        Self { id, position }
    }

    /// Identifier assigned to the agent.
    #[must_use]
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Current position of the agent in cells.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Translates the agent by the provided delta without bounds checking.
    ///
    /// Positions off the grid are valid; only the `i32` range clamps.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    /// Human-readable description of the agent and its coordinates.
    #[must_use]
    pub fn report_position(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is at ({}, {})",
            self.id, self.position.x, self.position.y
        )
    }
}

/// Represents the authoritative TrashBot world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    agent: Agent,
    screen: Screen,
    exit_requested: bool,
}

impl World {
    /// Creates a world with an empty grid and the agent parked at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_agent(Agent::new(DEFAULT_AGENT_ID, Position::default()))
    }

    /// Creates a world with an empty grid and the provided agent.
    #[must_use]
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            grid: Grid::default(),
            agent,
            screen: Screen::default(),
            exit_requested: false,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ReplaceGrid { grid } => {
            world.grid = grid;
            let rows = world.grid.row_count();
            let nominal_width = world.grid.nominal_width();
            debug!(rows, nominal_width, "grid replaced");
            out_events.push(Event::GridReplaced {
                rows,
                nominal_width,
            });
        }
        Command::SetScreen { screen } => {
            if world.screen != screen {
                let from = world.screen;
                world.screen = screen;
                info!(?from, to = ?screen, "screen changed");
                out_events.push(Event::ScreenChanged { from, to: screen });
            }
        }
        Command::MoveAgent { agent, dx, dy } => {
            if world.agent.id() != agent {
                debug!(%agent, "ignoring move for unknown agent");
                return;
            }

            let from = world.agent.position();
            world.agent.move_by(dx, dy);
            info!("{}", world.agent.report_position());
            out_events.push(Event::AgentMoved {
                agent,
                from,
                to: world.agent.position(),
            });
        }
        Command::RequestExit => {
            if !world.exit_requested {
                world.exit_requested = true;
                info!("exit requested");
                out_events.push(Event::ExitRequested);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Agent, World};
    use trashbot_core::{Grid, Screen};

    /// Provides read-only access to the world's grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the simulated agent.
    #[must_use]
    pub fn agent(world: &World) -> &Agent {
        &world.agent
    }

    /// Screen currently driving input routing and presentation.
    #[must_use]
    pub fn screen(world: &World) -> Screen {
        world.screen
    }

    /// Reports whether an exit has been requested.
    #[must_use]
    pub fn exit_requested(world: &World) -> bool {
        world.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trashbot_core::CellType;

    fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, command, &mut events);
        }
        events
    }

    #[test]
    fn new_world_starts_on_menu_with_empty_grid() {
        let world = World::new();

        assert_eq!(query::screen(&world), Screen::Menu);
        assert!(query::grid(&world).is_empty());
        assert_eq!(query::agent(&world).position(), Position::new(0, 0));
        assert!(!query::exit_requested(&world));
    }

    #[test]
    fn agent_moves_are_cumulative() {
        let mut agent = Agent::new(AgentId::new(1), Position::new(0, 0));

        agent.move_by(5, 3);
        agent.move_by(-5, 0);

        assert_eq!(agent.position(), Position::new(0, 3));
    }

    #[test]
    fn agent_may_leave_the_grid() {
        let mut world = World::new();
        let _ = apply_all(
            &mut world,
            vec![Command::ReplaceGrid {
                grid: Grid::parse("==\n=="),
            }],
        );

        let events = apply_all(
            &mut world,
            vec![Command::MoveAgent {
                agent: AgentId::new(1),
                dx: -3,
                dy: 40,
            }],
        );

        assert_eq!(query::agent(&world).position(), Position::new(-3, 40));
        assert_eq!(
            events,
            vec![Event::AgentMoved {
                agent: AgentId::new(1),
                from: Position::new(0, 0),
                to: Position::new(-3, 40),
            }],
            "off-grid positions are valid moves"
        );
    }

    #[test]
    fn report_position_describes_identity_and_coordinates() {
        let agent = Agent::new(AgentId::new(7), Position::new(-2, 9));

        assert_eq!(agent.report_position(), "7 is at (-2, 9)");
    }

    #[test]
    fn move_for_unknown_agent_is_ignored() {
        let mut world = World::new();

        let events = apply_all(
            &mut world,
            vec![Command::MoveAgent {
                agent: AgentId::new(99),
                dx: 1,
                dy: 1,
            }],
        );

        assert!(events.is_empty());
        assert_eq!(query::agent(&world).position(), Position::new(0, 0));
    }

    #[test]
    fn replacing_grid_swaps_contents_wholesale() {
        let mut world = World::new();

        let events = apply_all(
            &mut world,
            vec![
                Command::ReplaceGrid {
                    grid: Grid::parse("...\n..."),
                },
                Command::ReplaceGrid {
                    grid: Grid::parse("="),
                },
            ],
        );

        assert_eq!(query::grid(&world).rows(), &[vec![CellType::Road]]);
        assert_eq!(
            events.last(),
            Some(&Event::GridReplaced {
                rows: 1,
                nominal_width: 1,
            })
        );
    }

    #[test]
    fn setting_current_screen_emits_nothing() {
        let mut world = World::new();

        let events = apply_all(
            &mut world,
            vec![Command::SetScreen {
                screen: Screen::Menu,
            }],
        );

        assert!(events.is_empty());
    }

    #[test]
    fn screen_changes_are_announced() {
        let mut world = World::new();

        let events = apply_all(
            &mut world,
            vec![Command::SetScreen {
                screen: Screen::Simulation,
            }],
        );

        assert_eq!(
            events,
            vec![Event::ScreenChanged {
                from: Screen::Menu,
                to: Screen::Simulation,
            }]
        );
        assert_eq!(query::screen(&world), Screen::Simulation);
    }

    #[test]
    fn exit_is_announced_once() {
        let mut world = World::new();

        let events = apply_all(&mut world, vec![Command::RequestExit, Command::RequestExit]);

        assert_eq!(events, vec![Event::ExitRequested]);
        assert!(query::exit_requested(&world));
    }
}
