#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure navigation system that routes input to screen transitions and agent moves.
//!
//! The system never mutates state itself. It inspects the active [`Screen`]
//! and the frame's input event, then emits commands for the world to apply.

use trashbot_core::{AgentId, Command, InputEvent, Key, MenuLayout, Screen};

/// Number of cells the agent travels per directional key press by default.
pub const DEFAULT_STEP: i32 = 1;

/// Routes per-frame input according to the active screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Navigation {
    layout: MenuLayout,
    step: i32,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(MenuLayout::default(), DEFAULT_STEP)
    }
}

impl Navigation {
    /// Creates a navigation system using the provided menu layout and step size.
    #[must_use]
    pub const fn new(layout: MenuLayout, step: i32) -> Self {
        Self { layout, step }
    }

    /// Menu layout used for pointer hit testing.
    #[must_use]
    pub const fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Emits the commands triggered by `input` while `screen` is active.
    pub fn handle(
        &self,
        screen: Screen,
        agent: AgentId,
        input: Option<InputEvent>,
        out: &mut Vec<Command>,
    ) {
        let Some(input) = input else {
            return;
        };

        match input {
            InputEvent::CloseRequested | InputEvent::KeyPressed(Key::Quit) => {
                out.push(Command::RequestExit);
            }
            InputEvent::KeyPressed(Key::Cancel) => {
                if screen != Screen::Menu {
                    out.push(Command::SetScreen {
                        screen: Screen::Menu,
                    });
                }
            }
            InputEvent::KeyPressed(Key::Arrow(direction)) => {
                if screen == Screen::Simulation {
                    let (dx, dy) = direction.delta();
                    out.push(Command::MoveAgent {
                        agent,
                        dx: dx * self.step,
                        dy: dy * self.step,
                    });
                }
            }
            InputEvent::PointerClicked { x, y } => {
                if screen != Screen::Menu {
                    return;
                }
                if self.layout.pick_grid.contains(x, y) {
                    out.push(Command::SetScreen {
                        screen: Screen::PickGrid,
                    });
                } else if self.layout.run_simulation.contains(x, y) {
                    out.push(Command::SetScreen {
                        screen: Screen::Simulation,
                    });
                }
            }
        }
    }
}
