#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for TrashBot.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_quit_requested, mouse_position, prevent_quit,
    KeyCode, MouseButton,
};
use std::{
    thread,
    time::{Duration, Instant},
};
use tracing::debug;
use trashbot_core::{Direction, InputEvent, Key};
use trashbot_rendering::{
    draw_list, Color, DrawCommand, FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};

/// Raw device observations gathered during a single frame.
///
/// Only one of them is forwarded to the simulation. Window close requests win,
/// followed by quit, cancel, the arrow keys in clockwise order from up, and
/// finally the primary pointer click.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct InputObservation {
    close_requested: bool,
    quit: bool,
    cancel: bool,
    up: bool,
    right: bool,
    down: bool,
    left: bool,
    click: Option<Vec2>,
}

impl InputObservation {
    fn poll() -> Self {
        let click = if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            Some(Vec2::new(x, y))
        } else {
            None
        };

        Self {
            close_requested: is_quit_requested(),
            quit: is_key_pressed(KeyCode::Q),
            cancel: is_key_pressed(KeyCode::Escape),
            up: is_key_pressed(KeyCode::Up),
            right: is_key_pressed(KeyCode::Right),
            down: is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::Left),
            click,
        }
    }

    /// Selects the single event forwarded to the simulation this frame.
    fn into_event(self) -> Option<InputEvent> {
        let keys = [
            (self.quit, Key::Quit),
            (self.cancel, Key::Cancel),
            (self.up, Key::Arrow(Direction::North)),
            (self.right, Key::Arrow(Direction::East)),
            (self.down, Key::Arrow(Direction::South)),
            (self.left, Key::Arrow(Direction::West)),
        ];

        if self.close_requested {
            return Some(InputEvent::CloseRequested);
        }
        if let Some((_, key)) = keys.into_iter().find(|(pressed, _)| *pressed) {
            return Some(InputEvent::KeyPressed(key));
        }
        self.click
            .map(|position| InputEvent::PointerClicked {
                x: position.x,
                y: position.y,
            })
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    frame_delay: Duration,
    window_size: (i32, i32),
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            frame_delay: Self::DEFAULT_FRAME_DELAY,
            window_size: (1000, 1000),
        }
    }
}

impl MacroquadBackend {
    /// Fixed pause inserted after each presented frame, roughly 60 frames per second.
    pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(16);

    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the pause inserted after each presented frame.
    #[must_use]
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = (width, height);
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            frame_delay,
            window_size: (window_width, window_height),
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            prevent_quit();

            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut last_frame = Instant::now();

            loop {
                let now = Instant::now();
                let frame_dt = now.duration_since(last_frame);
                last_frame = now;

                let input = FrameInput {
                    event: InputObservation::poll().into_event(),
                };
                if update_scene(frame_dt, input, &mut scene) == FrameControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                for command in draw_list(&scene) {
                    execute(&command);
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        debug!(fps = per_second, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
                if !frame_delay.is_zero() {
                    thread::sleep(frame_delay);
                }
            }
        });

        Ok(())
    }
}

fn execute(command: &DrawCommand) {
    match command {
        DrawCommand::FillRect {
            origin,
            size,
            color,
        } => {
            macroquad::shapes::draw_rectangle(
                origin.x,
                origin.y,
                size.x,
                size.y,
                to_macroquad_color(*color),
            );
        }
        DrawCommand::Text {
            text,
            origin,
            font_size,
            color,
        } => {
            let _ = macroquad::text::draw_text(
                text,
                origin.x,
                origin.y,
                *font_size,
                to_macroquad_color(*color),
            );
        }
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
