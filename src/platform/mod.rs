//! Platform abstraction layer
//!
//! Contracts for the collaborators the core consumes:
//! - Drawing (filled rectangles/circles, text, frame presentation)
//! - Input events
//! - Named sound playback
//! - Elapsed time

pub mod input;
pub mod time;

pub use input::{Dispatcher, InputEvent, InputSource, Key, MouseAction, QueuedInput};
pub use time::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;

use glam::Vec2;

use crate::Color;
use crate::sim::Rect;

/// How a string is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: String,
    pub size: f32,
    pub color: Color,
    /// Center the text on its position instead of anchoring its top-left corner
    pub centered: bool,
}

/// Drawing surface for one frame
pub trait Canvas {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, bounds: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
    /// Hand the finished frame to the display
    fn present(&mut self);
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a wall or the ceiling
    WallHit,
    /// Ball destroys a brick
    BrickHit,
    /// Ball fell past the paddle
    LifeLost,
    /// A special effect started
    EffectActivated,
    /// Last brick destroyed
    Win,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::WallHit => "wall_hit",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::LifeLost => "life_lost",
            SoundEffect::EffectActivated => "effect_activated",
            SoundEffect::Win => "win",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that only logs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound: {}", effect.name());
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text(String, Vec2, TextStyle),
}

/// Canvas that records draw calls, keeping the last presented frame
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    current: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    /// Frames presented so far
    pub frames: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the last presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Text drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.presented
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text(text, ..) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.current.push(DrawCommand::Rect(bounds, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.current.push(DrawCommand::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.current
            .push(DrawCommand::Text(text.to_string(), pos, style.clone()));
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.current);
        self.frames += 1;
    }
}
