//! Breakout - a classic brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (object model, collisions, special effects, game state)
//! - `shell`: Fixed-rate frame loop and input dispatch
//! - `platform`: Rendering/input/audio/clock contracts consumed by the core
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Externally supplied geometry, speeds, timings and colors

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod shell;
pub mod sim;

pub use config::{Config, ConfigError};
pub use shell::{Scene, Shell};
pub use sim::{Breakout, GamePhase};

/// RGBA color, components in 0.0 - 1.0
pub type Color = [f32; 4];

/// Default configuration values
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Target tick rate (Hz)
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum ticks per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Brick grid (800 / 100 = 8 columns)
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_OFFSET_Y: f32 = 50.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Maximum displacement per tick
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Vertical speed per tick (positive = down)
    pub const BALL_SPEED: f32 = 3.0;
    /// Spawned balls draw an integer horizontal speed in -spread..=spread
    pub const BALL_SPREAD: u32 = 2;

    pub const INITIAL_LIVES: u32 = 3;

    /// Seconds a special effect stays active
    pub const EFFECT_DURATION: f64 = 20.0;
    /// Seconds an overlay message freezes the loop
    pub const MESSAGE_DURATION: f64 = 2.0;
    /// Effect roll range is 0..=EFFECT_ROLL_MAX
    pub const EFFECT_ROLL_MAX: u32 = 10;
    /// Vertical speed removed from the ball while slow ball is active
    pub const SLOW_BALL_DELTA: f32 = 1.0;

    /// Master volume, 0.0 - 1.0
    pub const SOUND_VOLUME: f32 = 0.8;

    /// Menu layout
    pub const MENU_OFFSET_X: f32 = 20.0;
    pub const MENU_OFFSET_Y: f32 = 300.0;
    pub const MENU_BUTTON_WIDTH: f32 = 80.0;
    pub const MENU_BUTTON_HEIGHT: f32 = 50.0;
    pub const MENU_BUTTON_GAP: f32 = 5.0;
    pub const BUTTON_PADDING: f32 = 5.0;

    /// Status labels
    pub const STATUS_OFFSET_Y: f32 = 5.0;
    pub const SCORE_OFFSET_X: f32 = 5.0;
    pub const LIVES_OFFSET_X: f32 = SCREEN_WIDTH - 100.0;

    pub const FONT_NAME: &str = "Arial";
    pub const FONT_SIZE: f32 = 20.0;
}

/// Colors for game elements
pub mod colors {
    use crate::Color;

    pub const BACKGROUND: Color = [0.02, 0.02, 0.05, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BRICK: Color = [0.7, 0.13, 0.13, 1.0];
    pub const PADDLE: Color = [0.8, 0.52, 0.25, 1.0];
    pub const BALL: Color = [0.2, 0.8, 0.4, 1.0];
    pub const TEXT: Color = [0.4, 0.7, 1.0, 1.0];

    /// Effect brick colors
    pub const ORANGE: Color = [1.0, 0.65, 0.0, 1.0];
    pub const AQUAMARINE2: Color = [0.46, 0.93, 0.78, 1.0];
    pub const DARKSEAGREEN4: Color = [0.41, 0.55, 0.41, 1.0];
    pub const GOLD1: Color = [1.0, 0.84, 0.0, 1.0];

    /// Menu button backgrounds per state
    pub const BUTTON_NORMAL: Color = [0.55, 0.1, 0.1, 1.0];
    pub const BUTTON_HOVER: Color = [0.85, 0.3, 0.3, 1.0];
    pub const BUTTON_PRESSED: Color = [0.35, 0.05, 0.05, 1.0];
    pub const BUTTON_TEXT: Color = WHITE;
}
