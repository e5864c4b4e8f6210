//! Game configuration
//!
//! Every size, speed, timing and color the simulation uses is supplied here.
//! A configuration is validated once, when a level is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;
use crate::colors;
use crate::consts::*;

/// Menu button background colors per interaction state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonColors {
    pub normal: Color,
    pub hover: Color,
    pub pressed: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: colors::BUTTON_NORMAL,
            hover: colors::BUTTON_HOVER,
            pressed: colors::BUTTON_PRESSED,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ticks per second
    pub frame_rate: f32,
    pub background: Color,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_rows: u32,
    /// Top of the first brick row
    pub brick_offset_y: f32,
    pub brick_color: Color,
    /// Assign special effects to bricks at level build
    pub effects_enabled: bool,
    /// Each brick rolls 0..=effect_roll_max; rolls below the effect count pick that effect
    pub effect_roll_max: u32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Maximum displacement per tick
    pub paddle_speed: f32,
    pub paddle_color: Color,

    // === Ball ===
    pub ball_radius: f32,
    /// Vertical speed per tick of a freshly spawned ball (positive = down)
    pub ball_speed: f32,
    /// Spawned balls draw an integer horizontal speed in -spread..=spread
    pub ball_spread: u32,
    pub ball_color: Color,

    // === Rules ===
    pub initial_lives: u32,
    /// Seconds a special effect stays active
    pub effect_duration: f64,
    /// Seconds an overlay message freezes the loop
    pub message_duration: f64,
    /// Master volume, 0.0 - 1.0
    pub sound_volume: f32,

    // === Menu & HUD ===
    pub menu_offset_x: f32,
    pub menu_offset_y: f32,
    pub menu_button_width: f32,
    pub menu_button_height: f32,
    pub button_colors: ButtonColors,
    pub button_text_color: Color,
    pub status_offset_y: f32,
    pub score_offset_x: f32,
    pub lives_offset_x: f32,
    pub font_name: String,
    pub font_size: f32,
    pub text_color: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            frame_rate: FRAME_RATE,
            background: colors::BACKGROUND,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_rows: BRICK_ROWS,
            brick_offset_y: BRICK_OFFSET_Y,
            brick_color: colors::BRICK,
            effects_enabled: true,
            effect_roll_max: EFFECT_ROLL_MAX,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_color: colors::PADDLE,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_spread: BALL_SPREAD,
            ball_color: colors::BALL,

            initial_lives: INITIAL_LIVES,
            effect_duration: EFFECT_DURATION,
            message_duration: MESSAGE_DURATION,
            sound_volume: SOUND_VOLUME,

            menu_offset_x: MENU_OFFSET_X,
            menu_offset_y: MENU_OFFSET_Y,
            menu_button_width: MENU_BUTTON_WIDTH,
            menu_button_height: MENU_BUTTON_HEIGHT,
            button_colors: ButtonColors::default(),
            button_text_color: colors::BUTTON_TEXT,
            status_offset_y: STATUS_OFFSET_Y,
            score_offset_x: SCORE_OFFSET_X,
            lives_offset_x: LIVES_OFFSET_X,
            font_name: FONT_NAME.to_string(),
            font_size: FONT_SIZE,
            text_color: colors::TEXT,
        }
    }
}

/// Rejected configuration
#[derive(Debug)]
pub enum ConfigError {
    /// A dimension, speed or rate that must be strictly positive
    NonPositive { field: &'static str, value: f64 },
    /// An object wider than the screen it must fit on
    TooWide {
        field: &'static str,
        width: f32,
        screen_width: f32,
    },
    /// A count that must be at least one
    Zero { field: &'static str },
    /// A value outside its accepted range
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Ball speed the slow-ball effect would stop or reverse
    TooSlowForEffects { ball_speed: f32, delta: f32 },
    /// Malformed JSON
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "config `{field}` must be positive, got {value}")
            }
            ConfigError::TooWide {
                field,
                width,
                screen_width,
            } => write!(
                f,
                "config `{field}` ({width}) does not fit the screen width ({screen_width})"
            ),
            ConfigError::Zero { field } => write!(f, "config `{field}` must be at least 1"),
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "config `{field}` must be within {min}..={max}, got {value}"),
            ConfigError::TooSlowForEffects { ball_speed, delta } => write!(
                f,
                "config `ball_speed` ({ball_speed}) must exceed the slow-ball change ({delta}) \
                 while effects are enabled"
            ),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl Config {
    /// Check the geometry and rules are usable for collision and level building
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen_width", self.screen_width as f64)?;
        positive("screen_height", self.screen_height as f64)?;
        positive("frame_rate", self.frame_rate as f64)?;
        positive("brick_width", self.brick_width as f64)?;
        positive("brick_height", self.brick_height as f64)?;
        positive("paddle_width", self.paddle_width as f64)?;
        positive("paddle_height", self.paddle_height as f64)?;
        positive("paddle_speed", self.paddle_speed as f64)?;
        positive("ball_radius", self.ball_radius as f64)?;
        positive("ball_speed", self.ball_speed.abs() as f64)?;
        positive("effect_duration", self.effect_duration)?;
        positive("message_duration", self.message_duration)?;
        within("sound_volume", self.sound_volume as f64, 0.0, 1.0)?;
        // Spawn draws dx from the signed range -spread..=spread
        within(
            "ball_spread",
            self.ball_spread as f64,
            0.0,
            i32::MAX as f64,
        )?;
        if self.effects_enabled && self.ball_speed.abs() <= SLOW_BALL_DELTA {
            return Err(ConfigError::TooSlowForEffects {
                ball_speed: self.ball_speed,
                delta: SLOW_BALL_DELTA,
            });
        }

        if self.paddle_width > self.screen_width {
            return Err(ConfigError::TooWide {
                field: "paddle_width",
                width: self.paddle_width,
                screen_width: self.screen_width,
            });
        }
        if self.brick_width > self.screen_width {
            return Err(ConfigError::TooWide {
                field: "brick_width",
                width: self.brick_width,
                screen_width: self.screen_width,
            });
        }
        if self.brick_rows == 0 {
            return Err(ConfigError::Zero {
                field: "brick_rows",
            });
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Zero {
                field: "initial_lives",
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of brick columns that fit across the screen
    pub fn brick_columns(&self) -> u32 {
        (self.screen_width / self.brick_width).floor() as u32
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "breakout_config";

    /// Load a configuration override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load a configuration file, or defaults when no path is given (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brick_columns(), 8);
    }

    #[test]
    fn test_rejects_zero_screen() {
        let config = Config {
            screen_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "screen_width",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let config = Config {
            brick_height: -4.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            ball_radius: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_paddle_wider_than_screen() {
        let config = Config {
            paddle_width: 900.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooWide { field: "paddle_width", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_counts() {
        let config = Config {
            initial_lives: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero { field: "initial_lives" })
        ));
    }

    #[test]
    fn test_rejects_ball_speed_slow_ball_would_stall() {
        for ball_speed in [0.5, 1.0, -1.0] {
            let config = Config {
                ball_speed,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::TooSlowForEffects { .. })
            ));
        }

        // Without effects nothing changes the ball speed
        let config = Config {
            ball_speed: 0.5,
            effects_enabled: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_spread_beyond_signed_range() {
        let config = Config {
            ball_spread: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "ball_spread",
                ..
            })
        ));

        let config = Config {
            ball_spread: i32::MAX as u32,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_volume_out_of_range() {
        let config = Config {
            sound_volume: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "sound_volume",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "brick_rows": 2, "initial_lives": 5 }"#).unwrap();
        assert_eq!(config.brick_rows, 2);
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_json_is_validated() {
        let err = Config::from_json(r#"{ "frame_rate": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("frame_rate"));

        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
