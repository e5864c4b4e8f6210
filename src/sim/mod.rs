//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through the `now` argument of a tick
//! - Seeded RNG only
//! - Stable iteration order (brick insertion order)
//! - Drawing only through the `Canvas` contract

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod object;
pub mod rect;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

pub use autopilot::Autopilot;
pub use collision::{classify_hit, reflect_off_bricks, reflect_off_paddle};
pub use effects::{ActiveEffect, EffectAction, EffectKind, EffectSlot, EffectTarget};
pub use object::{Body, EDGE_THICKNESS, Edges, GameObject, Side};
pub use rect::Rect;
pub use state::{
    Ball, Brick, BrickId, BrickStore, Button, ButtonState, GamePhase, MenuAction, Paddle,
    Steering, TextObject, World,
};
pub use tick::{
    Breakout, GAME_OVER_MESSAGE, GameEvent, ObjectHandle, READY_MESSAGE, WIN_MESSAGE,
};
