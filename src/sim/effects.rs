//! Timed special effects
//!
//! Destroying a marked brick starts its effect. At most one effect is active:
//! starting another one undoes the current one first, and an effect undoes
//! itself once its duration has elapsed.

use serde::{Deserialize, Serialize};

use crate::Color;
use crate::colors;
use crate::consts::SLOW_BALL_DELTA;

/// Mutable game state the effects operate on
pub trait EffectTarget {
    /// Grow the paddle by `fraction` of its base width (negative shrinks)
    fn widen_paddle(&mut self, fraction: f32);
    /// Change the magnitude of the ball's vertical speed
    fn change_ball_speed(&mut self, delta: f32);
    fn set_points_per_brick(&mut self, points: u32);
    fn add_life(&mut self);
}

/// A single primitive change to the game state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectAction {
    WidenPaddle(f32),
    ChangeBallSpeed(f32),
    SetPointsPerBrick(u32),
    AddLife,
    Nothing,
}

impl EffectAction {
    pub fn run(self, target: &mut dyn EffectTarget) {
        match self {
            EffectAction::WidenPaddle(fraction) => target.widen_paddle(fraction),
            EffectAction::ChangeBallSpeed(delta) => target.change_ball_speed(delta),
            EffectAction::SetPointsPerBrick(points) => target.set_points_per_brick(points),
            EffectAction::AddLife => target.add_life(),
            EffectAction::Nothing => {}
        }
    }
}

/// Special effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    LongPaddle,
    SlowBall,
    TriplePoints,
    ExtraLife,
}

impl EffectKind {
    /// Roll order used when assigning effects to bricks
    pub const ALL: [EffectKind; 4] = [
        EffectKind::LongPaddle,
        EffectKind::SlowBall,
        EffectKind::TriplePoints,
        EffectKind::ExtraLife,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::LongPaddle => "long_paddle",
            EffectKind::SlowBall => "slow_ball",
            EffectKind::TriplePoints => "triple_points",
            EffectKind::ExtraLife => "extra_life",
        }
    }

    /// Color of a brick carrying this effect
    pub fn color(&self) -> Color {
        match self {
            EffectKind::LongPaddle => colors::ORANGE,
            EffectKind::SlowBall => colors::AQUAMARINE2,
            EffectKind::TriplePoints => colors::DARKSEAGREEN4,
            EffectKind::ExtraLife => colors::GOLD1,
        }
    }

    /// (apply, undo) pair
    pub fn actions(&self) -> (EffectAction, EffectAction) {
        match self {
            EffectKind::LongPaddle => (EffectAction::WidenPaddle(0.5), EffectAction::WidenPaddle(-0.5)),
            EffectKind::SlowBall => (
                EffectAction::ChangeBallSpeed(-SLOW_BALL_DELTA),
                EffectAction::ChangeBallSpeed(SLOW_BALL_DELTA),
            ),
            EffectKind::TriplePoints => (
                EffectAction::SetPointsPerBrick(3),
                EffectAction::SetPointsPerBrick(1),
            ),
            // Permanent
            EffectKind::ExtraLife => (EffectAction::AddLife, EffectAction::Nothing),
        }
    }

    pub fn apply(&self, target: &mut dyn EffectTarget) {
        self.actions().0.run(target);
    }

    pub fn undo(&self, target: &mut dyn EffectTarget) {
        self.actions().1.run(target);
    }
}

/// The running effect and when it started
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Seconds since start
    pub started_at: f64,
}

/// Holds at most one active effect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectSlot {
    active: Option<ActiveEffect>,
}

impl EffectSlot {
    pub fn active(&self) -> Option<&ActiveEffect> {
        self.active.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Start `kind` at `now`, undoing the current effect first
    ///
    /// Returns the replaced effect kind.
    pub fn activate(
        &mut self,
        kind: EffectKind,
        now: f64,
        target: &mut dyn EffectTarget,
    ) -> Option<EffectKind> {
        let replaced = self.active.take().map(|previous| {
            previous.kind.undo(target);
            previous.kind
        });
        kind.apply(target);
        self.active = Some(ActiveEffect {
            kind,
            started_at: now,
        });
        replaced
    }

    /// Undo and clear the active effect once `duration` seconds have passed
    ///
    /// Returns the expired effect kind.
    pub fn expire(
        &mut self,
        now: f64,
        duration: f64,
        target: &mut dyn EffectTarget,
    ) -> Option<EffectKind> {
        let due = self
            .active
            .is_some_and(|effect| now - effect.started_at >= duration);
        if !due {
            return None;
        }
        let expired = self.active.take()?;
        expired.kind.undo(target);
        Some(expired.kind)
    }
}
