//! Generic object model
//!
//! Every object has rectangular bounds and a per-tick velocity. The four
//! one-unit edge strips are only used to classify which side a collision hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::platform::Canvas;

/// Thickness of the collision strips along each side
pub const EDGE_THICKNESS: f32 = 1.0;

/// Side of an object's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Iteration order used everywhere sides are enumerated
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Top and bottom faces reflect vertical motion
    pub fn is_horizontal_face(&self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Same face seen in a left-right mirror
    pub fn mirrored_x(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            other => *other,
        }
    }
}

/// Collision strips of an object, keyed by side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edges {
    pub left: Rect,
    pub right: Rect,
    pub top: Rect,
    pub bottom: Rect,
}

impl Edges {
    /// Strips hugging the left/top sides and just past the right/bottom sides
    pub fn of(bounds: &Rect) -> Self {
        Self {
            left: Rect::new(bounds.left(), bounds.top(), EDGE_THICKNESS, bounds.height()),
            right: Rect::new(bounds.right(), bounds.top(), EDGE_THICKNESS, bounds.height()),
            top: Rect::new(bounds.left(), bounds.top(), bounds.width(), EDGE_THICKNESS),
            bottom: Rect::new(bounds.left(), bounds.bottom(), bounds.width(), EDGE_THICKNESS),
        }
    }

    pub fn get(&self, side: Side) -> Rect {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    /// Strips in `Side::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Side, Rect)> + '_ {
        Side::ALL.into_iter().map(move |side| (side, self.get(side)))
    }
}

/// Bounds plus velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub bounds: Rect,
    /// Displacement per tick
    pub velocity: Vec2,
}

impl Body {
    pub fn new(bounds: Rect, velocity: Vec2) -> Self {
        Self { bounds, velocity }
    }

    pub fn at_rest(bounds: Rect) -> Self {
        Self::new(bounds, Vec2::ZERO)
    }

    pub fn left(&self) -> f32 {
        self.bounds.left()
    }

    pub fn right(&self) -> f32 {
        self.bounds.right()
    }

    pub fn top(&self) -> f32 {
        self.bounds.top()
    }

    pub fn bottom(&self) -> f32 {
        self.bounds.bottom()
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn edges(&self) -> Edges {
        Edges::of(&self.bounds)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.bounds.translate(delta);
    }

    /// Apply one tick of velocity
    pub fn update(&mut self) {
        if self.velocity == Vec2::ZERO {
            return;
        }
        self.bounds.translate(self.velocity);
    }
}

/// Anything that lives in the scene: updated every tick, drawn every frame
pub trait GameObject {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn update(&mut self) {
        self.body_mut().update();
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {}
}
