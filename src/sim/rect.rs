//! Axis-aligned rectangle bounds
//!
//! Screen space: x grows to the right, y grows downward. A rectangle covers
//! `[left, right) x [top, bottom)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds (left, top, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square bounds of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Strict overlap test
    ///
    /// Rectangles that only share a border do not intersect, and an empty
    /// rectangle intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Grow (or shrink, for negative amounts) around the center
    pub fn inflate(&mut self, dw: f32, dh: f32) {
        self.x -= dw / 2.0;
        self.y -= dh / 2.0;
        self.w = (self.w + dw).max(0.0);
        self.h = (self.h + dh).max(0.0);
    }

    /// Shift horizontally so the rectangle lies within `[min_x, max_x]`
    pub fn clamp_x_within(&mut self, min_x: f32, max_x: f32) {
        if self.left() < min_x {
            self.x = min_x;
        } else if self.right() > max_x {
            self.x = max_x - self.w;
        }
    }
}
