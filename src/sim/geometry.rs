//! Axis-aligned rectangle geometry for sprite bounds and the world border
//!
//! Every entity occupies a fixed-size rectangle centered on its position.
//! Overlap is strict: rectangles that only share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Half extents (size / 2)
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Check if two rectangles overlap (shared edges don't count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents() + other.half_extents();
        delta.x < reach.x && delta.y < reach.y
    }

    /// Check if a point lies inside the rectangle (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Shrink the rectangle by `margin` on every side (never below zero size)
    pub fn inset(&self, margin: Vec2) -> Aabb {
        Aabb {
            center: self.center,
            size: (self.size - margin * 2.0).max(Vec2::ZERO),
        }
    }

    /// Closest point inside the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// Direction from `from` toward `to`, scaled to `speed`, or zero when closer
/// than `threshold`
pub fn seek_velocity(from: Vec2, to: Vec2, speed: f32, threshold: f32) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    if distance > threshold {
        offset / distance * speed
    } else {
        Vec2::ZERO
    }
}
