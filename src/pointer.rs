//! Pointer target, viewport mapping and smoothing.
//!
//! Input callbacks write the latest pointer position into a
//! [`PointerTarget`]; the driver reads it once per tick and low-pass filters
//! it into world space with a [`PointerSmoother`]. Writes between ticks are
//! not queued: last write wins, and the tick performs a single smoothing
//! step toward it.

use std::cell::Cell;
use std::rc::Rc;

use glam::{Vec2, Vec3};

use crate::config::PointerParams;

/// Window size used to normalize pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map a pixel position (origin top-left, y down) to normalized
    /// coordinates: center is the origin, edges are ±1, y points up.
    ///
    /// A zero-sized viewport maps everything to the origin.
    pub fn to_ndc(&self, pixel: Vec2) -> Vec2 {
        if self.width == 0 || self.height == 0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (pixel.x / self.width as f32) * 2.0 - 1.0,
            1.0 - (pixel.y / self.height as f32) * 2.0,
        )
    }

    /// Width over height, 1.0 for degenerate sizes.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Shared, thread-confined slot holding the latest raw pointer position in
/// normalized viewport coordinates.
///
/// Cloning yields another handle to the same slot. Reads never consume.
#[derive(Debug, Clone, Default)]
pub struct PointerTarget {
    latest: Rc<Cell<Vec2>>,
}

impl PointerTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the target. Earlier unread values are discarded.
    #[inline]
    pub fn set(&self, ndc: Vec2) {
        self.latest.set(ndc);
    }

    /// Current target.
    #[inline]
    pub fn get(&self) -> Vec2 {
        self.latest.get()
    }
}

/// First-order low-pass filter from a normalized target to a world-space
/// pointer on the `z = 0` plane.
#[derive(Debug, Clone, Copy)]
pub struct PointerSmoother {
    params: PointerParams,
    current: Vec2,
}

impl PointerSmoother {
    /// Start at the world origin.
    pub fn new(params: PointerParams) -> Self {
        Self {
            params,
            current: Vec2::ZERO,
        }
    }

    /// Move one step toward `target_ndc` and return the smoothed world
    /// position.
    ///
    /// `current += (target * world_scale - current) * smoothing`, per axis.
    pub fn step(&mut self, target_ndc: Vec2) -> Vec3 {
        let goal = target_ndc * self.params.world_scale;
        self.current += (goal - self.current) * self.params.smoothing;
        self.world()
    }

    /// Smoothed position without advancing.
    #[inline]
    pub fn world(&self) -> Vec3 {
        self.current.extend(0.0)
    }
}
