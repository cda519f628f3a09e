//! Transient per-session entity sets, mutated in place each tick.

use serde::{Deserialize, Serialize};

use crate::constants::{ALIEN_HEIGHT, ALIEN_WIDTH, BULLET_CULL_Y, BULLET_SPEED};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    /// Normalized position.
    pub x: f64,
    pub y: f64,
    /// Upward speed in reference pixels per tick.
    pub speed: f64,
    pub(crate) alive: bool,
}

impl Bullet {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            speed: BULLET_SPEED,
            alive: true,
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self, viewport: &Viewport) {
        self.y -= viewport.norm_y(self.speed);
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.y < BULLET_CULL_Y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alien {
    /// Normalized anchor; collision treats it as the box center and the
    /// sprite hangs below it.
    pub x: f64,
    pub y: f64,
    /// Bounding size at reference resolution.
    pub width: f64,
    pub height: f64,
    pub(crate) alive: bool,
}

impl Alien {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: ALIEN_WIDTH,
            height: ALIEN_HEIGHT,
            alive: true,
        }
    }

    /// Collision half extents in normalized units for the given viewport.
    #[inline]
    pub fn half_extents(&self, viewport: &Viewport) -> (f64, f64) {
        (
            viewport.norm_x(self.width) / 2.0,
            viewport.norm_y(self.height) / 2.0,
        )
    }
}

/// Shared horizontal heading of a whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Boundary-inclusive axis-aligned overlap test of a point against a box
/// centered on `(cx, cy)` with half extents `(hw, hh)`.
#[inline]
pub fn aabb_contains(px: f64, py: f64, cx: f64, cy: f64, hw: f64, hh: f64) -> bool {
    px >= cx - hw && px <= cx + hw && py >= cy - hh && py <= cy + hh
}

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) aliens: Vec<Alien>,
}

impl EntityStore {
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub(crate) fn prune(&mut self) {
        self.bullets.retain(|bullet| bullet.alive);
        self.aliens.retain(|alien| alien.alive);
    }

    pub(crate) fn clear(&mut self) {
        self.bullets.clear();
        self.aliens.clear();
    }
}
