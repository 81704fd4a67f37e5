//! Key Runner - an endless runner where every obstacle asks for a key
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, targeting, collisions, game state)
//! - `renderer`: Read-only render snapshot and the terminal renderer
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the game is tuned per frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ground sits at this fraction of the viewport height
    pub const GROUND_FRACTION: f32 = 0.85;

    /// Player defaults - the world scrolls, the player never moves sideways
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 55.0;
    pub const PLAYER_GRAVITY: f32 = 0.6;
    /// Small hop, not a full jump
    pub const PLAYER_HOP_FORCE: f32 = -10.0;

    /// Obstacle defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const BLOCK_WIDTH: f32 = 40.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 80.0;
    /// A uniform draw above this picks a pipe (~60% pipes)
    pub const PIPE_THRESHOLD: f32 = 0.4;
    pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

    /// Spawning
    pub const MAX_OBSTACLES: usize = 5;
    pub const SPAWN_RATE_PER_SPEED: f32 = 0.015;
    pub const SPAWN_GAP_MIN: f32 = 200.0;
    pub const SPAWN_GAP_MAX: f32 = 500.0;

    /// Speed
    pub const INITIAL_SPEED: f32 = 4.0;
    pub const SPEED_INCREMENT: f32 = 0.05;

    /// How many player widths ahead a key press is accepted
    pub const KEY_PRESS_ZONE_FACTOR: f32 = 2.5;

    /// Frames a freshly cleared obstacle keeps its highlight
    pub const CLEAR_FLASH_FRAMES: u64 = 15;
}

/// Viewport dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height * consts::GROUND_FRACTION
    }
}

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_follows_height() {
        let viewport = Viewport::new(800.0, 600.0);
        assert!((viewport.ground_y() - 510.0).abs() < 1e-4);
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::from_corner(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_corner(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_center(Vec2::new(14.0, 5.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }
}
