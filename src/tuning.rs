//! Game balance values
//!
//! Defaults mirror `consts`; a JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Scroll speed at the start of every run
    pub initial_speed: f32,
    /// Added to the scroll speed on every cleared obstacle
    pub speed_increment: f32,

    // === Targeting ===
    /// How many player widths ahead an obstacle becomes targetable
    pub key_press_zone_factor: f32,

    // === Spawning ===
    /// Per-frame spawn probability per unit of speed
    pub spawn_rate_per_speed: f32,
    pub max_obstacles: usize,
    pub spawn_gap_min: f32,
    pub spawn_gap_max: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub pipe_threshold: f32,

    // === Player ===
    pub gravity: f32,
    pub hop_force: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,

            key_press_zone_factor: KEY_PRESS_ZONE_FACTOR,

            spawn_rate_per_speed: SPAWN_RATE_PER_SPEED,
            max_obstacles: MAX_OBSTACLES,
            spawn_gap_min: SPAWN_GAP_MIN,
            spawn_gap_max: SPAWN_GAP_MAX,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            pipe_threshold: PIPE_THRESHOLD,

            gravity: PLAYER_GRAVITY,
            hop_force: PLAYER_HOP_FORCE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
