//! Game state and core simulation types
//!
//! Everything the frame tick and the key handler touch lives in `GameSession`.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::spawn;
use crate::consts::*;
use crate::{Aabb, Tuning, Viewport};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Instructions screen, waiting for any key
    Start,
    /// Active run
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Player ran into an uncleared obstacle
    Collision,
    /// An uncleared obstacle scrolled off the left edge
    Missed,
    /// An alphanumeric key that did not match the target
    WrongKey,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameOverReason::Collision => "collision",
            GameOverReason::Missed => "missed",
            GameOverReason::WrongKey => "wrong key",
        })
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre of the player box
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    /// Centre y when standing on the ground
    pub ground_level: f32,
    pub airborne: bool,
    /// Frames spent in the current hop
    pub jump_frames: u32,
    pub gravity: f32,
    pub hop_force: f32,
}

impl Player {
    pub fn new(ground_y: f32, tuning: &Tuning) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        let ground_level = ground_y - size.y / 2.0;
        Self {
            pos: Vec2::new(PLAYER_X, ground_level),
            vel_y: 0.0,
            size,
            ground_level,
            airborne: false,
            jump_frames: 0,
            gravity: tuning.gravity,
            hop_force: tuning.hop_force,
        }
    }

    /// Start a hop; ignored unless standing on the ground
    pub fn hop(&mut self) -> bool {
        if self.pos.y < self.ground_level - 1.0 {
            return false;
        }
        self.vel_y = self.hop_force;
        self.airborne = true;
        self.jump_frames = 0;
        true
    }

    /// Integrate one frame of the hop arc
    pub fn update(&mut self) {
        if !self.airborne {
            self.pos.y = self.ground_level;
            return;
        }

        self.pos.y += self.vel_y;
        self.vel_y += self.gravity;
        self.jump_frames += 1;

        if self.pos.y >= self.ground_level {
            self.pos.y = self.ground_level;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    /// Move the ground under the player, keeping any hop height
    pub fn set_ground_level(&mut self, ground_level: f32) {
        let height_above = self.ground_level - self.pos.y;
        self.ground_level = ground_level;
        self.pos.y = ground_level - height_above;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Pipe,
    Block,
}

impl ObstacleKind {
    pub fn width(self) -> f32 {
        match self {
            ObstacleKind::Pipe => PIPE_WIDTH,
            ObstacleKind::Block => BLOCK_WIDTH,
        }
    }
}

/// An obstacle standing on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Lowercase letter that clears this obstacle
    pub required_key: char,
    pub cleared: bool,
    /// Derived every frame by the target selector
    pub is_target: bool,
}

impl Obstacle {
    pub fn new(
        id: u32,
        kind: ObstacleKind,
        x: f32,
        ground_y: f32,
        height: f32,
        required_key: char,
    ) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, ground_y - height),
            size: Vec2::new(kind.width(), height),
            required_key,
            cleared: false,
            is_target: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn scroll(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Fully past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -self.size.x
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }
}

/// One play session: the whole mutable game world
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u32,
    /// Scroll speed, world units per frame
    pub speed: f32,
    pub player: Player,
    /// Obstacles in spawn order (left to right)
    pub obstacles: Vec<Obstacle>,
    /// Id of the obstacle currently waiting for a key press
    pub target: Option<u32>,
    /// Frames since the run (re)started
    pub frame_count: u64,
    /// Frame of the last successful clear (highlight feedback)
    pub last_clear_frame: Option<u64>,
    pub game_over_reason: Option<GameOverReason>,
    /// Decorative parallax layers (not gameplay-affecting)
    pub background: Background,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a session on the start screen with one obstacle waiting
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let ground_y = viewport.ground_y();
        let mut session = Self {
            player: Player::new(ground_y, &tuning),
            speed: tuning.initial_speed,
            tuning,
            viewport,
            phase: GamePhase::Start,
            score: 0,
            obstacles: Vec::new(),
            target: None,
            frame_count: 0,
            last_clear_frame: None,
            game_over_reason: None,
            background: Background::new(seed, viewport),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        session.spawn_obstacle();

        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a fresh obstacle at the right edge
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let obstacle = spawn::new_obstacle(
            &mut self.rng,
            &self.tuning,
            id,
            self.viewport.width,
            self.viewport.ground_y(),
        );
        log::debug!(
            "Spawned {:?} #{} key '{}' height {:.0}",
            obstacle.kind,
            obstacle.id,
            obstacle.required_key,
            obstacle.size.y
        );
        self.obstacles.push(obstacle);
    }

    /// The obstacle the player must answer, if any
    pub fn target_obstacle(&self) -> Option<&Obstacle> {
        let id = self.target?;
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Start {
            self.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", self.seed);
        }
    }

    /// End the run; only the first reason of a run is kept
    pub fn end_run(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        log::info!(
            "Game over: {} (score {}, speed {:.2})",
            reason,
            self.score,
            self.speed
        );
    }

    /// Reset the run and go straight back to playing
    pub fn restart(&mut self) {
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.obstacles.clear();
        self.player = Player::new(self.viewport.ground_y(), &self.tuning);
        self.target = None;
        self.frame_count = 0;
        self.last_clear_frame = None;
        self.game_over_reason = None;
        self.spawn_obstacle();
        self.phase = GamePhase::Playing;
        log::info!("Run restarted");
    }

    /// Viewport changed: move the ground and redo the scenery only
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        let ground_y = self.viewport.ground_y();
        self.player
            .set_ground_level(ground_y - self.player.size.y / 2.0);
        self.background.regenerate(self.viewport);
        log::debug!("Resized to {}x{}", self.viewport.width, self.viewport.height);
    }
}
