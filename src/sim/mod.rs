//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod target;
pub mod tick;

pub use background::{Background, DecorKind, Decoration};
pub use collision::{Evaluation, evaluate_obstacles};
pub use input::{KeyOutcome, handle_key};
pub use state::{GameOverReason, GamePhase, GameSession, Obstacle, ObstacleKind, Player};
pub use target::{is_eligible, select_target};
pub use tick::tick;
