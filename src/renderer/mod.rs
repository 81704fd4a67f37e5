//! Rendering module
//!
//! The simulation hands renderers a read-only `RenderSnapshot` once per frame.

pub mod terminal;

pub use terminal::TerminalRenderer;

use serde::Serialize;

use crate::Viewport;
use crate::consts::CLEAR_FLASH_FRAMES;
use crate::sim::{Decoration, GameOverReason, GamePhase, GameSession, Obstacle, Player};

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot<'a> {
    pub viewport: Viewport,
    pub ground_y: f32,
    pub phase: GamePhase,
    pub score: u32,
    pub speed: f32,
    pub game_over_reason: Option<GameOverReason>,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub clouds: &'a [Decoration],
    pub hills: &'a [Decoration],
    pub frame_count: u64,
    pub last_clear_frame: Option<u64>,
}

impl RenderSnapshot<'_> {
    /// Cleared obstacles keep a highlight for a few frames after the press
    pub fn clear_flash_active(&self) -> bool {
        self.last_clear_frame
            .is_some_and(|frame| self.frame_count.saturating_sub(frame) < CLEAR_FLASH_FRAMES)
    }
}

impl GameSession {
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            viewport: self.viewport,
            ground_y: self.viewport.ground_y(),
            phase: self.phase,
            score: self.score,
            speed: self.speed,
            game_over_reason: self.game_over_reason,
            player: &self.player,
            obstacles: &self.obstacles,
            clouds: &self.background.clouds,
            hills: &self.background.hills,
            frame_count: self.frame_count,
            last_clear_frame: self.last_clear_frame,
        }
    }
}

/// Something that can draw a frame
pub trait Renderer {
    type Error;

    fn render(&mut self, frame: &RenderSnapshot<'_>) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::{handle_key, tick};

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = GameSession::new(8, Tuning::default(), Viewport::new(800.0, 600.0));
        handle_key(&mut session, Some('a'));
        tick(&mut session);

        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.obstacles.len(), session.obstacles.len());
        assert_eq!(snap.clouds.len(), 5);
        assert_eq!(snap.frame_count, 1);
        assert!(!snap.clear_flash_active());
    }

    #[test]
    fn test_clear_flash_window() {
        let mut session = GameSession::new(8, Tuning::default(), Viewport::new(800.0, 600.0));
        session.last_clear_frame = Some(10);
        session.frame_count = 24;
        assert!(session.snapshot().clear_flash_active());
        session.frame_count = 25;
        assert!(!session.snapshot().clear_flash_active());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(8, Tuning::default(), Viewport::new(800.0, 600.0));
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        assert!(json.contains("\"required_key\""));
    }
}
