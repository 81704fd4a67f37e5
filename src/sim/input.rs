//! Key event dispatch
//!
//! A single key press is interpreted according to the current phase.

use super::state::{GameOverReason, GamePhase, GameSession};

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing happened
    Ignored,
    /// Left the start screen
    Started,
    /// New run after a game over
    Restarted,
    /// Target obstacle cleared
    Cleared { id: u32 },
    /// Run ended on a mismatching key
    WrongKey,
}

/// Handle one key press. `None` stands for an event without a character.
pub fn handle_key(session: &mut GameSession, key: Option<char>) -> KeyOutcome {
    let Some(key) = key else {
        return KeyOutcome::Ignored;
    };

    match session.phase {
        GamePhase::Start => {
            session.start();
            KeyOutcome::Started
        }
        GamePhase::GameOver => {
            if key.eq_ignore_ascii_case(&'r') {
                session.restart();
                KeyOutcome::Restarted
            } else {
                KeyOutcome::Ignored
            }
        }
        GamePhase::Playing => press_target_key(session, key),
    }
}

fn press_target_key(session: &mut GameSession, key: char) -> KeyOutcome {
    let Some(target_id) = session.target else {
        return KeyOutcome::Ignored;
    };
    let pressed = key.to_ascii_lowercase();

    let Some(obstacle) = session.obstacles.iter_mut().find(|o| o.id == target_id) else {
        // Stale reference; the obstacle is gone
        session.target = None;
        return KeyOutcome::Ignored;
    };

    if pressed == obstacle.required_key {
        obstacle.cleared = true;
        obstacle.is_target = false;
        session.target = None;
        session.score += 1;
        session.speed += session.tuning.speed_increment;
        session.player.hop();
        session.last_clear_frame = Some(session.frame_count);
        log::debug!(
            "Cleared #{} with '{}' (score {}, speed {:.2})",
            target_id,
            pressed,
            session.score,
            session.speed
        );
        KeyOutcome::Cleared { id: target_id }
    } else if pressed.is_ascii_alphanumeric() {
        session.end_run(GameOverReason::WrongKey);
        KeyOutcome::WrongKey
    } else {
        KeyOutcome::Ignored
    }
}
