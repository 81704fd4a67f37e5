//! Collision and off-screen resolution
//!
//! Uncleared obstacles end the run either by touching the player or by
//! leaving the screen.

use super::state::{GameOverReason, Obstacle};
use crate::Aabb;

/// Result of evaluating the obstacle list for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// First game-ending event found, in list order
    pub ending: Option<GameOverReason>,
    /// Ids of obstacles removed this frame
    pub removed: Vec<u32>,
}

/// Check every obstacle against the player box and drop the ones that
/// scrolled off the left edge.
///
/// Collision is checked before removal for the same obstacle, and removal
/// happens regardless of the outcome.
pub fn evaluate_obstacles(obstacles: &mut Vec<Obstacle>, player_box: &Aabb) -> Evaluation {
    let mut eval = Evaluation::default();

    obstacles.retain(|obstacle| {
        if !obstacle.cleared && player_box.overlaps(&obstacle.aabb()) {
            eval.ending.get_or_insert(GameOverReason::Collision);
        }

        if !obstacle.is_offscreen() {
            return true;
        }
        if !obstacle.cleared {
            eval.ending.get_or_insert(GameOverReason::Missed);
        }
        eval.removed.push(obstacle.id);
        false
    });

    eval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::{ObstacleKind, Player};

    fn player_box() -> Aabb {
        Player::new(510.0, &Tuning::default()).aabb()
    }

    fn pipe(id: u32, x: f32) -> Obstacle {
        Obstacle::new(id, ObstacleKind::Pipe, x, 510.0, 60.0, 'q')
    }

    #[test]
    fn test_overlap_ends_run() {
        let mut obstacles = vec![pipe(1, 90.0)];
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, Some(GameOverReason::Collision));
        assert_eq!(obstacles.len(), 1);
        assert!(eval.removed.is_empty());
    }

    #[test]
    fn test_cleared_obstacles_pass_through() {
        let mut obstacles = vec![pipe(1, 90.0)];
        obstacles[0].cleared = true;
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, None);
        assert_eq!(obstacles.len(), 1);
    }

    #[test]
    fn test_adjacent_is_not_a_hit() {
        // Player spans x 60..100; a pipe starting at 100 only touches it
        let mut obstacles = vec![pipe(1, 100.0)];
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, None);
    }

    #[test]
    fn test_uncleared_offscreen_is_missed_and_removed() {
        let mut obstacles = vec![pipe(1, -51.0), pipe(2, 400.0)];
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, Some(GameOverReason::Missed));
        assert_eq!(eval.removed, vec![1]);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
    }

    #[test]
    fn test_cleared_offscreen_removed_quietly() {
        let mut obstacles = vec![pipe(1, -51.0)];
        obstacles[0].cleared = true;
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, None);
        assert_eq!(eval.removed, vec![1]);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_first_reason_in_list_order_wins() {
        let mut obstacles = vec![pipe(1, -60.0), pipe(2, 90.0)];
        let eval = evaluate_obstacles(&mut obstacles, &player_box());
        assert_eq!(eval.ending, Some(GameOverReason::Missed));
        assert_eq!(obstacles.len(), 1);
    }
}
