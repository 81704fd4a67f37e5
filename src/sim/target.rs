//! Target selection
//!
//! Picks the one obstacle the next key press is aimed at.

use super::state::{Obstacle, Player};

/// Whether an obstacle sits inside the press zone and still needs a key
#[inline]
pub fn is_eligible(obstacle: &Obstacle, player: &Player, zone_factor: f32) -> bool {
    let reach = player.pos.x + player.size.x * zone_factor;
    let tail = player.pos.x - player.size.x / 2.0;
    !obstacle.cleared && obstacle.left() < reach && obstacle.right() > tail
}

/// Mark the first eligible obstacle in list order as the target and
/// clear the flag everywhere else. Returns the target's id.
pub fn select_target(obstacles: &mut [Obstacle], player: &Player, zone_factor: f32) -> Option<u32> {
    let mut target = None;
    for obstacle in obstacles.iter_mut() {
        let picked = target.is_none() && is_eligible(obstacle, player, zone_factor);
        obstacle.is_target = picked;
        if picked {
            target = Some(obstacle.id);
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::KEY_PRESS_ZONE_FACTOR;
    use crate::sim::state::ObstacleKind;

    fn player() -> Player {
        Player::new(510.0, &Tuning::default())
    }

    fn block(id: u32, x: f32) -> Obstacle {
        Obstacle::new(id, ObstacleKind::Block, x, 510.0, 50.0, 'a')
    }

    #[test]
    fn test_leftmost_eligible_wins() {
        let p = player();
        let mut obstacles = vec![block(1, 120.0), block(2, 160.0)];
        let target = select_target(&mut obstacles, &p, KEY_PRESS_ZONE_FACTOR);
        assert_eq!(target, Some(1));
        assert!(obstacles[0].is_target);
        assert!(!obstacles[1].is_target);
    }

    #[test]
    fn test_cleared_obstacles_are_skipped() {
        let p = player();
        let mut obstacles = vec![block(1, 120.0), block(2, 160.0)];
        obstacles[0].cleared = true;
        obstacles[0].is_target = true;
        let target = select_target(&mut obstacles, &p, KEY_PRESS_ZONE_FACTOR);
        assert_eq!(target, Some(2));
        assert!(!obstacles[0].is_target);
        assert!(obstacles[1].is_target);
    }

    #[test]
    fn test_zone_edges() {
        let p = player();
        // Reach is 80 + 40 * 2.5 = 180, tail is 80 - 20 = 60
        assert!(!is_eligible(&block(1, 180.0), &p, KEY_PRESS_ZONE_FACTOR));
        assert!(is_eligible(&block(1, 179.0), &p, KEY_PRESS_ZONE_FACTOR));
        // Right edge exactly at the tail is already behind
        assert!(!is_eligible(&block(1, 20.0), &p, KEY_PRESS_ZONE_FACTOR));
        assert!(is_eligible(&block(1, 21.0), &p, KEY_PRESS_ZONE_FACTOR));
    }

    #[test]
    fn test_no_target_out_of_zone() {
        let p = player();
        let mut obstacles = vec![block(1, -30.0), block(2, 400.0)];
        obstacles[1].is_target = true;
        assert_eq!(select_target(&mut obstacles, &p, KEY_PRESS_ZONE_FACTOR), None);
        assert!(obstacles.iter().all(|o| !o.is_target));
    }

    #[test]
    fn test_wider_zone_reaches_further() {
        let p = player();
        let mut obstacles = vec![block(1, 250.0)];
        assert_eq!(select_target(&mut obstacles, &p, KEY_PRESS_ZONE_FACTOR), None);
        assert_eq!(select_target(&mut obstacles, &p, 5.0), Some(1));
    }
}
