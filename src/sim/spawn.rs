//! Obstacle spawning
//!
//! Spawn chance scales with speed, so faster runs get denser obstacles.

use rand::Rng;

use super::state::{Obstacle, ObstacleKind};
use crate::Tuning;
use crate::consts::KEY_ALPHABET;

/// Decide whether a new obstacle should be appended this frame
pub fn should_spawn<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    obstacles: &[Obstacle],
    world_width: f32,
    speed: f32,
) -> bool {
    let considered = match obstacles.last() {
        None => true,
        Some(last) => {
            obstacles.len() < tuning.max_obstacles
                && last.left()
                    < world_width - sample(rng, tuning.spawn_gap_min, tuning.spawn_gap_max)
        }
    };

    considered && rng.random::<f32>() < tuning.spawn_rate_per_speed * speed
}

/// Roll a new obstacle just past the right edge
pub fn new_obstacle<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    id: u32,
    world_width: f32,
    ground_y: f32,
) -> Obstacle {
    let height = sample(rng, tuning.obstacle_min_height, tuning.obstacle_max_height);
    let kind = if rng.random::<f32>() > tuning.pipe_threshold {
        ObstacleKind::Pipe
    } else {
        ObstacleKind::Block
    };
    let required_key = KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char;

    Obstacle::new(id, kind, world_width, ground_y, height, required_key)
}

/// Uniform draw in [lo, hi), or `lo` when the range is empty
pub(crate) fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn obstacle_at(id: u32, x: f32) -> Obstacle {
        Obstacle::new(id, ObstacleKind::Block, x, 510.0, 50.0, 'a')
    }

    #[test]
    fn test_new_obstacle_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let tuning = Tuning::default();
        let mut pipes = 0;
        for id in 0..500 {
            let obs = new_obstacle(&mut rng, &tuning, id, 800.0, 510.0);
            assert_eq!(obs.left(), 800.0);
            assert!(obs.size.y >= 40.0 && obs.size.y <= 80.0);
            assert!((obs.pos.y + obs.size.y - 510.0).abs() < 1e-3);
            assert!(obs.required_key.is_ascii_lowercase());
            assert!(!obs.cleared);
            assert!(!obs.is_target);
            match obs.kind {
                ObstacleKind::Pipe => {
                    pipes += 1;
                    assert_eq!(obs.size.x, 50.0);
                }
                ObstacleKind::Block => assert_eq!(obs.size.x, 40.0),
            }
        }
        // Roughly 60% pipes
        assert!((240..360).contains(&pipes), "pipes = {}", pipes);
    }

    #[test]
    fn test_empty_list_always_considered() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        // Probability 0.015 * 100 >= 1 makes the roll certain
        assert!(should_spawn(&mut rng, &tuning, &[], 800.0, 100.0));
    }

    #[test]
    fn test_zero_speed_never_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            assert!(!should_spawn(&mut rng, &tuning, &[], 800.0, 0.0));
        }
    }

    #[test]
    fn test_needs_gap_behind_last_obstacle() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        // Last obstacle only 150 from the edge: inside any gap in [200, 500)
        let near = [obstacle_at(1, 650.0)];
        for _ in 0..200 {
            assert!(!should_spawn(&mut rng, &tuning, &near, 800.0, 100.0));
        }
        // 600 from the edge clears every possible gap
        let far = [obstacle_at(1, 200.0)];
        assert!(should_spawn(&mut rng, &tuning, &far, 800.0, 100.0));
    }

    #[test]
    fn test_list_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning::default();
        let full: Vec<_> = (0..5).map(|i| obstacle_at(i, -10.0)).collect();
        for _ in 0..200 {
            assert!(!should_spawn(&mut rng, &tuning, &full, 800.0, 100.0));
        }
    }

    #[test]
    fn test_sample_handles_empty_range() {
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(sample(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(sample(&mut rng, 5.0, 2.0), 5.0);
    }
}
