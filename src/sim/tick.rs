//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one frame.

use super::collision::evaluate_obstacles;
use super::spawn::should_spawn;
use super::state::{GamePhase, GameSession};
use super::target::select_target;

/// Advance the session by one fixed frame
pub fn tick(state: &mut GameSession) {
    state.frame_count += 1;

    // Scenery keeps drifting on the start and game over screens
    state.background.scroll(state.speed, state.viewport);

    if state.phase != GamePhase::Playing {
        return;
    }

    state.player.update();

    if should_spawn(
        &mut state.rng,
        &state.tuning,
        &state.obstacles,
        state.viewport.width,
        state.speed,
    ) {
        state.spawn_obstacle();
    }

    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.scroll(speed);
    }

    let target = select_target(
        &mut state.obstacles,
        &state.player,
        state.tuning.key_press_zone_factor,
    );
    if target != state.target {
        log::trace!("Target {:?} -> {:?}", state.target, target);
    }
    state.target = target;

    let eval = evaluate_obstacles(&mut state.obstacles, &state.player.aabb());
    if state.target.is_some_and(|id| eval.removed.contains(&id)) {
        state.target = None;
    }
    if let Some(reason) = eval.ending {
        state.end_run(reason);
    }
}
