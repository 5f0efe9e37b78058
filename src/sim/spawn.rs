//! Obstacle and collectible spawning
//!
//! Obstacles arrive on a shrinking interval, collectibles on a per-tick coin flip.
//! Both enter just past the right edge of the viewport.

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, GameState, Obstacle, ObstacleKind};
use crate::consts::*;

/// Advance the obstacle timer and spawn one obstacle when it runs past the interval.
/// Returns true if an obstacle was spawned.
pub fn update_obstacle_timer(state: &mut GameState) -> bool {
    state.obstacle_timer += 1;
    if (state.obstacle_timer as f32) <= state.difficulty.obstacle_interval {
        return false;
    }
    spawn_obstacle(state);
    state.obstacle_timer = 0;
    state.difficulty.obstacle_spawned(&state.tuning);
    true
}

/// Spawn a random obstacle at the right edge
pub fn spawn_obstacle(state: &mut GameState) {
    let kind = if state.rng.random_bool(0.5) {
        ObstacleKind::Spike
    } else {
        ObstacleKind::Block
    };
    let color = OBSTACLE_PALETTE[state.rng.random_range(0..OBSTACLE_PALETTE.len())];
    let hover = match kind {
        ObstacleKind::Spike => 0.0,
        ObstacleKind::Block => state.rng.random_range(0.0..=BLOCK_MAX_HOVER),
    };
    let obstacle = make_obstacle(state, kind, hover, color);
    log::debug!(
        "Spawned {:?} #{} at y={:.1} (interval {:.1})",
        obstacle.kind,
        obstacle.id,
        obstacle.pos.y,
        state.difficulty.obstacle_interval
    );
    state.obstacles.push(obstacle);
}

/// Build an obstacle of `kind` at the right edge, `hover` px above the ground
pub fn make_obstacle(state: &mut GameState, kind: ObstacleKind, hover: f32, color: u32) -> Obstacle {
    let size = match kind {
        ObstacleKind::Spike => Vec2::new(SPIKE_WIDTH, SPIKE_HEIGHT),
        ObstacleKind::Block => Vec2::splat(BLOCK_SIZE),
    };
    Obstacle {
        id: state.next_entity_id(),
        kind,
        pos: Vec2::new(state.viewport.width, state.ground.y - size.y - hover),
        size,
        color,
    }
}

/// Roll for a collectible this tick. Returns true if one was spawned.
pub fn maybe_spawn_collectible(state: &mut GameState) -> bool {
    if !state.rng.random_bool(state.tuning.collectible_chance) {
        return false;
    }
    let height = state
        .rng
        .random_range(COLLECTIBLE_MIN_HEIGHT..=COLLECTIBLE_MAX_HEIGHT);
    let y = state.ground.y - height;
    let collectible = Collectible {
        id: state.next_entity_id(),
        pos: Vec2::new(state.viewport.width, y),
        size: Vec2::splat(COLLECTIBLE_SIZE),
        color: COLOR_GOLD,
        rotation: 0.0,
    };
    log::debug!("Spawned collectible #{} at y={:.1}", collectible.id, y);
    state.collectibles.push(collectible);
    true
}
