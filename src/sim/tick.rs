//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session one frame at a time.

use glam::Vec2;

use super::expression::{
    COLLECT_FACE_TICKS, COLLECT_TALK_TICKS, COMBO_FACE_TICKS, CRASH_FACE_TICKS, JUMP_FACE_TICKS,
    MouthState,
};
use super::physics::{advance_player, is_grounded, jump};
use super::spawn::{maybe_spawn_collectible, update_obstacle_timer};
use super::state::{
    Collectible, GameEvent, GamePhase, GameState, Ground, Obstacle, SoundEffect, Viewport,
};
use crate::consts::*;

/// Particles per effect burst
const JUMP_PARTICLES: usize = 8;
const PASS_PARTICLES: usize = 5;
const COLLECT_PARTICLES: usize = 15;
const CRASH_PARTICLES: usize = 30;
/// Autopilot jumps when the next obstacle is this many ticks away
const AUTOPILOT_LEAD_TICKS: f32 = 8.0;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump button level (held = true). Only the rising edge jumps.
    pub jump: bool,
    /// Attract/demo mode - the core decides when to jump
    pub autopilot: bool,
}

/// Begin a fresh session. Valid from the menu or after a game over; ignored while playing.
///
/// All session state is replaced wholesale; the viewport and tuning carry over.
pub fn start_session(state: &mut GameState, seed: u64) -> bool {
    if state.phase == GamePhase::Playing {
        return false;
    }
    let events = std::mem::take(&mut state.events);
    *state = GameState::with_viewport(seed, state.tuning.clone(), state.viewport);
    // The press that started the session must be released before it can jump
    state.jump_latch = true;
    state.events = events;
    state.phase = GamePhase::Playing;
    log::info!("Session started (seed {})", seed);
    true
}

/// Viewport changed: clamp it and recompute the ground line.
///
/// Entities already placed keep their positions; off-screen ones scroll out normally.
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.viewport = Viewport::new(width, height);
    state.ground = Ground::for_viewport(&state.viewport);
    log::debug!(
        "Viewport resized to {}x{} (ground at {})",
        state.viewport.width,
        state.viewport.height,
        state.ground.y
    );
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    let held = input.jump || (input.autopilot && autopilot_wants_jump(state));
    let jump_pressed = held && !state.jump_latch;
    state.jump_latch = held;

    match state.phase {
        GamePhase::Menu => {}
        GamePhase::GameOver => {
            // Physics frozen; let the crash effects play out
            update_cosmetics(state);
        }
        GamePhase::Playing => tick_playing(state, jump_pressed),
    }
}

fn tick_playing(state: &mut GameState, jump_pressed: bool) {
    state.time_ticks += 1;

    let can_jump = is_grounded(&state.player, state.ground.y);
    if jump_pressed && can_jump && jump(&mut state.player, state.tuning.jump_force) {
        let feet = state.player.pos + Vec2::new(state.player.width / 2.0, state.player.height);
        state
            .effects
            .spawn_particles(&mut state.rng, feet, JUMP_PARTICLES, COLOR_WHITE);
        state.emit(GameEvent::Sound(SoundEffect::Jump));
        state.player.expression.show(MouthState::Surprised, JUMP_FACE_TICKS);
    }

    // Runs after any jump override, so the jump face counts down from this tick
    state.player.expression.update();
    advance_player(&mut state.player, state.tuning.gravity, state.ground.y);

    update_obstacle_timer(state);
    maybe_spawn_collectible(state);

    let speed = state.difficulty.game_speed;
    let player_rect = state.player.rect();

    // Reverse order so removal never skips an entity
    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= speed;

        if player_rect.overlaps(&obstacle.rect()) {
            game_over(state);
            return;
        }

        if obstacle.pos.x + obstacle.size.x < 0.0 {
            let passed = state.obstacles.remove(i);
            obstacle_passed(state, &passed);
        }
    }

    for i in (0..state.collectibles.len()).rev() {
        let coin = &mut state.collectibles[i];
        coin.pos.x -= speed;
        coin.rotation += COLLECTIBLE_SPIN;

        if player_rect.overlaps(&coin.rect()) {
            let coin = state.collectibles.remove(i);
            collected(state, &coin);
        } else if coin.pos.x + coin.size.x < 0.0 {
            state.collectibles.remove(i);
        }
    }

    state.difficulty.ramp(&state.tuning);

    state.effects.update();
    decay_screen_shake(state);
}

fn obstacle_passed(state: &mut GameState, obstacle: &Obstacle) {
    let outcome = state.scoring.obstacle_passed(&state.tuning);

    if let Some(multiplier) = outcome.multiplier_up {
        log::info!(
            "Combo {} - multiplier now x{}",
            state.scoring.combo,
            multiplier
        );
        state
            .effects
            .spawn_text(format!("COMBO x{multiplier}"), obstacle.pos, COLOR_GOLD);
        state.emit(GameEvent::Sound(SoundEffect::Powerup));
        state.player.expression.show(MouthState::Smiling, COMBO_FACE_TICKS);
    }

    state.emit(GameEvent::ScoreChanged(state.scoring.score));
    state
        .effects
        .spawn_particles(&mut state.rng, obstacle.pos, PASS_PARTICLES, obstacle.color);
}

fn collected(state: &mut GameState, coin: &Collectible) {
    let points = state.scoring.collected(&state.tuning);

    state
        .effects
        .spawn_text(format!("+{points}"), coin.pos, COLOR_GREEN);
    state
        .effects
        .spawn_particles(&mut state.rng, coin.pos, COLLECT_PARTICLES, COLOR_YELLOW);
    state.emit(GameEvent::Sound(SoundEffect::Score));

    let expression = &mut state.player.expression;
    expression.show(MouthState::Smiling, COLLECT_FACE_TICKS);
    expression.talk(COLLECT_TALK_TICKS);

    state.emit(GameEvent::ScoreChanged(state.scoring.score));
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.player.expression.show(MouthState::Sad, CRASH_FACE_TICKS);
    state.screen_shake = CRASH_SHAKE;

    let center = state.player.center();
    state
        .effects
        .spawn_particles(&mut state.rng, center, CRASH_PARTICLES, COLOR_RED);
    state.emit(GameEvent::Sound(SoundEffect::Crash));

    let score = state.scoring.score;
    state.emit(GameEvent::GameOver { score });
    log::info!(
        "Game over: score {} (combo {}, x{}) after {} ticks",
        score,
        state.scoring.combo,
        state.scoring.multiplier,
        state.time_ticks
    );
}

/// Animations that keep running after the simulation freezes
fn update_cosmetics(state: &mut GameState) {
    state.player.expression.update();
    state.effects.update();
    decay_screen_shake(state);
}

fn decay_screen_shake(state: &mut GameState) {
    if state.screen_shake > 0.0 {
        state.screen_shake *= SHAKE_DECAY;
        if state.screen_shake < SHAKE_CUTOFF {
            state.screen_shake = 0.0;
        }
    }
}

/// Demo AI: hold jump while grounded and the nearest obstacle ahead is close
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Playing || !is_grounded(&state.player, state.ground.y) {
        return false;
    }
    let front = state.player.pos.x + state.player.width;
    let lead = state.difficulty.game_speed * AUTOPILOT_LEAD_TICKS;
    state
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x >= state.player.pos.x)
        .map(|o| o.pos.x - front)
        .any(|gap| gap <= lead)
}
