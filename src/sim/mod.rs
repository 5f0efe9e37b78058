//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock timers
//! - Seeded RNG only
//! - Stable iteration order (spawn order, removals in reverse)
//! - No rendering or platform dependencies

pub mod effects;
pub mod expression;
pub mod physics;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::{Effects, MAX_PARTICLES, Particle, TextEffect};
pub use expression::{Expression, MouthState};
pub use physics::{Rect, advance_player, is_grounded, jump};
pub use scoring::{Difficulty, PassOutcome, ScoreTracker};
pub use state::{
    Collectible, GameEvent, GamePhase, GameState, Ground, Obstacle, ObstacleKind, Player,
    SoundEffect, TrailPoint, Viewport,
};
pub use tick::{TickInput, autopilot_wants_jump, resize, start_session, tick};
