//! Game state and core simulation types
//!
//! Everything a session owns lives in `GameState`. Renderers read it, only `tick` mutates it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::expression::Expression;
use super::physics::Rect;
use super::scoring::{Difficulty, ScoreTracker};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{clamp_dimension, ground_line};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start signal, nothing advances
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; physics frozen, cosmetics still animate
    GameOver,
}

/// Sound cues the core asks the audio collaborator to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    Jump,
    Score,
    Crash,
    Powerup,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Score => "score",
            SoundEffect::Crash => "crash",
            SoundEffect::Powerup => "powerup",
        }
    }
}

/// Events produced by a tick, drained by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a sound
    Sound(SoundEffect),
    /// Score changed (HUD refresh)
    ScoreChanged(u64),
    /// Session ended with this score
    GameOver { score: u64 },
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 0-1, fades each tick
    pub life: f32,
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub velocity_y: f32,
    pub width: f32,
    pub height: f32,
    /// Airborne; jump unavailable
    pub is_jumping: bool,
    /// Visual tilt in degrees, clamped to ±MAX_ROTATION
    pub rotation: f32,
    /// Transient squash factor (1.0 at rest)
    pub scale: f32,
    /// Ticks until `scale` snaps back to 1.0
    pub squash_ticks: u32,
    /// Recent centre positions (oldest first)
    pub trail: Vec<TrailPoint>,
    pub expression: Expression,
}

impl Player {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, viewport_height - PLAYER_SPAWN_OFFSET),
            velocity_y: 0.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            is_jumping: false,
            rotation: 0.0,
            scale: 1.0,
            squash_ticks: 0,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
            expression: Expression::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Record current centre to the trail and fade older points
    pub fn record_trail(&mut self) {
        let pos = self.center();
        self.trail.push(TrailPoint { pos, life: 1.0 });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
        for point in &mut self.trail {
            point.life -= TRAIL_DECAY;
        }
        self.trail.retain(|p| p.life > 0.0);
    }
}

/// Obstacle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Triangle resting on the ground line
    Spike,
    /// Square hovering just above the ground
    Block,
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A spinning coin worth flat points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
    /// Visual spin (radians)
    pub rotation: f32,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Screen dimensions the simulation lays itself out against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Build a viewport, clamping to the minimum usable size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_dimension(width, MIN_VIEWPORT_WIDTH),
            height: clamp_dimension(height, MIN_VIEWPORT_HEIGHT),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Ground band at the bottom of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// Top edge of the ground (player rests on it)
    pub y: f32,
    pub height: f32,
}

impl Ground {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            y: ground_line(viewport.height),
            height: GROUND_HEIGHT,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub scoring: ScoreTracker,
    pub difficulty: Difficulty,
    /// Ticks since the last obstacle spawn
    pub obstacle_timer: u32,
    /// Camera shake intensity (decays toward 0)
    pub screen_shake: f32,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    pub viewport: Viewport,
    pub ground: Ground,
    pub player: Player,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles (spawn order)
    pub collectibles: Vec<Collectible>,
    /// Particles and floating text (not gameplay-affecting)
    pub effects: Effects,
    /// Balance values for this session
    pub tuning: Tuning,
    /// Jump input level seen last tick (for edge detection)
    #[serde(skip)]
    pub jump_latch: bool,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in the menu phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_viewport(seed, tuning, Viewport::default())
    }

    pub fn with_viewport(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let tuning = tuning.validated();
        Self {
            seed,
            phase: GamePhase::Menu,
            scoring: ScoreTracker::default(),
            difficulty: Difficulty::new(&tuning),
            obstacle_timer: 0,
            screen_shake: 0.0,
            time_ticks: 0,
            viewport,
            ground: Ground::for_viewport(&viewport),
            player: Player::new(viewport.height),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            effects: Effects::default(),
            tuning,
            jump_latch: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
