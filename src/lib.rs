//! Dash Runner - A side-scrolling jump-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, scoring, game state)
//! - `platform`: Collaborator traits for rendering, audio, input and reporting
//! - `driver`: Fixed timestep loop that feeds the simulation and its collaborators
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `highscores`: Best score tracking

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::GameDriver;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default viewport used before the first resize
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
    /// Viewport dimensions are clamped to at least this size
    pub const MIN_VIEWPORT_WIDTH: f32 = 320.0;
    pub const MIN_VIEWPORT_HEIGHT: f32 = 240.0;

    /// Ground band at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 120.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 45.0;
    /// Player spawns this far above the bottom of the viewport (falls onto the ground)
    pub const PLAYER_SPAWN_OFFSET: f32 = 180.0;
    /// Visual tilt limit (degrees)
    pub const MAX_ROTATION: f32 = 25.0;
    /// Squash factor applied on jump
    pub const JUMP_SQUASH: f32 = 0.8;
    /// Ticks until the jump squash resets (~100ms)
    pub const JUMP_SQUASH_TICKS: u32 = 6;

    /// Trail
    pub const TRAIL_LENGTH: usize = 5;
    pub const TRAIL_DECAY: f32 = 0.2;

    /// Obstacle geometry
    pub const SPIKE_WIDTH: f32 = 30.0;
    pub const SPIKE_HEIGHT: f32 = 40.0;
    pub const BLOCK_SIZE: f32 = 40.0;
    /// Blocks hover up to this far above the ground (still lower than the player)
    pub const BLOCK_MAX_HOVER: f32 = 30.0;

    /// Collectible geometry
    pub const COLLECTIBLE_SIZE: f32 = 25.0;
    pub const COLLECTIBLE_MIN_HEIGHT: f32 = 60.0;
    pub const COLLECTIBLE_MAX_HEIGHT: f32 = 200.0;
    pub const COLLECTIBLE_SPIN: f32 = 0.1;

    /// Screen shake
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_CUTOFF: f32 = 0.1;
    pub const CRASH_SHAKE: f32 = 2.0;

    /// Colors (0xRRGGBB)
    pub const COLOR_WHITE: u32 = 0xFFFFFF;
    pub const COLOR_GOLD: u32 = 0xFFD700;
    pub const COLOR_GREEN: u32 = 0x00FF00;
    pub const COLOR_YELLOW: u32 = 0xFFFF00;
    pub const COLOR_RED: u32 = 0xFF0000;
    pub const OBSTACLE_PALETTE: [u32; 4] = [0xFF6B6B, 0x4ECDC4, 0xFFD166, 0x9B5DE5];
}

/// Ground line for a viewport height
#[inline]
pub fn ground_line(viewport_height: f32) -> f32 {
    viewport_height - consts::GROUND_HEIGHT
}

/// Clamp a viewport dimension to a usable value (non-finite becomes the minimum)
#[inline]
pub fn clamp_dimension(value: f32, min: f32) -> f32 {
    if value.is_finite() { value.max(min) } else { min }
}
