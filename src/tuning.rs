//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Defaults reproduce the classic feel; alternate balances can be loaded from JSON.

use serde::{Deserialize, Serialize};

/// Hard floor for the obstacle spawn interval (ticks)
pub const MIN_OBSTACLE_INTERVAL: f32 = 40.0;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to the player each tick (px/tick²)
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_force: f32,
    /// Scroll speed at session start (px/tick)
    pub base_speed: f32,
    /// Scroll speed added every playing tick
    pub speed_ramp: f32,
    /// Ticks between obstacles at session start
    pub obstacle_interval: f32,
    /// Interval reduction per spawned obstacle
    pub interval_decrement: f32,
    /// Interval never drops below this
    pub min_obstacle_interval: f32,
    /// Per-tick probability of spawning a collectible
    pub collectible_chance: f64,
    /// Base points for passing an obstacle (scaled by multiplier)
    pub obstacle_points: u64,
    /// Flat points for a collectible
    pub collectible_points: u64,
    /// Combo length that bumps the multiplier
    pub combo_step: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.9,
            jump_force: -18.0,
            base_speed: 8.0,
            speed_ramp: 0.001,
            obstacle_interval: 70.0,
            interval_decrement: 0.2,
            min_obstacle_interval: MIN_OBSTACLE_INTERVAL,
            collectible_chance: 0.02,
            obstacle_points: 10,
            collectible_points: 50,
            combo_step: 5,
        }
    }
}

impl Tuning {
    /// Parse a tuning from JSON (missing fields take defaults) and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Clamp values that would break simulation invariants
    // Negated comparisons so NaN also fails the check
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validated(mut self) -> Self {
        if !(self.min_obstacle_interval >= MIN_OBSTACLE_INTERVAL) {
            log::warn!(
                "min_obstacle_interval {} below floor, clamping to {}",
                self.min_obstacle_interval,
                MIN_OBSTACLE_INTERVAL
            );
            self.min_obstacle_interval = MIN_OBSTACLE_INTERVAL;
        }
        if !(self.obstacle_interval >= self.min_obstacle_interval) {
            self.obstacle_interval = self.min_obstacle_interval;
        }
        if !(self.interval_decrement >= 0.0) {
            self.interval_decrement = 0.0;
        }
        if !(self.speed_ramp >= 0.0) {
            self.speed_ramp = 0.0;
        }
        if !self.gravity.is_finite() {
            self.gravity = Self::default().gravity;
        }
        if !self.jump_force.is_finite() {
            self.jump_force = Self::default().jump_force;
        }
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            self.base_speed = Self::default().base_speed;
        }
        self.collectible_chance = if self.collectible_chance.is_finite() {
            self.collectible_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.combo_step = self.combo_step.max(1);
        self
    }
}
