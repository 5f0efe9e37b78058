//! Score, combo and difficulty ramp

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Outcome of clearing one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    /// Points awarded for this pass
    pub points: u64,
    /// New multiplier if this pass completed a combo step
    pub multiplier_up: Option<u32>,
}

/// Score, combo streak and multiplier for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    /// Obstacles cleared this session
    pub combo: u32,
    /// Applied to obstacle points, always >= 1
    pub multiplier: u32,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: 1,
        }
    }
}

impl ScoreTracker {
    /// Credit an obstacle that scrolled past.
    ///
    /// Points use the multiplier in effect *before* this pass; a pass that
    /// completes a combo step raises the multiplier for the next one.
    pub fn obstacle_passed(&mut self, tuning: &Tuning) -> PassOutcome {
        let points = tuning.obstacle_points * self.multiplier as u64;
        self.score += points;
        self.combo += 1;

        let multiplier_up = if self.combo % tuning.combo_step.max(1) == 0 {
            self.multiplier += 1;
            Some(self.multiplier)
        } else {
            None
        };

        PassOutcome {
            points,
            multiplier_up,
        }
    }

    /// Credit a collectible (flat, ignores the multiplier)
    pub fn collected(&mut self, tuning: &Tuning) -> u64 {
        self.score += tuning.collectible_points;
        tuning.collectible_points
    }
}

/// Scroll speed and spawn pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Horizontal scroll per tick
    pub game_speed: f32,
    /// Ticks between obstacle spawns
    pub obstacle_interval: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            game_speed: tuning.base_speed,
            obstacle_interval: tuning.obstacle_interval.max(tuning.min_obstacle_interval),
        }
    }

    /// Per-tick speed increase
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.game_speed += tuning.speed_ramp;
    }

    /// Tighten the spawn interval after an obstacle spawns
    pub fn obstacle_spawned(&mut self, tuning: &Tuning) {
        self.obstacle_interval =
            (self.obstacle_interval - tuning.interval_decrement).max(tuning.min_obstacle_interval);
    }
}
