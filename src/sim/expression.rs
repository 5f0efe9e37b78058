//! Cosmetic mouth animation for the player's face
//!
//! A continuous open/close oscillation runs every tick. Discrete gameplay
//! events override the mouth shape for a few ticks, then it falls back to normal.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Mouth shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouthState {
    #[default]
    Normal,
    Smiling,
    Surprised,
    Sad,
}

/// Cycle speed while talking (radians/tick)
const TALK_CYCLE_SPEED: f32 = 0.3;
/// Cycle speed while idle ("breathing")
const IDLE_CYCLE_SPEED: f32 = 0.05;

/// Ticks each event holds its mouth shape
pub const JUMP_FACE_TICKS: u32 = 10;
pub const COMBO_FACE_TICKS: u32 = 15;
pub const COLLECT_FACE_TICKS: u32 = 20;
pub const COLLECT_TALK_TICKS: u32 = 10;
pub const CRASH_FACE_TICKS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expression {
    pub mouth: MouthState,
    /// Ticks until the mouth reverts to normal
    pub animation_timer: u32,
    /// 0 = closed, 1 = fully open
    pub openness: f32,
    /// Phase accumulator in [0, π)
    pub cycle: f32,
    pub talking: bool,
    pub talk_timer: u32,
}

impl Expression {
    /// Advance timers and the open/close oscillation by one tick
    pub fn update(&mut self) {
        if self.animation_timer > 0 {
            self.animation_timer -= 1;
        } else if self.mouth != MouthState::Normal {
            self.mouth = MouthState::Normal;
        }

        if self.talk_timer > 0 {
            self.talk_timer -= 1;
        } else {
            self.talking = false;
        }

        let (speed, amplitude, offset) = if self.talking {
            (TALK_CYCLE_SPEED, 0.5, 0.5)
        } else {
            (IDLE_CYCLE_SPEED, 0.2, 0.2)
        };
        self.cycle = (self.cycle + speed) % PI;
        self.openness = self.cycle.sin() * amplitude + offset;
    }

    /// Override the mouth shape for `ticks` ticks
    pub fn show(&mut self, mouth: MouthState, ticks: u32) {
        self.mouth = mouth;
        self.animation_timer = ticks;
    }

    /// Start fast mouth movement for `ticks` ticks
    pub fn talk(&mut self, ticks: u32) {
        self.talking = true;
        self.talk_timer = ticks;
    }
}
