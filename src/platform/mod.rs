//! Platform abstraction layer
//!
//! The simulation never touches a screen, speaker or input device directly.
//! Each of those lives behind a small trait here so browser, native and test
//! builds can plug in their own backends (or nothing at all).

use crate::sim::{GameState, SoundEffect};

/// Draws the current session
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Plays one-shot sound cues
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

/// Receives the final score when a session ends
pub trait ScoreReporter {
    fn report_game_over(&mut self, final_score: u64);
}

/// Jump button level (true while held)
pub trait JumpInput {
    fn jump_held(&mut self) -> bool;
}

/// Backend that does nothing. Stands in for missing render targets or audio devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

impl Renderer for Null {
    fn render(&mut self, _state: &GameState) {}
}

impl SoundPlayer for Null {
    fn play(&mut self, _effect: SoundEffect) {}
}

impl ScoreReporter for Null {
    fn report_game_over(&mut self, _final_score: u64) {}
}

impl JumpInput for Null {
    fn jump_held(&mut self) -> bool {
        false
    }
}

/// Logs sound cues instead of playing them (native builds)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSound;

impl SoundPlayer for LogSound {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {}", effect.as_str());
    }
}

/// Serialize the renderable snapshot of a session (for JS-side or remote renderers)
pub fn snapshot_json(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}
