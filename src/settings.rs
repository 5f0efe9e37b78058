//! Player preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::MAX_PARTICLES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on crash
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Particle count a renderer should draw at most
    pub fn max_particles(&self) -> usize {
        if self.particles { MAX_PARTICLES } else { 0 }
    }

    /// Sound effect level ignoring mute, for configuring the audio backend
    pub fn sfx_level(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Volume for sound effects, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_level() }
    }

    /// Flip mute and persist the change. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.save();
        self.muted
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dash_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native builds have no LocalStorage; preferences live for one run
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
