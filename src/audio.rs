//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::SoundPlayer;
use crate::sim::SoundEffect;

/// Peak gain before the volume setting is applied
const BASE_GAIN: f32 = 0.1;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single tone with an exponential fade
    fn tone(&self, ctx: &AudioContext, freq: f32, osc_type: OscillatorType, duration: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(BASE_GAIN * self.volume, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration).ok();
    }
}

impl SoundPlayer for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.tone(ctx, 300.0, OscillatorType::Sine, 0.1),
            SoundEffect::Score => self.tone(ctx, 400.0, OscillatorType::Square, 0.05),
            SoundEffect::Crash => self.tone(ctx, 150.0, OscillatorType::Sawtooth, 0.3),
            SoundEffect::Powerup => self.tone(ctx, 600.0, OscillatorType::Triangle, 0.2),
        }
    }
}
