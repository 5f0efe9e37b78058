//! Particles and floating text
//!
//! Fire-and-forget visual feedback. Nothing in the simulation reads these back;
//! the renderer draws whatever is alive each frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;
/// Spread of the initial particle velocity (px/tick on each axis)
const PARTICLE_SPEED: f32 = 4.0;
/// Downward pull on particles (px/tick²)
const PARTICLE_GRAVITY: f32 = 0.1;
const PARTICLE_DECAY: f32 = 0.02;
const TEXT_DECAY: f32 = 0.02;
/// Text drifts upward this much per tick
const TEXT_RISE: f32 = 1.0;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// 0-1, decreases each tick
    pub life: f32,
}

/// A floating label ("+50", "COMBO x3")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextEffect {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    pub life: f32,
}

/// Live visual effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<TextEffect>,
}

impl Effects {
    /// Burst of `count` particles flying outward from `pos`
    pub fn spawn_particles<R: Rng>(&mut self, rng: &mut R, pos: Vec2, count: usize, color: u32) {
        for _ in 0..count {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                size: rng.random_range(2.0..6.0),
                life: 1.0,
            });
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Floating text label at `pos`
    pub fn spawn_text(&mut self, text: impl Into<String>, pos: Vec2, color: u32) {
        self.texts.push(TextEffect {
            pos,
            text: text.into(),
            color,
            life: 1.0,
        });
    }

    /// Move, fade and prune everything by one tick
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_GRAVITY;
            particle.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);

        for text in &mut self.texts {
            text.pos.y -= TEXT_RISE;
            text.life -= TEXT_DECAY;
        }
        self.texts.retain(|t| t.life > 0.0);
    }
}
