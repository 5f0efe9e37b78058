//! Player kinematics and axis-aligned collision
//!
//! The player is a square under constant gravity with a single jump.
//! Everything collides as an axis-aligned box; rotation is visual only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test; touching edges count as overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x <= b_max.x
            && a_max.x >= other.min.x
            && self.min.y <= b_max.y
            && a_max.y >= other.min.y
    }
}

/// Advance the player one tick: gravity, tilt, trail, ground contact, squash reset
pub fn advance_player(player: &mut Player, gravity: f32, ground_y: f32) {
    player.velocity_y += gravity;
    player.pos.y += player.velocity_y;

    player.rotation = (player.rotation + player.velocity_y * 0.5).clamp(-MAX_ROTATION, MAX_ROTATION);

    player.record_trail();

    if player.pos.y + player.height > ground_y {
        player.pos.y = ground_y - player.height;
        player.velocity_y = 0.0;
        player.is_jumping = false;
        player.rotation = 0.0;
    }

    if player.squash_ticks > 0 {
        player.squash_ticks -= 1;
        if player.squash_ticks == 0 {
            player.scale = 1.0;
        }
    }
}

/// Start a jump if grounded. Returns false (and changes nothing) when airborne.
pub fn jump(player: &mut Player, jump_force: f32) -> bool {
    if player.is_jumping {
        return false;
    }
    player.velocity_y = jump_force;
    player.is_jumping = true;
    player.rotation = -MAX_ROTATION;
    player.scale = JUMP_SQUASH;
    player.squash_ticks = JUMP_SQUASH_TICKS;
    true
}

/// Distance from the ground line that still counts as standing on it
const GROUND_TOLERANCE: f32 = 0.5;

/// True when the player is resting on the ground line
pub fn is_grounded(player: &Player, ground_y: f32) -> bool {
    !player.is_jumping && player.pos.y + player.height >= ground_y - GROUND_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAVITY: f32 = 0.9;
    const GROUND: f32 = 480.0;

    fn grounded_player() -> Player {
        let mut player = Player::new(600.0);
        player.pos.y = GROUND - player.height;
        player
    }

    #[test]
    fn test_rect_overlap_boundary_inclusive() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        let apart = Rect::new(Vec2::new(10.5, 0.0), Vec2::new(5.0, 5.0));
        let corner = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));

        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(a.overlaps(&corner));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_gravity_accumulates_in_air() {
        let mut player = Player::new(600.0);
        player.pos.y = 100.0;
        player.velocity_y = 0.0;

        advance_player(&mut player, GRAVITY, GROUND);
        assert_eq!(player.velocity_y, GRAVITY);
        assert_eq!(player.pos.y, 100.0 + GRAVITY);

        let before = player.velocity_y;
        advance_player(&mut player, GRAVITY, GROUND);
        assert_eq!(player.velocity_y, before + GRAVITY);
    }

    #[test]
    fn test_ground_contact_resets_velocity_and_rotation() {
        let mut player = Player::new(600.0);
        player.pos.y = GROUND - player.height - 1.0;
        player.velocity_y = 250.0;
        player.rotation = 20.0;
        player.is_jumping = true;

        advance_player(&mut player, GRAVITY, GROUND);
        assert_eq!(player.pos.y, GROUND - player.height);
        assert_eq!(player.velocity_y, 0.0);
        assert_eq!(player.rotation, 0.0);
        assert!(!player.is_jumping);
        assert!(is_grounded(&player, GROUND));
    }

    #[test]
    fn test_spawn_point_is_airborne() {
        let player = Player::new(600.0);
        assert!(!player.is_jumping);
        assert!(!is_grounded(&player, GROUND));
    }

    #[test]
    fn test_rotation_clamped() {
        let mut player = Player::new(600.0);
        player.pos.y = 0.0;
        player.velocity_y = 100.0;
        advance_player(&mut player, GRAVITY, 10_000.0);
        assert_eq!(player.rotation, MAX_ROTATION);

        player.velocity_y = -200.0;
        advance_player(&mut player, GRAVITY, 10_000.0);
        assert_eq!(player.rotation, -MAX_ROTATION);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = grounded_player();
        assert!(jump(&mut player, -18.0));
        assert!(player.is_jumping);
        assert_eq!(player.velocity_y, -18.0);
        assert_eq!(player.scale, JUMP_SQUASH);

        // Second jump while airborne is ignored
        player.velocity_y = -5.0;
        assert!(!jump(&mut player, -18.0));
        assert_eq!(player.velocity_y, -5.0);
    }

    #[test]
    fn test_jump_squash_resets_after_countdown() {
        let mut player = grounded_player();
        jump(&mut player, -18.0);
        for _ in 0..JUMP_SQUASH_TICKS - 1 {
            advance_player(&mut player, GRAVITY, GROUND);
            assert_eq!(player.scale, JUMP_SQUASH);
        }
        advance_player(&mut player, GRAVITY, GROUND);
        assert_eq!(player.scale, 1.0);
    }

    #[test]
    fn test_full_jump_lands_again() {
        let mut player = grounded_player();
        jump(&mut player, -18.0);
        let mut peak = player.pos.y;
        let mut ticks = 0;
        while player.is_jumping && ticks < 200 {
            advance_player(&mut player, GRAVITY, GROUND);
            peak = peak.min(player.pos.y);
            ticks += 1;
        }
        assert!(!player.is_jumping);
        assert!(ticks > 30 && ticks < 50, "airtime was {ticks} ticks");
        assert!(GROUND - player.height - peak > 150.0);
    }
}
