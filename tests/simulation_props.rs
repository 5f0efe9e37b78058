//! Property tests for the simulation core

use dash_runner::consts::*;
use dash_runner::sim::{
    GamePhase, GameState, Player, Rect, ScoreTracker, TickInput, advance_player, jump, resize,
    start_session, tick,
};
use dash_runner::tuning::{MIN_OBSTACLE_INTERVAL, Tuning};
use glam::Vec2;
use proptest::prelude::*;

proptest! {
    #[test]
    fn airborne_velocity_gains_gravity(
        y in 0.0f32..200.0,
        vy in -20.0f32..5.0,
        gravity in 0.1f32..2.0,
    ) {
        let mut player = Player::new(600.0);
        player.pos.y = y;
        player.velocity_y = vy;
        // Ground far below so no contact this tick
        advance_player(&mut player, gravity, 10_000.0);
        prop_assert_eq!(player.velocity_y, vy + gravity);
        prop_assert!(player.rotation.abs() <= MAX_ROTATION);
    }

    #[test]
    fn ground_contact_always_zeroes(vy in 0.0f32..1000.0, rotation in -25.0f32..25.0) {
        let ground = 480.0;
        let mut player = Player::new(600.0);
        player.pos.y = ground - player.height;
        player.velocity_y = vy;
        player.rotation = rotation;
        player.is_jumping = true;
        advance_player(&mut player, 0.9, ground);
        prop_assert_eq!(player.velocity_y, 0.0);
        prop_assert_eq!(player.rotation, 0.0);
        prop_assert_eq!(player.pos.y, ground - player.height);
    }

    #[test]
    fn jump_sets_exact_force(force in -40.0f32..-1.0) {
        let mut player = Player::new(600.0);
        prop_assert!(jump(&mut player, force));
        prop_assert_eq!(player.velocity_y, force);
        prop_assert!(player.is_jumping);
        prop_assert!(!jump(&mut player, force));
    }

    #[test]
    fn overlap_is_symmetric(
        ax in -100.0f32..100.0, ay in -100.0f32..100.0,
        aw in 0.0f32..50.0, ah in 0.0f32..50.0,
        bx in -100.0f32..100.0, by in -100.0f32..100.0,
        bw in 0.0f32..50.0, bh in 0.0f32..50.0,
    ) {
        let a = Rect::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
        let b = Rect::new(Vec2::new(bx, by), Vec2::new(bw, bh));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn multiplier_tracks_combo(passes in 0u32..200) {
        let tuning = Tuning::default();
        let mut tracker = ScoreTracker::default();
        let mut bumps = 0;
        for _ in 0..passes {
            if tracker.obstacle_passed(&tuning).multiplier_up.is_some() {
                bumps += 1;
            }
        }
        prop_assert_eq!(tracker.combo, passes);
        prop_assert_eq!(bumps, passes / 5);
        prop_assert_eq!(tracker.multiplier, 1 + passes / 5);
        // Pass n (1-based) scores 10 * (1 + (n - 1) / 5)
        let expected: u64 = (1..=passes as u64).map(|n| 10 * (1 + (n - 1) / 5)).sum();
        prop_assert_eq!(tracker.score, expected);
    }

    #[test]
    fn collect_is_always_fifty(multiplier in 1u32..100, score in 0u64..1_000_000) {
        let tuning = Tuning::default();
        let mut tracker = ScoreTracker { score, combo: 0, multiplier };
        tracker.collected(&tuning);
        prop_assert_eq!(tracker.score, score + 50);
    }

    #[test]
    fn resize_never_degenerates(w in proptest::num::f32::ANY, h in proptest::num::f32::ANY) {
        let mut state = GameState::new(1, Tuning::default());
        resize(&mut state, w, h);
        prop_assert!(state.viewport.width >= MIN_VIEWPORT_WIDTH);
        prop_assert!(state.viewport.height >= MIN_VIEWPORT_HEIGHT);
        prop_assert!(state.ground.y.is_finite());
        prop_assert!(state.ground.y >= MIN_VIEWPORT_HEIGHT - GROUND_HEIGHT);
    }

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        presses in proptest::collection::vec(any::<bool>(), 1..600),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        start_session(&mut state, seed);
        let mut last_speed = state.difficulty.game_speed;
        let mut last_interval = state.difficulty.obstacle_interval;

        for jump in presses {
            let was_playing = state.phase == GamePhase::Playing;
            let frozen_pos = state.player.pos;
            tick(&mut state, &TickInput { jump, autopilot: false });

            prop_assert!(state.scoring.multiplier >= 1);
            prop_assert!(state.difficulty.obstacle_interval >= MIN_OBSTACLE_INTERVAL);
            prop_assert!(state.difficulty.obstacle_interval <= last_interval);
            prop_assert!(state.difficulty.game_speed >= last_speed);
            prop_assert!(state.player.rotation.abs() <= MAX_ROTATION);
            prop_assert!(state.player.trail.len() <= TRAIL_LENGTH);
            prop_assert!(state.player.pos.y + state.player.height <= state.ground.y);
            prop_assert!(state.obstacles.iter().all(|o| o.pos.x + o.size.x >= 0.0));
            prop_assert!(state.effects.particles.iter().all(|p| p.life > 0.0));
            if !was_playing {
                prop_assert_eq!(state.player.pos, frozen_pos);
            }

            last_speed = state.difficulty.game_speed;
            last_interval = state.difficulty.obstacle_interval;
        }
    }
}
