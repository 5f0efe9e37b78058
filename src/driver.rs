//! Frame driver
//!
//! Owns one session plus its collaborators and turns wall-clock frames into
//! fixed simulation ticks. Events raised by a tick are dispatched to audio and
//! score reporting before the next tick runs.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{JumpInput, Null, Renderer, ScoreReporter, SoundPlayer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, resize, start_session, tick};
use crate::tuning::Tuning;

pub struct GameDriver {
    pub state: GameState,
    pub settings: Settings,
    /// Let the core play by itself (attract mode / headless demo)
    pub autopilot: bool,
    renderer: Box<dyn Renderer>,
    sound: Box<dyn SoundPlayer>,
    reporter: Box<dyn ScoreReporter>,
    input: Box<dyn JumpInput>,
    accumulator: f32,
    /// Score as of the last ScoreChanged event (HUD)
    last_score: u64,
}

impl GameDriver {
    /// Driver with no-op collaborators; plug real ones in with the `with_*` builders
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            settings,
            autopilot: false,
            renderer: Box::new(Null),
            sound: Box::new(Null),
            reporter: Box::new(Null),
            input: Box::new(Null),
            accumulator: 0.0,
            last_score: 0,
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_sound(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    pub fn with_reporter(mut self, reporter: impl ScoreReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_input(mut self, input: impl JumpInput + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Start (or restart) a session
    pub fn start(&mut self, seed: u64) -> bool {
        let started = start_session(&mut self.state, seed);
        if started {
            self.accumulator = 0.0;
            self.last_score = 0;
        }
        started
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        resize(&mut self.state, width, height);
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.last_score
    }

    /// Run as many fixed ticks as `frame_dt` seconds cover. Returns ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on rather than spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick and dispatch its events
    pub fn step(&mut self) {
        let input = TickInput {
            jump: self.input.jump_held(),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input);
        self.dispatch_events();

        // Particles are cosmetic; the settings cap only trims what gets drawn
        let cap = self.settings.max_particles();
        let particles = &mut self.state.effects.particles;
        if particles.len() > cap {
            let excess = particles.len() - cap;
            particles.drain(..excess);
        }
    }

    /// Hand the current state to the renderer
    pub fn render(&mut self) {
        self.renderer.render(&self.state);
    }

    /// Screen shake the renderer should apply (0 when disabled in settings)
    pub fn shake_intensity(&self) -> f32 {
        if self.settings.effective_screen_shake() {
            self.state.screen_shake
        } else {
            0.0
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(effect) => {
                    if self.settings.effective_volume() > 0.0 {
                        self.sound.play(effect);
                    }
                }
                GameEvent::ScoreChanged(score) => {
                    self.last_score = score;
                }
                GameEvent::GameOver { score } => {
                    self.last_score = score;
                    self.reporter.report_game_over(score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ObstacleKind, SoundEffect};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        sounds: Rc<RefCell<Vec<SoundEffect>>>,
        reports: Rc<RefCell<Vec<u64>>>,
        frames: Rc<RefCell<u32>>,
    }

    impl SoundPlayer for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.borrow_mut().push(effect);
        }
    }

    impl ScoreReporter for Recorder {
        fn report_game_over(&mut self, final_score: u64) {
            self.reports.borrow_mut().push(final_score);
        }
    }

    impl Renderer for Recorder {
        fn render(&mut self, _state: &GameState) {
            *self.frames.borrow_mut() += 1;
        }
    }

    struct HeldButton(Rc<RefCell<bool>>);

    impl JumpInput for HeldButton {
        fn jump_held(&mut self) -> bool {
            *self.0.borrow()
        }
    }

    fn quiet_tuning() -> Tuning {
        Tuning {
            obstacle_interval: 1_000_000.0,
            collectible_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut driver = GameDriver::new(1, quiet_tuning(), Settings::default());
        driver.start(1);

        assert_eq!(driver.update(SIM_DT * 0.5), 0);
        assert_eq!(driver.update(SIM_DT * 0.6), 1);
        assert_eq!(driver.state.time_ticks, 1);

        // A long stall is capped
        assert_eq!(driver.update(5.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_nan_frame_is_ignored() {
        let mut driver = GameDriver::new(1, quiet_tuning(), Settings::default());
        driver.start(1);
        assert_eq!(driver.update(f32::NAN), 0);
        assert_eq!(driver.update(SIM_DT * 1.01), 1);
    }

    #[test]
    fn test_events_reach_collaborators() {
        let recorder = Recorder::default();
        let button = Rc::new(RefCell::new(false));
        let mut driver = GameDriver::new(9, quiet_tuning(), Settings::default())
            .with_sound(recorder.clone())
            .with_reporter(recorder.clone())
            .with_renderer(recorder.clone())
            .with_input(HeldButton(button.clone()));
        driver.start(9);
        for _ in 0..30 {
            driver.step();
        }

        *button.borrow_mut() = true;
        driver.step();
        driver.step();
        assert_eq!(*recorder.sounds.borrow(), vec![SoundEffect::Jump]);

        // Land, then run into a spike
        *button.borrow_mut() = false;
        for _ in 0..60 {
            driver.step();
        }
        let mut spike =
            crate::sim::spawn::make_obstacle(&mut driver.state, ObstacleKind::Spike, 0.0, 0xFFFFFF);
        spike.pos.x = driver.state.player.pos.x;
        driver.state.obstacles.push(spike);
        driver.step();

        assert_eq!(driver.phase(), GamePhase::GameOver);
        assert_eq!(*recorder.reports.borrow(), vec![0]);
        assert_eq!(recorder.sounds.borrow().last(), Some(&SoundEffect::Crash));

        driver.render();
        assert_eq!(*recorder.frames.borrow(), 1);
    }

    #[test]
    fn test_muted_skips_sounds() {
        let recorder = Recorder::default();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut driver = GameDriver::new(2, quiet_tuning(), settings).with_sound(recorder.clone());
        driver.start(2);
        for _ in 0..30 {
            driver.step();
        }
        driver.state.player.is_jumping = false;
        driver.state.jump_latch = false;
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut driver.state, &input);
        driver.dispatch_events();
        assert!(recorder.sounds.borrow().is_empty());
    }

    #[test]
    fn test_shake_respects_settings() {
        let mut driver = GameDriver::new(
            3,
            quiet_tuning(),
            Settings {
                reduced_motion: true,
                ..Default::default()
            },
        );
        driver.state.screen_shake = 2.0;
        assert_eq!(driver.shake_intensity(), 0.0);
        driver.settings.reduced_motion = false;
        assert_eq!(driver.shake_intensity(), 2.0);
    }

    #[test]
    fn test_particles_disabled_clears_bursts() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let button = Rc::new(RefCell::new(false));
        let mut driver =
            GameDriver::new(6, quiet_tuning(), settings).with_input(HeldButton(button.clone()));
        driver.start(6);
        for _ in 0..30 {
            driver.step();
        }
        *button.borrow_mut() = true;
        driver.step();
        assert!(driver.state.player.is_jumping);
        assert!(driver.state.effects.particles.is_empty());
    }

    #[test]
    fn test_autopilot_demo_scores() {
        let mut driver = GameDriver::new(4, Tuning::default(), Settings::default());
        driver.autopilot = true;
        driver.start(4);
        for _ in 0..1200 {
            driver.step();
        }
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert!(driver.score() > 0);
    }
}
