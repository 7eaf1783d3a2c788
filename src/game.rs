//! Frame driver
//!
//! Owns one session plus everything around it: the frame clock, settings,
//! the persisted high score and the storage backend. Hosts write into
//! `input` between frames and call `frame` once per rendered frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::highscores::HighScore;
use crate::hud::HudState;
use crate::persistence::KeyValueStore;
use crate::render::{Camera, Instance, collect_instances};
use crate::settings::Settings;
use crate::sim::{Environment, FrameClock, GameEvent, GameState, TickInput, tick};

/// Frames averaged by the FPS counter
const FPS_WINDOW: usize = 60;

/// Rolling frame-rate estimate over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    fn record(&mut self, now: f64) {
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }
}

pub struct Game {
    state: GameState,
    clock: FrameClock,
    settings: Settings,
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
    camera: Camera,
    fps: FpsCounter,
    /// Latest host input; one-shot edges are cleared after each frame
    pub input: TickInput,
}

impl Game {
    /// Load settings and the high score from `store` and set up an idle session
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        let state = Self::build_session(seed, &settings);
        log::info!(
            "Game initialized with seed {seed} (quality {}, best {})",
            settings.quality.as_str(),
            high_score.best()
        );
        Self {
            state,
            clock: FrameClock::new(),
            settings,
            high_score,
            store,
            camera: Camera::new(),
            fps: FpsCounter::default(),
            input: TickInput::default(),
        }
    }

    fn build_session(seed: u64, settings: &Settings) -> GameState {
        // Scenery has its own RNG stream, separate from the sim's
        let mut scenery_rng = Pcg32::seed_from_u64(seed.rotate_left(32));
        let environment = Environment::generate(
            &mut scenery_rng,
            settings.quality.star_count(),
            settings.quality.nebula_count(),
        );
        let mut state = GameState::with_environment(seed, environment);
        state.max_particles = settings.max_particles();
        state
    }

    /// Run one frame at host time `now` (seconds)
    pub fn frame(&mut self, now: f64) -> HudState {
        let dt = self.clock.advance(now);

        tick(&mut self.state, &self.input, dt);
        self.input.pause = false;
        self.input.start = false;

        for event in self.state.drain_events() {
            self.handle_event(event);
        }

        // The camera holds still whenever the sim is frozen
        if self.state.is_running() {
            self.camera
                .follow(&self.state, self.settings.effective_screen_shake());
        }
        self.fps.record(now);

        let fps = self.settings.show_fps.then_some(self.fps.fps);
        HudState::from_session(&self.state, self.high_score.best()).with_fps(fps)
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::SessionStarted => {
                log::info!("Session started, best to beat: {}", self.high_score.best());
            }
            GameEvent::ObstacleDestroyed { pos } => {
                log::trace!("Obstacle destroyed at {pos}");
            }
            GameEvent::PowerUpCollected(kind) => {
                log::debug!("Power-up collected: {kind:?}");
            }
            GameEvent::ShipHit { health } => {
                log::debug!("Ship hit, health {health}");
            }
            GameEvent::BossSpawned { level, health } => {
                log::debug!("Boss for level {level} has {health} hp");
            }
            GameEvent::BossDefeated { new_level } => {
                log::info!("Level up: {new_level}");
            }
            GameEvent::GameOver { score } => {
                if self.high_score.submit(score, self.store.as_mut()) {
                    log::info!("New high score: {score}");
                }
            }
        }
    }

    /// Replace and persist settings. Quality changes rebuild the scenery.
    pub fn apply_settings(&mut self, settings: Settings) {
        if settings.quality != self.settings.quality {
            let mut scenery_rng = Pcg32::seed_from_u64(self.state.seed.rotate_left(32));
            self.state.environment = Environment::generate(
                &mut scenery_rng,
                settings.quality.star_count(),
                settings.quality.nebula_count(),
            );
        }
        self.state.max_particles = settings.max_particles();
        settings.save(self.store.as_mut());
        self.settings = settings;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Instance data for the current frame
    pub fn instances(&self) -> Vec<Instance> {
        collect_instances(&self.state)
    }
}
