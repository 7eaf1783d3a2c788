//! Game session state and phase transitions
//!
//! One `GameState` is owned by the frame driver. Nothing here touches a
//! renderer, the DOM, or storage; the driver drains `events` instead.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Boss, BurstKind, Obstacle, Particle, PowerUp, PowerUpKind, Projectile};
use super::environment::Environment;
use super::player::Ship;
use super::pool::Pool;
use crate::consts::*;

/// Top-level phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, no ship yet
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run
    Paused,
    /// Ship destroyed, waiting for restart
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    ObstacleDestroyed { pos: Vec3 },
    PowerUpCollected(PowerUpKind),
    ShipHit { health: i32 },
    BossSpawned { level: u32, health: i32 },
    BossDefeated { new_level: u32 },
    GameOver { score: u64 },
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    /// Seconds of simulated (unpaused) time this run
    pub time: f32,
    pub ship: Ship,
    pub player_shots: Pool<Projectile>,
    pub enemy_shots: Pool<Projectile>,
    pub obstacles: Pool<Obstacle>,
    pub power_ups: Pool<PowerUp>,
    pub particles: Pool<Particle>,
    pub boss: Option<Boss>,
    /// Seconds since the last obstacle spawn
    pub spawn_timer: f32,
    /// Seconds since the last power-up spawn
    pub power_up_timer: f32,
    /// Camera shake magnitude, decays every frame
    pub shake: f32,
    pub environment: Environment,
    /// Live particle cap (from settings)
    pub max_particles: usize,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_environment(seed, Environment::default())
    }

    pub fn with_environment(seed: u64, environment: Environment) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            time: 0.0,
            ship: Ship::new(),
            player_shots: Pool::with_capacity(64),
            enemy_shots: Pool::with_capacity(16),
            obstacles: Pool::with_capacity(64),
            power_ups: Pool::new(),
            particles: Pool::with_capacity(MAX_PARTICLES),
            boss: None,
            spawn_timer: 0.0,
            power_up_timer: 0.0,
            shake: 0.0,
            environment,
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score at which the next boss appears
    pub fn boss_threshold(&self) -> u64 {
        self.level as u64 * POINTS_PER_LEVEL
    }

    /// Start a fresh run from Idle or GameOver. Ignored mid-run.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.reset();
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::SessionStarted);
                log::info!("Run started (seed {})", self.seed);
            }
            GamePhase::Running | GamePhase::Paused => {}
        }
    }

    /// Clear every pool and the boss, then build a new ship
    pub fn reset(&mut self) {
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.boss = None;

        self.ship = Ship::new();
        self.score = 0;
        self.level = 1;
        self.time = 0.0;
        self.spawn_timer = 0.0;
        self.power_up_timer = 0.0;
        self.shake = 0.0;
    }

    /// Flip between Running and Paused. No-op in any other phase.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// End the run. Only the first call of a run has any effect.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let pos = self.ship.pos;
        self.explode(pos, BurstKind::ShipHull, PARTICLES_SHIP_DESTROYED);
        self.boss = None;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over: score {} at level {}", self.score, self.level);
    }

    /// Spawn a particle burst and kick the camera
    pub fn explode(&mut self, pos: Vec3, kind: BurstKind, count: usize) {
        let burst: Vec<Particle> = (0..count)
            .map(|_| Particle::spawn(&mut self.rng, pos, kind))
            .collect();
        self.particles.extend_bounded(burst, self.max_particles);
        self.shake = (self.shake + SHAKE_PER_EXPLOSION).min(SHAKE_MAX);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
