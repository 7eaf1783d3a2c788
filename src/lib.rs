//! Star Strike - A 3D arcade space shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state)
//! - `game`: Per-frame driver tying the sim to its collaborators
//! - `hud`: Read-only HUD snapshot of a session
//! - `render`: Instance data and camera for an external renderer
//! - `persistence`: Key/value storage backends
//! - `highscores`: Persisted best score

pub mod error;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::StorageError;
pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Largest simulation step; longer frames (tab stalls) are clamped to this
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Base forward scroll speed of the world (units/s)
    pub const BASE_SPEED: f32 = 160.0;
    /// Score needed per level before the boss shows up
    pub const POINTS_PER_LEVEL: u64 = 5000;

    /// Ship defaults
    pub const SHIP_MAX_HEALTH: i32 = 100;
    pub const SHIP_RADIUS: f32 = 1.8;
    /// Pointer [-1, 1] maps onto this half-extent of the flight plane
    pub const SHIP_BOUNDS_X: f32 = 24.0;
    pub const SHIP_BOUNDS_Y: f32 = 18.0;
    /// Per-frame easing factor toward the pointer target
    pub const SHIP_EASE: f32 = 0.15;
    pub const SHIP_ROLL_FACTOR: f32 = 0.15;
    pub const SHIP_PITCH_FACTOR: f32 = 0.1;
    pub const FIRE_RATE: f32 = 0.14;
    pub const FIRE_RATE_HYPER: f32 = 0.07;
    pub const VOLLEY_SIZE: usize = 2;
    pub const VOLLEY_SIZE_HYPER: usize = 4;
    /// Horizontal spacing between barrels
    pub const VOLLEY_SPACING: f32 = 1.2;
    pub const MUZZLE_FLASH: f32 = 8.0;
    pub const MUZZLE_FLASH_DECAY: f32 = 25.0;

    /// Projectiles
    pub const PLAYER_SHOT_SPEED: f32 = -550.0;
    pub const PLAYER_SHOT_RADIUS: f32 = 1.5;
    pub const ENEMY_SHOT_SPEED: f32 = 250.0;
    pub const ENEMY_SHOT_RADIUS: f32 = 3.2;
    pub const PROJECTILE_Z_LIMIT: f32 = 1800.0;

    /// Obstacles
    pub const OBSTACLE_RADIUS: f32 = 4.5;
    pub const OBSTACLE_SPAWN_Z: f32 = -1200.0;
    pub const OBSTACLE_SPREAD_X: f32 = 150.0;
    pub const OBSTACLE_SPREAD_Y: f32 = 120.0;
    /// Random jitter around the ship when aiming a new obstacle
    pub const OBSTACLE_AIM_JITTER: f32 = 25.0;
    /// Obstacles aim this far past the ship along z
    pub const OBSTACLE_AIM_LEAD_Z: f32 = 150.0;
    pub const OBSTACLE_MAX_TUMBLE: f32 = 0.07;
    pub const OBSTACLE_DESPAWN_Z: f32 = 180.0;
    pub const OBSTACLE_BASE_HP: i32 = 2;
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 12.0;
    /// Score divisor for the obstacle speed bonus
    pub const OBSTACLE_SPEED_SCORE_DIV: f32 = 18.0;
    pub const OBSTACLE_SCORE: u64 = 400;
    pub const OBSTACLE_DAMAGE: i32 = 25;

    /// Spawn cadence
    pub const SPAWN_INTERVAL_BASE: f32 = 0.42;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.1;
    pub const SPAWN_INTERVAL_SCORE_DIV: f32 = 18000.0;
    pub const POWERUP_INTERVAL: f32 = 12.0;

    /// Power-ups
    pub const POWERUP_SPAWN_Z: f32 = -1000.0;
    pub const POWERUP_SPREAD_X: f32 = 60.0;
    pub const POWERUP_SPREAD_Y: f32 = 50.0;
    pub const POWERUP_DESPAWN_Z: f32 = 120.0;
    pub const POWERUP_SPIN: f32 = 7.0;
    pub const POWERUP_PICKUP_RADIUS: f32 = 6.0;
    pub const HEAL_AMOUNT: i32 = 40;
    pub const SHIELD_DURATION: f32 = 12.0;
    pub const HYPER_DURATION: f32 = 10.0;

    /// Boss
    pub const BOSS_RADIUS: f32 = 10.5;
    pub const BOSS_SPAWN_Z: f32 = -600.0;
    pub const BOSS_HOLD_Z: f32 = -120.0;
    pub const BOSS_APPROACH_SPEED: f32 = 60.0;
    pub const BOSS_BASE_HEALTH: i32 = 60;
    pub const BOSS_HEALTH_PER_LEVEL: i32 = 40;
    pub const BOSS_FIRE_INTERVAL: f32 = 1.4;
    pub const BOSS_FIRE_INTERVAL_PER_LEVEL: f32 = 0.1;
    pub const BOSS_FIRE_INTERVAL_MIN: f32 = 0.1;
    /// Cannon x offset from the hull center
    pub const BOSS_CANNON_OFFSET: f32 = 11.0;
    pub const BOSS_SWAY_X: f32 = 25.0;
    pub const BOSS_HOVER_Y: f32 = 6.0;
    pub const BOSS_SCORE: u64 = 3000;

    pub const ENEMY_SHOT_DAMAGE: i32 = 30;

    /// Particle bursts
    pub const PARTICLES_OBSTACLE_KILL: usize = 15;
    pub const PARTICLES_BOSS_HIT: usize = 8;
    pub const PARTICLES_BOSS_KILL: usize = 200;
    pub const PARTICLES_SHIP_HIT: usize = 25;
    pub const PARTICLES_IMPACT: usize = 30;
    pub const PARTICLES_SHIP_DESTROYED: usize = 100;
    pub const PARTICLE_SPREAD: f32 = 60.0;
    pub const PARTICLE_DECAY: f32 = 2.8;
    /// Default cap on live particles
    pub const MAX_PARTICLES: usize = 1024;

    /// Camera shake
    pub const SHAKE_PER_EXPLOSION: f32 = 0.8;
    pub const SHAKE_MAX: f32 = 2.5;
    pub const SHAKE_DECAY: f32 = 0.93;

    /// Parallax scenery
    pub const STAR_SPEED: f32 = BASE_SPEED + 300.0;
    pub const STAR_RECYCLE_Z: f32 = 1000.0;
    pub const STAR_RESET_Z: f32 = -3500.0;
    pub const NEBULA_RECYCLE_Z: f32 = 2000.0;
    pub const NEBULA_RESET_Z: f32 = -2500.0;
    pub const NEBULA_SPIN: f32 = 0.002;
}

/// Uniform sample in `[-range / 2, range / 2)`
#[inline]
pub fn spread<R: Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * range
}

/// Zero-padded score text for the HUD (at least four digits)
pub fn format_score(score: u64) -> String {
    format!("{score:04}")
}
