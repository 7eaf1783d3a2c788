//! Simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Clamped variable timestep, one tick per rendered frame
//! - Seeded RNG only
//! - Each entity kind in its own pool
//! - No rendering, DOM or storage dependencies

pub mod collision;
pub mod entities;
pub mod environment;
pub mod player;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::overlaps;
pub use entities::{
    Boss, BossPhase, BurstKind, Obstacle, ObstacleShape, Particle, PowerUp, PowerUpKind,
    Projectile, Side,
};
pub use environment::{Environment, Nebula};
pub use player::Ship;
pub use pool::{Entity, Pool};
pub use spawner::obstacle_interval;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameClock, TickInput, clamp_delta, tick};
