//! Pooled simulation entities
//!
//! Entities expose plain state only. Spawning randomness comes from the
//! session RNG passed in by the caller.

use glam::Vec3;
use rand::Rng;

use super::pool::Entity;
use crate::consts::*;
use crate::spread;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// A bolt travelling along the z axis
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec3,
    /// Signed speed along z (negative = away from the camera)
    pub speed: f32,
    pub radius: f32,
    pub side: Side,
    pub alive: bool,
}

impl Projectile {
    pub fn player(pos: Vec3) -> Self {
        Self {
            pos,
            speed: PLAYER_SHOT_SPEED,
            radius: PLAYER_SHOT_RADIUS,
            side: Side::Player,
            alive: true,
        }
    }

    pub fn enemy(pos: Vec3) -> Self {
        Self {
            pos,
            speed: ENEMY_SHOT_SPEED,
            radius: ENEMY_SHOT_RADIUS,
            side: Side::Enemy,
            alive: true,
        }
    }
}

impl Entity for Projectile {
    fn update(&mut self, dt: f32) {
        self.pos.z += self.speed * dt;
        if self.pos.z.abs() > PROJECTILE_Z_LIMIT {
            self.kill();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Cosmetic hull variant, picked at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleShape {
    Icosahedron,
    Octahedron,
    Cube,
}

/// A tumbling rock flying toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub rotation: Vec3,
    /// Rotation added every frame (not time scaled)
    pub tumble: Vec3,
    pub radius: f32,
    pub hp: i32,
    pub shape: ObstacleShape,
    pub alive: bool,
}

impl Obstacle {
    /// Spawn far down-range, aimed at a jittered point near `ship_pos`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, ship_pos: Vec3, score: u64, level: u32) -> Self {
        let shape = match rng.random_range(0..3) {
            0 => ObstacleShape::Icosahedron,
            1 => ObstacleShape::Octahedron,
            _ => ObstacleShape::Cube,
        };

        let pos = Vec3::new(
            spread(rng, OBSTACLE_SPREAD_X),
            spread(rng, OBSTACLE_SPREAD_Y),
            OBSTACLE_SPAWN_Z,
        );
        let target = ship_pos
            + Vec3::new(
                spread(rng, OBSTACLE_AIM_JITTER),
                spread(rng, OBSTACLE_AIM_JITTER),
                OBSTACLE_AIM_LEAD_Z,
            );
        let vel = (target - pos).normalize_or_zero() * Self::speed_for(score, level);
        let tumble = Vec3::new(
            rng.random::<f32>() * OBSTACLE_MAX_TUMBLE,
            rng.random::<f32>() * OBSTACLE_MAX_TUMBLE,
            rng.random::<f32>() * OBSTACLE_MAX_TUMBLE,
        );

        Self {
            pos,
            vel,
            rotation: Vec3::ZERO,
            tumble,
            radius: OBSTACLE_RADIUS,
            hp: Self::hp_for(level),
            shape,
            alive: true,
        }
    }

    /// Flight speed grows with score and level
    pub fn speed_for(score: u64, level: u32) -> f32 {
        BASE_SPEED + score as f32 / OBSTACLE_SPEED_SCORE_DIV + level as f32 * OBSTACLE_SPEED_PER_LEVEL
    }

    /// Hitpoints: 2 at level 1, +1 roughly every 1.5 levels
    pub fn hp_for(level: u32) -> i32 {
        OBSTACLE_BASE_HP + (level as f32 / 1.5).floor() as i32
    }
}

impl Entity for Obstacle {
    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation.x += self.tumble.x;
        self.rotation.y += self.tumble.y;
        if self.pos.z > OBSTACLE_DESPAWN_Z {
            self.kill();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Restores 40 health, capped at max
    Heal,
    /// Blocks all damage for 12 seconds
    Shield,
    /// Doubles fire rate and barrels for 10 seconds
    Hyper,
}

/// A collectible ring drifting toward the player
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec3,
    pub kind: PowerUpKind,
    pub spin: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(pos: Vec3, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            spin: 0.0,
            alive: true,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = match rng.random_range(0..3) {
            0 => PowerUpKind::Heal,
            1 => PowerUpKind::Shield,
            _ => PowerUpKind::Hyper,
        };
        let pos = Vec3::new(
            spread(rng, POWERUP_SPREAD_X),
            spread(rng, POWERUP_SPREAD_Y),
            POWERUP_SPAWN_Z,
        );
        Self::new(pos, kind)
    }
}

impl Entity for PowerUp {
    fn update(&mut self, dt: f32) {
        self.pos.z += BASE_SPEED * dt;
        self.spin += dt * POWERUP_SPIN;
        if self.pos.z > POWERUP_DESPAWN_Z {
            self.kill();
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// What produced a particle (renderer picks the color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    /// Destroyed obstacle
    Debris,
    /// Bolt striking the boss
    Spark,
    /// Boss wreck
    BossHull,
    /// Enemy bolt striking the ship
    ShipHit,
    /// Obstacle ramming the ship
    Impact,
    /// Ship wreck at game over
    ShipHull,
}

/// A cosmetic debris cube
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Normalized remaining life, 1.0 -> 0.0
    pub life: f32,
    pub kind: BurstKind,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, pos: Vec3, kind: BurstKind) -> Self {
        Self {
            pos,
            vel: Vec3::new(
                spread(rng, PARTICLE_SPREAD),
                spread(rng, PARTICLE_SPREAD),
                spread(rng, PARTICLE_SPREAD),
            ),
            life: 1.0,
            kind,
        }
    }

    /// Render scale, shrinks with life
    pub fn scale(&self) -> f32 {
        self.life.max(0.0)
    }
}

impl Entity for Particle {
    fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt * PARTICLE_DECAY;
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    fn kill(&mut self) {
        self.life = 0.0;
    }
}

/// Boss movement phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    /// Flying in from the spawn depth
    Approaching,
    /// Swaying at holding depth and firing
    Holding,
}

/// The level boss (at most one per session)
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec3,
    pub health: i32,
    pub max_health: i32,
    pub phase: BossPhase,
    /// Seconds alive, drives the holding pattern
    pub clock: f32,
    pub last_fire: f32,
    pub fire_interval: f32,
    pub alive: bool,
}

impl Boss {
    pub fn new(level: u32) -> Self {
        let max_health = Self::health_for(level);
        Self {
            pos: Vec3::new(0.0, 0.0, BOSS_SPAWN_Z),
            health: max_health,
            max_health,
            phase: BossPhase::Approaching,
            clock: 0.0,
            last_fire: 0.0,
            fire_interval: Self::fire_interval_for(level),
            alive: true,
        }
    }

    pub fn health_for(level: u32) -> i32 {
        BOSS_BASE_HEALTH + level as i32 * BOSS_HEALTH_PER_LEVEL
    }

    pub fn fire_interval_for(level: u32) -> f32 {
        (BOSS_FIRE_INTERVAL - level as f32 * BOSS_FIRE_INTERVAL_PER_LEVEL).max(BOSS_FIRE_INTERVAL_MIN)
    }

    /// Remaining health in [0, 1] for display
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Fire both cannons if the cadence allows. Only fires while holding.
    pub fn try_fire(&mut self) -> Option<[Projectile; 2]> {
        if !self.alive || self.phase != BossPhase::Holding {
            return None;
        }
        if self.clock - self.last_fire <= self.fire_interval {
            return None;
        }
        self.last_fire = self.clock;
        let offset = Vec3::new(BOSS_CANNON_OFFSET, 0.0, 0.0);
        Some([
            Projectile::enemy(self.pos - offset),
            Projectile::enemy(self.pos + offset),
        ])
    }
}

impl Entity for Boss {
    fn update(&mut self, dt: f32) {
        self.clock += dt;
        if self.pos.z < BOSS_HOLD_Z {
            self.pos.z += BOSS_APPROACH_SPEED * dt;
        } else {
            self.phase = BossPhase::Holding;
            self.pos.x = (self.clock * 0.6).sin() * BOSS_SWAY_X;
            self.pos.y = BOSS_HOVER_Y + (self.clock * 0.9).cos() * BOSS_HOVER_Y;
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}
