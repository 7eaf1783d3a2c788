//! Per-entity instance data for an external renderer

use bytemuck::{Pod, Zeroable};

use crate::consts::*;
use crate::sim::{BurstKind, GameState, ObstacleShape, PowerUpKind, Side};

/// Nebula sphere radius
const NEBULA_SCALE: f32 = 280.0;
/// Shield bubble radius around the ship
const SHIELD_BUBBLE_SCALE: f32 = 3.2;

/// What mesh an instance should be drawn with
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    Ship = 0,
    ShieldBubble = 1,
    MuzzleFlash = 2,
    PlayerShot = 3,
    EnemyShot = 4,
    Icosahedron = 5,
    Octahedron = 6,
    Cube = 7,
    PowerUpRing = 8,
    Particle = 9,
    Boss = 10,
    Star = 11,
    Nebula = 12,
}

impl From<ObstacleShape> for InstanceKind {
    fn from(shape: ObstacleShape) -> Self {
        match shape {
            ObstacleShape::Icosahedron => InstanceKind::Icosahedron,
            ObstacleShape::Octahedron => InstanceKind::Octahedron,
            ObstacleShape::Cube => InstanceKind::Cube,
        }
    }
}

/// One drawable (48 bytes, matches the instance buffer layout)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct Instance {
    pub position: [f32; 3],
    pub scale: f32,
    /// Euler angles (radians)
    pub rotation: [f32; 3],
    pub kind: u32,
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(kind: InstanceKind, position: glam::Vec3, scale: f32, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            scale,
            rotation: [0.0; 3],
            kind: kind as u32,
            color,
        }
    }

    pub fn with_rotation(mut self, rotation: glam::Vec3) -> Self {
        self.rotation = rotation.to_array();
        self
    }

    pub fn kind(&self) -> u32 {
        self.kind
    }
}

/// Colors for game elements
pub mod colors {
    /// 0xRRGGBB to linear-ish RGBA
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const BACKGROUND: [f32; 4] = hex(0x010108, 1.0);
    pub const SHIP: [f32; 4] = hex(0x4f46e5, 1.0);
    pub const SHIELD: [f32; 4] = hex(0x7c3aed, 0.3);
    pub const MUZZLE: [f32; 4] = hex(0x00ffff, 1.0);
    pub const PLAYER_SHOT: [f32; 4] = hex(0x00ffff, 1.0);
    pub const ENEMY_SHOT: [f32; 4] = hex(0xff0000, 1.0);
    pub const ROCK: [f32; 4] = hex(0x444444, 1.0);
    pub const ROCK_CRYSTAL: [f32; 4] = hex(0x7c3aed, 1.0);
    pub const BOSS: [f32; 4] = hex(0xef4444, 1.0);
    pub const STAR: [f32; 4] = hex(0xffffff, 0.8);

    pub const HEAL: [f32; 4] = hex(0x22c55e, 1.0);
    pub const SHIELD_RING: [f32; 4] = hex(0x7c3aed, 1.0);
    pub const HYPER: [f32; 4] = hex(0xeab308, 1.0);

    pub const DEBRIS: [f32; 4] = hex(0xcccccc, 1.0);
    pub const SPARK: [f32; 4] = hex(0xffffff, 1.0);
    pub const SHIP_HIT: [f32; 4] = hex(0xff3333, 1.0);
    pub const IMPACT: [f32; 4] = hex(0xff9900, 1.0);

    /// Nebula tints, indexed by `Nebula::tint`
    pub const NEBULAE: [[f32; 4]; 5] = [
        hex(0x4f46e5, 0.04),
        hex(0x7c3aed, 0.04),
        hex(0x06b6d4, 0.04),
        hex(0xef4444, 0.04),
        hex(0x3b82f6, 0.04),
    ];
}

pub fn burst_color(kind: BurstKind) -> [f32; 4] {
    match kind {
        BurstKind::Debris => colors::DEBRIS,
        BurstKind::Spark => colors::SPARK,
        BurstKind::BossHull => colors::BOSS,
        BurstKind::ShipHit => colors::SHIP_HIT,
        BurstKind::Impact => colors::IMPACT,
        BurstKind::ShipHull => colors::SHIP,
    }
}

pub fn power_up_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Heal => colors::HEAL,
        PowerUpKind::Shield => colors::SHIELD_RING,
        PowerUpKind::Hyper => colors::HYPER,
    }
}

/// Flatten every visible thing in the session into instances.
///
/// Scenery comes first so a renderer without depth sorting still draws
/// gameplay on top.
pub fn collect_instances(state: &GameState) -> Vec<Instance> {
    let env = &state.environment;
    let mut out = Vec::with_capacity(
        env.stars.len()
            + env.nebulae.len()
            + state.obstacles.len()
            + state.player_shots.len()
            + state.enemy_shots.len()
            + state.power_ups.len()
            + state.particles.len()
            + 4,
    );

    out.extend(
        env.stars
            .iter()
            .map(|&star| Instance::new(InstanceKind::Star, star, 1.0, colors::STAR)),
    );
    out.extend(env.nebulae.iter().map(|nebula| {
        let tint = colors::NEBULAE[nebula.tint as usize % colors::NEBULAE.len()];
        Instance::new(InstanceKind::Nebula, nebula.pos, NEBULA_SCALE, tint)
            .with_rotation(glam::Vec3::new(0.0, 0.0, nebula.spin))
    }));

    // The wreck replaces the ship once the run is over
    if state.phase != crate::sim::GamePhase::GameOver {
        let ship = &state.ship;
        out.push(Instance::new(InstanceKind::Ship, ship.pos, 1.0, colors::SHIP).with_rotation(ship.rotation));
        if ship.shielded() {
            out.push(Instance::new(
                InstanceKind::ShieldBubble,
                ship.pos,
                SHIELD_BUBBLE_SCALE,
                colors::SHIELD,
            ));
        }
        if ship.muzzle_flash > 0.0 {
            out.push(Instance::new(
                InstanceKind::MuzzleFlash,
                ship.pos,
                ship.muzzle_flash / MUZZLE_FLASH,
                colors::MUZZLE,
            ));
        }
    }

    for shot in state.player_shots.alive().chain(state.enemy_shots.alive()) {
        let (kind, color) = match shot.side {
            Side::Player => (InstanceKind::PlayerShot, colors::PLAYER_SHOT),
            Side::Enemy => (InstanceKind::EnemyShot, colors::ENEMY_SHOT),
        };
        out.push(Instance::new(kind, shot.pos, shot.radius, color));
    }

    for rock in state.obstacles.alive() {
        let color = match rock.shape {
            ObstacleShape::Octahedron => colors::ROCK_CRYSTAL,
            _ => colors::ROCK,
        };
        out.push(Instance::new(rock.shape.into(), rock.pos, rock.radius, color).with_rotation(rock.rotation));
    }

    for power_up in state.power_ups.alive() {
        out.push(
            Instance::new(
                InstanceKind::PowerUpRing,
                power_up.pos,
                1.0,
                power_up_color(power_up.kind),
            )
            .with_rotation(glam::Vec3::new(0.0, power_up.spin, 0.0)),
        );
    }

    if let Some(boss) = &state.boss {
        out.push(Instance::new(InstanceKind::Boss, boss.pos, BOSS_RADIUS, colors::BOSS));
    }

    out.extend(
        state
            .particles
            .alive()
            .map(|p| Instance::new(InstanceKind::Particle, p.pos, p.scale(), burst_color(p.kind))),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Boss, Environment, GamePhase, Particle, PowerUp, Projectile};
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn count(instances: &[Instance], kind: InstanceKind) -> usize {
        instances.iter().filter(|i| i.kind() == kind as u32).count()
    }

    #[test]
    fn test_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<Instance>(), 48);
        let inst = Instance::new(InstanceKind::Boss, Vec3::ONE, 2.0, colors::BOSS);
        let bytes: &[u8] = bytemuck::bytes_of(&inst);
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn test_hex() {
        assert_eq!(colors::hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(colors::hex(0x0000ff, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_collect_counts_alive_only() {
        let mut rng = Pcg32::seed_from_u64(4);
        let env = Environment::generate(&mut rng, 10, 3);
        let mut state = GameState::with_environment(4, env);
        state.start();

        state.player_shots.push(Projectile::player(Vec3::ZERO));
        let mut dead = Projectile::player(Vec3::ONE);
        dead.alive = false;
        state.player_shots.push(dead);
        state.enemy_shots.push(Projectile::enemy(Vec3::ZERO));
        state.power_ups.push(PowerUp::new(Vec3::ZERO, PowerUpKind::Hyper));
        state.particles.push(Particle::spawn(&mut rng, Vec3::ZERO, BurstKind::Spark));
        state.boss = Some(Boss::new(1));

        let out = collect_instances(&state);
        assert_eq!(count(&out, InstanceKind::Star), 10);
        assert_eq!(count(&out, InstanceKind::Nebula), 3);
        assert_eq!(count(&out, InstanceKind::Ship), 1);
        assert_eq!(count(&out, InstanceKind::PlayerShot), 1);
        assert_eq!(count(&out, InstanceKind::EnemyShot), 1);
        assert_eq!(count(&out, InstanceKind::PowerUpRing), 1);
        assert_eq!(count(&out, InstanceKind::Particle), 1);
        assert_eq!(count(&out, InstanceKind::Boss), 1);
        assert_eq!(count(&out, InstanceKind::ShieldBubble), 0);

        let ring = out
            .iter()
            .find(|i| i.kind() == InstanceKind::PowerUpRing as u32)
            .map(|i| i.color);
        assert_eq!(ring, Some(colors::HYPER));
    }

    #[test]
    fn test_shield_bubble_and_wreck() {
        let mut state = GameState::new(1);
        state.start();
        state.ship.shield_timer = 5.0;
        let out = collect_instances(&state);
        assert_eq!(count(&out, InstanceKind::ShieldBubble), 1);

        state.phase = GamePhase::GameOver;
        let out = collect_instances(&state);
        assert_eq!(count(&out, InstanceKind::Ship), 0);
        assert_eq!(count(&out, InstanceKind::ShieldBubble), 0);
    }
}
