//! Player ship and controller
//!
//! Pointer coordinates in [-1, 1] map onto the flight plane; the ship eases
//! toward that target every frame and fires while the trigger is held.

use glam::{Vec2, Vec3};

use super::entities::{PowerUpKind, Projectile};
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec3,
    /// Pitch (x) and roll (z) from the last move, cosmetic
    pub rotation: Vec3,
    /// May go negative on the killing blow; clamp for display
    pub health: i32,
    /// Seconds of shield left (inactive at <= 0)
    pub shield_timer: f32,
    /// Seconds of hyper fire left (inactive at <= 0)
    pub hyper_timer: f32,
    /// Session time of the last volley
    pub last_fire: f32,
    /// Engine light intensity, spikes on every volley
    pub muzzle_flash: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            health: SHIP_MAX_HEALTH,
            shield_timer: 0.0,
            hyper_timer: 0.0,
            last_fire: 0.0,
            muzzle_flash: 0.0,
        }
    }
}

impl Ship {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn shielded(&self) -> bool {
        self.shield_timer > 0.0
    }

    #[inline]
    pub fn hyper(&self) -> bool {
        self.hyper_timer > 0.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Health in [0, 100] for the HUD bar
    pub fn health_percent(&self) -> f32 {
        (self.health as f32 / SHIP_MAX_HEALTH as f32 * 100.0).clamp(0.0, 100.0)
    }

    /// Ease toward the pointer target. Frame-rate dependent on purpose.
    pub fn steer(&mut self, pointer: Vec2) {
        let pointer = pointer.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let target = Vec2::new(pointer.x * SHIP_BOUNDS_X, pointer.y * SHIP_BOUNDS_Y);

        self.pos.x += (target.x - self.pos.x) * SHIP_EASE;
        self.pos.y += (target.y - self.pos.y) * SHIP_EASE;

        self.rotation.z = -(target.x - self.pos.x) * SHIP_ROLL_FACTOR;
        self.rotation.x = (target.y - self.pos.y) * SHIP_PITCH_FACTOR;
    }

    /// Count down power-up timers and the muzzle light
    pub fn tick_timers(&mut self, dt: f32) {
        if self.shield_timer > 0.0 {
            self.shield_timer -= dt;
        }
        if self.hyper_timer > 0.0 {
            self.hyper_timer -= dt;
        }
        self.muzzle_flash = (self.muzzle_flash - dt * MUZZLE_FLASH_DECAY).max(0.0);
    }

    pub fn fire_rate(&self) -> f32 {
        if self.hyper() { FIRE_RATE_HYPER } else { FIRE_RATE }
    }

    /// Fire a volley if the trigger is held and the cadence allows
    pub fn try_fire(&mut self, fire_held: bool, time: f32) -> Option<Vec<Projectile>> {
        if !fire_held || time - self.last_fire <= self.fire_rate() {
            return None;
        }
        self.last_fire = time;
        self.muzzle_flash = MUZZLE_FLASH;
        Some(self.volley())
    }

    /// Symmetric spread of bolts around the ship's nose
    fn volley(&self) -> Vec<Projectile> {
        let count = if self.hyper() { VOLLEY_SIZE_HYPER } else { VOLLEY_SIZE };
        let center = (count as f32 - 1.0) / 2.0;
        (0..count)
            .map(|i| {
                let offset = (i as f32 - center) * VOLLEY_SPACING;
                Projectile::player(self.pos + Vec3::new(offset, 0.0, 0.0))
            })
            .collect()
    }

    /// Full per-frame controller step
    pub fn update(&mut self, pointer: Vec2, fire_held: bool, dt: f32, time: f32) -> Option<Vec<Projectile>> {
        self.steer(pointer);
        self.tick_timers(dt);
        self.try_fire(fire_held, time)
    }

    /// Apply a collected power-up
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Heal => self.health = (self.health + HEAL_AMOUNT).min(SHIP_MAX_HEALTH),
            PowerUpKind::Shield => self.shield_timer = SHIELD_DURATION,
            PowerUpKind::Hyper => self.hyper_timer = HYPER_DURATION,
        }
    }

    /// Take damage unless shielded. Returns true if health was lost.
    pub fn take_hit(&mut self, damage: i32) -> bool {
        if self.shielded() {
            return false;
        }
        self.health -= damage;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_eases_toward_target() {
        let mut ship = Ship::new();
        ship.steer(Vec2::new(1.0, -1.0));
        assert!((ship.pos.x - 3.6).abs() < 1e-4);
        assert!((ship.pos.y + 2.7).abs() < 1e-4);
        // Rolls away from the remaining offset
        assert!(ship.rotation.z < 0.0);
        assert!(ship.rotation.x < 0.0);

        for _ in 0..200 {
            ship.steer(Vec2::new(1.0, -1.0));
        }
        assert!((ship.pos.x - SHIP_BOUNDS_X).abs() < 0.01);
        assert!((ship.pos.y + SHIP_BOUNDS_Y).abs() < 0.01);
    }

    #[test]
    fn test_steer_clamps_pointer() {
        let mut ship = Ship::new();
        for _ in 0..200 {
            ship.steer(Vec2::new(5.0, 0.0));
        }
        assert!(ship.pos.x <= SHIP_BOUNDS_X + 1e-3);
    }

    #[test]
    fn test_fire_cadence() {
        let mut ship = Ship::new();
        assert!(ship.try_fire(true, 0.1).is_none());
        let volley = ship.try_fire(true, 0.15).expect("first volley");
        assert_eq!(volley.len(), 2);
        assert!((volley[0].pos.x + 0.6).abs() < 1e-5);
        assert!((volley[1].pos.x - 0.6).abs() < 1e-5);
        assert_eq!(ship.muzzle_flash, MUZZLE_FLASH);

        assert!(ship.try_fire(true, 0.25).is_none());
        assert!(ship.try_fire(false, 1.0).is_none());
        assert!(ship.try_fire(true, 0.3).is_some());
    }

    #[test]
    fn test_hyper_volley() {
        let mut ship = Ship::new();
        ship.apply_power_up(PowerUpKind::Hyper);
        let volley = ship.try_fire(true, 0.08).expect("hyper volley");
        assert_eq!(volley.len(), 4);
        let xs: Vec<f32> = volley.iter().map(|p| p.pos.x).collect();
        assert!((xs[0] + 1.8).abs() < 1e-5);
        assert!((xs[3] - 1.8).abs() < 1e-5);
        assert!(ship.try_fire(true, 0.16).is_some());
    }

    #[test]
    fn test_heal_is_capped() {
        let mut ship = Ship::new();
        ship.health = 70;
        ship.apply_power_up(PowerUpKind::Heal);
        assert_eq!(ship.health, 100);
    }

    #[test]
    fn test_shield_blocks_hits() {
        let mut ship = Ship::new();
        ship.apply_power_up(PowerUpKind::Shield);
        assert!(!ship.take_hit(OBSTACLE_DAMAGE));
        assert_eq!(ship.health, 100);

        ship.tick_timers(SHIELD_DURATION);
        assert!(!ship.shielded());
        assert!(ship.take_hit(OBSTACLE_DAMAGE));
        assert_eq!(ship.health, 75);
    }

    #[test]
    fn test_health_percent_clamped() {
        let mut ship = Ship::new();
        ship.health = -20;
        assert_eq!(ship.health_percent(), 0.0);
    }
}
