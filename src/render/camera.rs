//! Chase camera
//!
//! Trails the ship from behind and above, eased each frame, with a random
//! jitter proportional to the session's shake magnitude.

use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::GameState;

/// Camera rest position relative to the ship
const OFFSET: Vec3 = Vec3::new(0.0, 7.0, 20.0);
/// Per-frame easing toward the rest position
const FOLLOW: f32 = 0.12;
/// How much of the ship's offset the look target follows
const LOOK_FOLLOW: f32 = 0.1;
const LOOK_Z: f32 = -100.0;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
    /// Jitter source, independent of the sim RNG
    rng: Pcg32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 20.0),
            target: Vec3::new(0.0, 0.0, LOOK_Z),
            fov_y: 75f32.to_radians(),
            rng: Pcg32::seed_from_u64(0x5eed),
        }
    }

    /// Ease toward the ship. `shake` off skips the jitter (reduced motion).
    pub fn follow(&mut self, state: &GameState, shake: bool) {
        let ship = state.ship.pos;
        let rest = ship + OFFSET;
        self.position.x += (rest.x - self.position.x) * FOLLOW;
        self.position.y += (rest.y - self.position.y) * FOLLOW;
        self.position.z = rest.z;

        if shake && state.shake > 0.0 {
            self.position.x += (self.rng.random::<f32>() - 0.5) * state.shake;
            self.position.y += (self.rng.random::<f32>() - 0.5) * state.shake;
        }

        self.target = Vec3::new(ship.x * LOOK_FOLLOW, ship.y * LOOK_FOLLOW, LOOK_Z);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, 0.1, 5000.0) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges() {
        let mut state = GameState::new(1);
        state.ship.pos = Vec3::new(10.0, -4.0, 0.0);
        let mut camera = Camera::new();
        for _ in 0..200 {
            camera.follow(&state, true);
        }
        assert!((camera.position.x - 10.0).abs() < 1e-3);
        assert!((camera.position.y - 3.0).abs() < 1e-3);
        assert!((camera.target.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shake_only_when_enabled() {
        let mut state = GameState::new(1);
        state.shake = 2.5;

        let mut still = Camera::new();
        still.position = OFFSET;
        still.follow(&state, false);
        assert_eq!(still.position, OFFSET);

        let mut shaken = Camera::new();
        shaken.position = OFFSET;
        shaken.follow(&state, true);
        assert_ne!(shaken.position, OFFSET);
        assert!((shaken.position.x - OFFSET.x).abs() <= 1.25);
    }

    #[test]
    fn test_view_projection_is_finite() {
        let camera = Camera::new();
        assert!(camera.view_projection(16.0 / 9.0).is_finite());
    }
}
