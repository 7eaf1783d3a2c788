//! Parallax scenery
//!
//! Stars and nebulae scroll toward the camera and wrap back to the far end
//! once they pass it. Purely decorative; nothing collides with them.

use glam::Vec3;
use rand::Rng;

use crate::consts::*;
use crate::spread;

/// Star field extent (x, y, z spread)
const STAR_FIELD: Vec3 = Vec3::new(2500.0, 2500.0, 5000.0);
/// Nebula field extent (x, y, z spread)
const NEBULA_FIELD: Vec3 = Vec3::new(1500.0, 1200.0, 4000.0);

#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec3,
    pub spin: f32,
    /// Index into the renderer's nebula palette
    pub tint: u8,
}

/// Background decorations
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub stars: Vec<Vec3>,
    pub nebulae: Vec<Nebula>,
}

impl Environment {
    /// Scatter `star_count` stars and `nebula_count` nebulae
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, star_count: usize, nebula_count: usize) -> Self {
        let stars = (0..star_count)
            .map(|_| {
                Vec3::new(
                    spread(rng, STAR_FIELD.x),
                    spread(rng, STAR_FIELD.y),
                    spread(rng, STAR_FIELD.z),
                )
            })
            .collect();
        let nebulae = (0..nebula_count)
            .map(|i| Nebula {
                pos: Vec3::new(
                    spread(rng, NEBULA_FIELD.x),
                    spread(rng, NEBULA_FIELD.y),
                    spread(rng, NEBULA_FIELD.z),
                ),
                spin: 0.0,
                tint: (i % 5) as u8,
            })
            .collect();
        Self { stars, nebulae }
    }

    /// Scroll everything forward and recycle what passed the camera
    pub fn advance(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.z += STAR_SPEED * dt;
            if star.z > STAR_RECYCLE_Z {
                star.z = STAR_RESET_Z;
            }
        }
        for nebula in &mut self.nebulae {
            nebula.pos.z += BASE_SPEED * dt;
            if nebula.pos.z > NEBULA_RECYCLE_Z {
                nebula.pos.z = NEBULA_RESET_Z;
            }
            nebula.spin += NEBULA_SPIN;
        }
    }
}
