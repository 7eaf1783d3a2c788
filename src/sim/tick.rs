//! Variable timestep simulation tick
//!
//! Core game loop: one call per rendered frame, advancing everything by a
//! clamped delta in a fixed order.

use glam::{Vec2, Vec3};

use super::collision;
use super::pool::Entity;
use super::spawner;
use super::state::GameState;
use crate::consts::*;

/// Input sampled at the start of a frame (last write wins)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch position, each axis in [-1, 1]
    pub pointer: Vec2,
    /// Trigger held (mouse button, touch, space, ctrl)
    pub fire: bool,
    /// Pause toggle edge
    pub pause: bool,
    /// Start/restart edge
    pub start: bool,
    /// Attract mode - the ship flies itself
    pub autopilot: bool,
}

/// Clamp a raw frame delta to [0, MAX_FRAME_DT]; non-finite deltas become 0
#[inline]
pub fn clamp_delta(raw: f64) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }
    (raw as f32).clamp(0.0, MAX_FRAME_DT)
}

/// Turns host timestamps (seconds) into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call. The first call yields 0.
    pub fn advance(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(prev) => clamp_delta(now - prev),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start {
        state.start();
    }
    if input.pause {
        state.toggle_pause();
    }

    // Idle, paused and game over all freeze the simulation
    if !state.is_running() {
        return;
    }

    let dt = clamp_delta(dt as f64);
    state.time += dt;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    // Ship
    if let Some(volley) = state.ship.update(input.pointer, input.fire, dt, state.time) {
        for shot in volley {
            state.player_shots.push(shot);
        }
    }

    // Spawning
    spawner::spawn_obstacles(state, dt);
    spawner::spawn_power_ups(state, dt);

    // Boss
    if let Some(boss) = state.boss.as_mut() {
        boss.update(dt);
        if let Some(shots) = boss.try_fire() {
            for shot in shots {
                state.enemy_shots.push(shot);
            }
        }
    } else {
        spawner::check_boss_trigger(state);
    }

    state.environment.advance(dt);

    // Order matters: obstacles resolve after they move, and after the
    // bolt passes so a boss kill lands before any ram
    collision::update_player_shots(state, dt);
    collision::update_enemy_shots(state, dt);
    // A fatal hit freezes the rest of the frame so the final score stands
    if !state.is_running() {
        return;
    }
    collision::update_power_ups(state, dt);
    collision::update_obstacles(state, dt);
    collision::update_particles(state, dt);

    state.shake *= SHAKE_DECAY;
}

/// Steer toward the most urgent target and keep the trigger down
fn autopilot(state: &GameState, input: &mut TickInput) {
    input.fire = true;

    let target = state
        .boss
        .as_ref()
        .map(|b| b.pos)
        .or_else(|| {
            // Nearest pickup ahead of the ship
            state
                .power_ups
                .alive()
                .filter(|p| p.pos.z < 0.0)
                .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
                .map(|p| p.pos)
        })
        .or_else(|| {
            // Closest incoming obstacle
            state
                .obstacles
                .alive()
                .filter(|o| o.pos.z < 0.0)
                .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
                .map(|o| o.pos)
        });

    if let Some(Vec3 { x, y, .. }) = target {
        input.pointer = Vec2::new(x / SHIP_BOUNDS_X, y / SHIP_BOUNDS_Y).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }
}
