//! Timer-driven spawning of obstacles, power-ups and the boss
//!
//! Timers reset to zero when they fire rather than subtracting the
//! interval, so overshoot is discarded.

use super::entities::{Boss, Obstacle, PowerUp};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Seconds between obstacle spawns at a given score (floored at 0.1)
pub fn obstacle_interval(score: u64) -> f32 {
    (SPAWN_INTERVAL_BASE - score as f32 / SPAWN_INTERVAL_SCORE_DIV).max(SPAWN_INTERVAL_MIN)
}

/// Obstacle timer. Suspended while a boss is active.
pub fn spawn_obstacles(state: &mut GameState, dt: f32) {
    if state.boss_active() {
        return;
    }
    state.spawn_timer += dt;
    if state.spawn_timer > obstacle_interval(state.score) {
        let obstacle = Obstacle::spawn(&mut state.rng, state.ship.pos, state.score, state.level);
        state.obstacles.push(obstacle);
        state.spawn_timer = 0.0;
    }
}

/// Power-up timer, runs regardless of the boss
pub fn spawn_power_ups(state: &mut GameState, dt: f32) {
    state.power_up_timer += dt;
    if state.power_up_timer > POWERUP_INTERVAL {
        let power_up = PowerUp::spawn(&mut state.rng);
        log::debug!("Power-up spawned: {:?}", power_up.kind);
        state.power_ups.push(power_up);
        state.power_up_timer = 0.0;
    }
}

/// Spawn the boss once the score reaches the level threshold.
/// Returns true if a boss was created.
pub fn check_boss_trigger(state: &mut GameState) -> bool {
    if state.boss_active() || state.score < state.boss_threshold() {
        return false;
    }
    let boss = Boss::new(state.level);
    log::info!(
        "Boss incoming at level {} ({} hp)",
        state.level,
        boss.max_health
    );
    state.events.push(GameEvent::BossSpawned {
        level: state.level,
        health: boss.max_health,
    });
    state.boss = Some(boss);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_endpoints() {
        assert!((obstacle_interval(0) - 0.42).abs() < 1e-6);
        assert!((obstacle_interval(5760) - 0.1).abs() < 1e-4);
        assert_eq!(obstacle_interval(1_000_000), SPAWN_INTERVAL_MIN);
    }

    proptest! {
        #[test]
        fn interval_stays_in_range(score in 0u64..10_000_000) {
            let interval = obstacle_interval(score);
            prop_assert!(interval >= SPAWN_INTERVAL_MIN);
            prop_assert!(interval <= SPAWN_INTERVAL_BASE);
        }
    }

    #[test]
    fn test_obstacle_timer_resets_to_zero() {
        let mut state = GameState::new(11);
        state.start();
        spawn_obstacles(&mut state, 0.4);
        assert!(state.obstacles.is_empty());
        spawn_obstacles(&mut state, 0.1);
        assert_eq!(state.obstacles.len(), 1);
        // Overshoot is dropped, not carried
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_obstacles_suspended_during_boss() {
        let mut state = GameState::new(11);
        state.start();
        state.boss = Some(Boss::new(1));
        for _ in 0..50 {
            spawn_obstacles(&mut state, 0.1);
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_power_up_every_twelve_seconds() {
        let mut state = GameState::new(11);
        state.start();
        state.boss = Some(Boss::new(1));
        spawn_power_ups(&mut state, 11.9);
        assert!(state.power_ups.is_empty());
        spawn_power_ups(&mut state, 0.2);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_up_timer, 0.0);
    }

    #[test]
    fn test_boss_trigger_once() {
        let mut state = GameState::new(11);
        state.start();
        state.score = 4999;
        assert!(!check_boss_trigger(&mut state));
        state.score = 5000;
        assert!(check_boss_trigger(&mut state));
        assert!(!check_boss_trigger(&mut state));
        assert_eq!(state.boss.as_ref().map(|b| b.max_health), Some(100));
    }
}
