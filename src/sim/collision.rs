//! Collision detection and combat resolution
//!
//! Every test is a sphere overlap: squared center distance against the
//! squared sum of radii. Each pass moves its pool first, then resolves hits,
//! so collisions always see this frame's positions.

use glam::Vec3;

use super::entities::BurstKind;
use super::pool::Entity;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Strict sphere overlap without a square root
#[inline]
pub fn overlaps(a: Vec3, b: Vec3, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// A particle burst queued while pools are borrowed
type Burst = (Vec3, BurstKind, usize);

fn flush_bursts(state: &mut GameState, bursts: Vec<Burst>) {
    for (pos, kind, count) in bursts {
        state.explode(pos, kind, count);
    }
}

/// Move player bolts and resolve hits on the boss
pub fn update_player_shots(state: &mut GameState, dt: f32) {
    let mut bursts: Vec<Burst> = Vec::new();
    let mut boss_down = false;

    let GameState {
        player_shots, boss, ..
    } = &mut *state;

    for shot in player_shots.iter_mut().filter(|s| s.is_alive()) {
        shot.update(dt);
        if !shot.is_alive() {
            continue;
        }
        let Some(target) = boss.as_mut().filter(|b| b.is_alive()) else {
            continue;
        };
        if overlaps(shot.pos, target.pos, shot.radius + BOSS_RADIUS) {
            target.health -= 1;
            shot.kill();
            bursts.push((shot.pos, BurstKind::Spark, PARTICLES_BOSS_HIT));
            if target.health <= 0 {
                target.kill();
                boss_down = true;
            }
        }
    }
    player_shots.prune();

    flush_bursts(state, bursts);
    if boss_down {
        defeat_boss(state);
    }
}

/// Boss destroyed: bonus, level up, wreck burst, boss cleared
fn defeat_boss(state: &mut GameState) {
    let Some(boss) = state.boss.take() else {
        return;
    };
    state.explode(boss.pos, BurstKind::BossHull, PARTICLES_BOSS_KILL);
    state.add_score(BOSS_SCORE);
    state.level += 1;
    state.events.push(GameEvent::BossDefeated {
        new_level: state.level,
    });
    log::info!("Boss defeated, advancing to level {}", state.level);
}

/// Move enemy bolts and resolve hits on the ship
pub fn update_enemy_shots(state: &mut GameState, dt: f32) {
    let mut bursts: Vec<Burst> = Vec::new();

    let GameState {
        enemy_shots,
        ship,
        events,
        ..
    } = &mut *state;

    for shot in enemy_shots.iter_mut().filter(|s| s.is_alive()) {
        shot.update(dt);
        if !shot.is_alive() {
            continue;
        }
        if overlaps(shot.pos, ship.pos, shot.radius + SHIP_RADIUS) {
            if ship.take_hit(ENEMY_SHOT_DAMAGE) {
                events.push(GameEvent::ShipHit {
                    health: ship.health,
                });
            }
            bursts.push((shot.pos, BurstKind::ShipHit, PARTICLES_SHIP_HIT));
            shot.kill();
        }
    }
    enemy_shots.prune();

    flush_bursts(state, bursts);
    if state.ship.is_destroyed() {
        state.game_over();
    }
}

/// Move power-ups and apply any the ship flies through
pub fn update_power_ups(state: &mut GameState, dt: f32) {
    let GameState {
        power_ups,
        ship,
        events,
        ..
    } = &mut *state;

    for power_up in power_ups.iter_mut().filter(|p| p.is_alive()) {
        power_up.update(dt);
        if !power_up.is_alive() {
            continue;
        }
        if overlaps(power_up.pos, ship.pos, POWERUP_PICKUP_RADIUS) {
            ship.apply_power_up(power_up.kind);
            events.push(GameEvent::PowerUpCollected(power_up.kind));
            log::debug!("Picked up {:?}", power_up.kind);
            power_up.kill();
        }
    }
    power_ups.prune();
}

/// Move obstacles, then resolve player bolts before ship impacts so a kill
/// and a ram in the same frame still scores the kill
pub fn update_obstacles(state: &mut GameState, dt: f32) {
    let mut bursts: Vec<Burst> = Vec::new();

    let GameState {
        obstacles,
        player_shots,
        ship,
        score,
        events,
        ..
    } = &mut *state;

    for obstacle in obstacles.iter_mut().filter(|o| o.is_alive()) {
        obstacle.update(dt);
        if !obstacle.is_alive() {
            continue;
        }

        // One bolt per obstacle per frame
        if let Some(shot) = player_shots
            .iter_mut()
            .filter(|s| s.is_alive())
            .find(|s| overlaps(obstacle.pos, s.pos, obstacle.radius + s.radius))
        {
            obstacle.hp -= 1;
            shot.kill();
            if obstacle.hp <= 0 {
                *score += OBSTACLE_SCORE;
                bursts.push((obstacle.pos, BurstKind::Debris, PARTICLES_OBSTACLE_KILL));
                events.push(GameEvent::ObstacleDestroyed { pos: obstacle.pos });
                obstacle.kill();
            }
        }

        if obstacle.is_alive() && overlaps(obstacle.pos, ship.pos, obstacle.radius + SHIP_RADIUS) {
            if ship.take_hit(OBSTACLE_DAMAGE) {
                events.push(GameEvent::ShipHit {
                    health: ship.health,
                });
            }
            // Destroyed even when the shield absorbs the hit
            bursts.push((obstacle.pos, BurstKind::Impact, PARTICLES_IMPACT));
            obstacle.kill();
        }
    }
    obstacles.prune();
    player_shots.prune();

    flush_bursts(state, bursts);
    if state.ship.is_destroyed() {
        state.game_over();
    }
}

/// Age particles and drop the spent ones
pub fn update_particles(state: &mut GameState, dt: f32) {
    state.particles.update_all(dt);
    state.particles.prune();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Boss, Obstacle, PowerUp, PowerUpKind, Projectile};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state.drain_events();
        state
    }

    /// Stationary obstacle parked at `pos`
    fn parked_obstacle(pos: Vec3, hp: i32) -> Obstacle {
        let mut o = Obstacle::spawn(&mut Pcg32::seed_from_u64(0), Vec3::ZERO, 0, 1);
        o.pos = pos;
        o.vel = Vec3::ZERO;
        o.hp = hp;
        o
    }

    #[test]
    fn test_overlaps_is_strict() {
        assert!(overlaps(Vec3::ZERO, Vec3::new(5.9, 0.0, 0.0), 6.0));
        assert!(!overlaps(Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0), 6.0));
    }

    #[test]
    fn test_obstacle_destroyed_after_exact_hits() {
        let mut state = running();
        let target = Vec3::new(0.0, 0.0, -300.0);
        state.obstacles.push(parked_obstacle(target, 3));

        for frame in 0..3 {
            state.player_shots.push(Projectile::player(target));
            update_obstacles(&mut state, 0.0);
            if frame < 2 {
                assert_eq!(state.obstacles.len(), 1);
                assert_eq!(state.score, 0);
            }
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, OBSTACLE_SCORE);
        assert_eq!(state.particles.len(), PARTICLES_OBSTACLE_KILL);

        // Nothing left to score
        state.player_shots.push(Projectile::player(target));
        update_obstacles(&mut state, 0.0);
        assert_eq!(state.score, OBSTACLE_SCORE);
    }

    #[test]
    fn test_one_bolt_per_obstacle_per_frame() {
        let mut state = running();
        let target = Vec3::new(0.0, 0.0, -300.0);
        state.obstacles.push(parked_obstacle(target, 2));
        state.player_shots.push(Projectile::player(target));
        state.player_shots.push(Projectile::player(target));

        update_obstacles(&mut state, 0.0);
        assert_eq!(state.obstacles.iter().next().map(|o| o.hp), Some(1));
        assert_eq!(state.player_shots.len(), 1);
    }

    #[test]
    fn test_kill_and_ram_same_frame_scores_kill() {
        let mut state = running();
        state.obstacles.push(parked_obstacle(Vec3::ZERO, 1));
        state.player_shots.push(Projectile::player(Vec3::ZERO));

        update_obstacles(&mut state, 0.0);
        assert_eq!(state.score, OBSTACLE_SCORE);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
    }

    #[test]
    fn test_ram_damages_ship() {
        let mut state = running();
        state.obstacles.push(parked_obstacle(Vec3::new(1.0, 0.0, 0.0), 5));
        update_obstacles(&mut state, 0.0);
        assert_eq!(state.ship.health, 75);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.particles.len(), PARTICLES_IMPACT);
        assert_eq!(state.drain_events(), vec![GameEvent::ShipHit { health: 75 }]);
    }

    #[test]
    fn test_shield_absorbs_ram_but_obstacle_dies() {
        let mut state = running();
        state.ship.apply_power_up(PowerUpKind::Shield);
        state.obstacles.push(parked_obstacle(Vec3::ZERO, 5));
        update_obstacles(&mut state, 0.0);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_shield_absorbs_enemy_bolt() {
        let mut state = running();
        state.ship.apply_power_up(PowerUpKind::Shield);
        state.enemy_shots.push(Projectile::enemy(Vec3::ZERO));
        update_enemy_shots(&mut state, 0.0);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
        assert!(state.enemy_shots.is_empty());
        assert_eq!(state.particles.len(), PARTICLES_SHIP_HIT);
    }

    #[test]
    fn test_enemy_bolt_can_end_run() {
        let mut state = running();
        state.ship.health = 30;
        state.enemy_shots.push(Projectile::enemy(Vec3::new(0.0, 4.0, 0.0)));
        update_enemy_shots(&mut state, 0.0);
        assert_eq!(state.ship.health, 0);
        assert_eq!(state.phase, crate::sim::GamePhase::GameOver);
    }

    #[test]
    fn test_enemy_bolt_reach() {
        let mut state = running();
        // Reach is 3.2 + 1.8 = 5.0
        state.enemy_shots.push(Projectile::enemy(Vec3::new(0.0, 5.0, 0.0)));
        update_enemy_shots(&mut state, 0.0);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH);
        assert_eq!(state.enemy_shots.len(), 1);
    }

    #[test]
    fn test_boss_defeated_after_exact_hits() {
        let mut state = running();
        state.score = 5000;
        let mut boss = Boss::new(1);
        boss.health = 3;
        let boss_pos = boss.pos;
        state.boss = Some(boss);

        for _ in 0..2 {
            state.player_shots.push(Projectile::player(boss_pos));
            update_player_shots(&mut state, 0.0);
            assert!(state.boss_active());
        }
        state.player_shots.push(Projectile::player(boss_pos));
        state.player_shots.push(Projectile::player(boss_pos));
        update_player_shots(&mut state, 0.0);

        assert!(!state.boss_active());
        assert_eq!(state.score, 5000 + BOSS_SCORE);
        assert_eq!(state.level, 2);
        // The extra bolt found no boss to hit
        assert_eq!(state.player_shots.len(), 1);
        assert_eq!(
            state.particles.len(),
            3 * PARTICLES_BOSS_HIT + PARTICLES_BOSS_KILL
        );
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::BossDefeated { new_level: 2 })
        );
    }

    #[test]
    fn test_heal_pickup_clamps() {
        let mut state = running();
        state.ship.health = 70;
        state
            .power_ups
            .push(PowerUp::new(Vec3::new(0.0, 0.0, -5.0), PowerUpKind::Heal));
        update_power_ups(&mut state, 0.0);
        assert_eq!(state.ship.health, 100);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_power_up_out_of_reach() {
        let mut state = running();
        state
            .power_ups
            .push(PowerUp::new(Vec3::new(0.0, 0.0, -6.0), PowerUpKind::Hyper));
        update_power_ups(&mut state, 0.0);
        assert!(!state.ship.hyper());
        assert_eq!(state.power_ups.len(), 1);
    }
}
