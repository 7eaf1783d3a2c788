//! HUD snapshot
//!
//! A plain value built from the session once per frame and handed to a
//! `HudSink` (the DOM on the web, logs or tests elsewhere).

use crate::format_score;
use crate::sim::{GamePhase, GameState};

/// Health below this (exclusive) turns the bar red
pub const HEALTH_CRITICAL: f32 = 40.0;

/// Which overlay is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
    GameOver { final_score: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub score: String,
    pub high_score: String,
    pub level: u32,
    /// Ship health in [0, 100]
    pub health_pct: f32,
    pub health_critical: bool,
    /// Boss health in [0, 100], `None` hides the boss bar
    pub boss_health_pct: Option<f32>,
    pub shield_active: bool,
    pub hyper_active: bool,
    pub screen: Screen,
    /// Frames per second, when the counter is enabled
    pub fps: Option<u32>,
}

impl HudState {
    pub fn from_session(state: &GameState, high_score: u64) -> Self {
        let health_pct = state.ship.health_percent();
        let screen = match state.phase {
            GamePhase::Idle => Screen::Start,
            GamePhase::Running => Screen::Playing,
            GamePhase::Paused => Screen::Paused,
            GamePhase::GameOver => Screen::GameOver {
                final_score: state.score.to_string(),
            },
        };
        Self {
            score: format_score(state.score),
            high_score: format_score(high_score),
            level: state.level,
            health_pct,
            health_critical: health_pct < HEALTH_CRITICAL,
            boss_health_pct: state
                .boss
                .as_ref()
                .map(|b| (b.health_fraction() * 100.0).clamp(0.0, 100.0)),
            shield_active: state.ship.shielded(),
            hyper_active: state.ship.hyper(),
            screen,
            fps: None,
        }
    }

    pub fn with_fps(mut self, fps: Option<u32>) -> Self {
        self.fps = fps;
        self
    }
}

/// Anything that can display the HUD
pub trait HudSink {
    fn apply(&mut self, hud: &HudState);
}

/// Logs screen changes; used by headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    last_screen: Option<Screen>,
}

impl HudSink for LogSink {
    fn apply(&mut self, hud: &HudState) {
        if self.last_screen.as_ref() != Some(&hud.screen) {
            log::debug!("HUD screen -> {:?} (score {}, level {})", hud.screen, hud.score, hud.level);
            self.last_screen = Some(hud.screen.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Boss;

    #[test]
    fn test_idle_shows_start_screen() {
        let state = GameState::new(1);
        let hud = HudState::from_session(&state, 1200);
        assert_eq!(hud.screen, Screen::Start);
        assert_eq!(hud.score, "0000");
        assert_eq!(hud.high_score, "1200");
        assert_eq!(hud.level, 1);
        assert_eq!(hud.boss_health_pct, None);
        assert!(!hud.health_critical);
    }

    #[test]
    fn test_health_clamped_and_critical() {
        let mut state = GameState::new(1);
        state.start();
        state.ship.health = 39;
        let hud = HudState::from_session(&state, 0);
        assert!(hud.health_critical);
        assert_eq!(hud.health_pct, 39.0);

        state.ship.health = 40;
        assert!(!HudState::from_session(&state, 0).health_critical);

        state.ship.health = -20;
        assert_eq!(HudState::from_session(&state, 0).health_pct, 0.0);
    }

    #[test]
    fn test_boss_bar() {
        let mut state = GameState::new(1);
        state.start();
        let mut boss = Boss::new(1);
        boss.health = boss.max_health / 2;
        state.boss = Some(boss);
        let hud = HudState::from_session(&state, 0);
        assert_eq!(hud.boss_health_pct, Some(50.0));
    }

    #[test]
    fn test_flags_and_screens() {
        let mut state = GameState::new(1);
        state.start();
        state.ship.shield_timer = 3.0;
        state.score = 750;
        let hud = HudState::from_session(&state, 0);
        assert!(hud.shield_active);
        assert!(!hud.hyper_active);
        assert_eq!(hud.screen, Screen::Playing);
        assert_eq!(hud.score, "0750");

        state.toggle_pause();
        assert_eq!(HudState::from_session(&state, 0).screen, Screen::Paused);

        state.toggle_pause();
        state.game_over();
        assert_eq!(
            HudState::from_session(&state, 0).screen,
            Screen::GameOver {
                final_score: "750".to_string()
            }
        );
    }

    #[test]
    fn test_log_sink_tracks_screen() {
        let state = GameState::new(1);
        let mut sink = LogSink::default();
        sink.apply(&HudState::from_session(&state, 0));
        assert_eq!(sink.last_screen, Some(Screen::Start));
    }
}
