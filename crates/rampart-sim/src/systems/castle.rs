//! Castle health and the match clock.
//!
//! `Playing -> Win | Lose` is one-way. Once terminal, every method is a
//! no-op; the engine tears down the timers on the transition itself.

use rampart_core::config::CastleConfig;
use rampart_core::enums::MatchState;
use rampart_core::state::CastleView;

#[derive(Debug, Clone)]
pub struct CastleState {
    health: i32,
    max_health: i32,
    countdown_secs: u32,
    match_state: MatchState,
}

impl CastleState {
    pub fn new(config: &CastleConfig) -> Self {
        Self {
            health: config.max_health,
            max_health: config.max_health,
            countdown_secs: config.match_duration_secs,
            match_state: MatchState::Playing,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Health fraction for the health bar, clamped to [0, 1].
    pub fn percent(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }

    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    pub fn is_playing(&self) -> bool {
        self.match_state == MatchState::Playing
    }

    /// Apply one enemy's damage tick. Returns `Lose` on the transition.
    pub fn apply_damage(&mut self, amount: i32) -> Option<MatchState> {
        if !self.is_playing() {
            return None;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.match_state = MatchState::Lose;
            return Some(MatchState::Lose);
        }
        None
    }

    /// Count down one second. Returns `Win` when the clock runs out with the
    /// castle still standing.
    pub fn tick_countdown(&mut self) -> Option<MatchState> {
        if !self.is_playing() {
            return None;
        }
        self.countdown_secs = self.countdown_secs.saturating_sub(1);
        if self.countdown_secs == 0 && self.health > 0 {
            self.match_state = MatchState::Win;
            return Some(MatchState::Win);
        }
        None
    }

    pub fn view(&self) -> CastleView {
        CastleView {
            health: self.health,
            max_health: self.max_health,
            percent: self.percent(),
        }
    }
}

impl Default for CastleState {
    fn default() -> Self {
        Self::new(&CastleConfig::default())
    }
}
