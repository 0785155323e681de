//! Game state and core simulation types
//!
//! A single [`GameState`] is the whole simulation context: hero, obstacle
//! field, session counters, phase, and the pending event list. The host owns
//! it and passes it to [`tick`](super::tick::tick) once per frame.

use serde::{Deserialize, Serialize};

use super::events::{AudioCue, CoinReason, EndCause, GameEvent};
use super::field::{ObstacleField, PowerUpKind};
use super::hero::Hero;
use super::snapshot::{HeroView, PairView, PowerUpView, SessionView, Snapshot};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; the clock does not advance
    Paused,
    /// Run ended; only a reset leaves this phase
    Ended,
}

/// Score, difficulty and timed effects for one run
///
/// Deadlines are expressed in running ticks. Zero means inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub speed_multiplier: f32,
    pub shield_until: u64,
    pub slow_motion_until: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            speed_multiplier: 1.0,
            shield_until: 0,
            slow_motion_until: 0,
        }
    }
}

impl Session {
    pub fn shield_active(&self, now: u64) -> bool {
        now < self.shield_until
    }

    pub fn slow_motion_active(&self, now: u64) -> bool {
        now < self.slow_motion_until
    }

    /// Start (or restart) the timed effect for `kind`
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, tuning: &Tuning) {
        match kind {
            PowerUpKind::Shield => self.shield_until = now.saturating_add(tuning.shield_ticks),
            PowerUpKind::SlowMotion => {
                self.slow_motion_until = now.saturating_add(tuning.slow_motion_ticks)
            }
        }
    }

    /// Spend the shield on a hit
    pub fn consume_shield(&mut self) {
        self.shield_until = 0;
    }

    /// Count a passed pair. Returns the new multiplier when this pass raised it.
    pub fn record_pass(&mut self, tuning: &Tuning) -> Option<f32> {
        self.score += 1;
        if self.score % tuning.speed_up_every != 0 {
            return None;
        }
        let next = (self.speed_multiplier + tuning.speed_step).min(tuning.speed_cap);
        if next > self.speed_multiplier {
            self.speed_multiplier = next;
            Some(next)
        } else {
            None
        }
    }

    /// Scroll speed for the current tick; recomputed every tick because
    /// slow motion is a timed window
    pub fn scroll_speed(&self, now: u64, tuning: &Tuning) -> f32 {
        let mut speed = tuning.base_speed;
        if self.slow_motion_active(now) {
            speed *= tuning.slow_motion_factor;
        }
        speed * self.speed_multiplier
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Running ticks since start. Doubles as the clock for timed effects, so
    /// paused time never counts against a shield or slow motion.
    pub frame: u64,
    pub hero: Hero,
    pub field: ObstacleField,
    pub session: Session,
    /// Events emitted since the last drain
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new Idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new Idle game with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            frame: 0,
            hero: Hero::new(&tuning),
            field: ObstacleField::new(seed),
            session: Session::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.phase = GamePhase::Running;
        self.emit(GameEvent::Cue(AudioCue::Flap));
        log::info!("Session started (seed {})", self.seed);
    }

    /// Running -> Paused
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Paused at frame {}", self.frame);
        }
    }

    /// Paused -> Running
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::info!("Resumed at frame {}", self.frame);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Apply a lift impulse; ignored unless Running
    pub fn lift(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.hero.apply_lift(self.tuning.lift);
        self.emit(GameEvent::Cue(AudioCue::Flap));
    }

    /// Rebuild hero, field and session from scratch and return to Idle.
    /// Pending timed effects and undrained events go with the old session.
    pub fn reset(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(seed, tuning);
        log::info!("Reset with seed {}", seed);
    }

    /// Terminal transition. Repeated calls after the first are no-ops.
    pub fn end(&mut self, cause: EndCause) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        let final_score = self.session.score;

        self.emit(GameEvent::Cue(AudioCue::Crash));
        let bonus = self.tuning.completion_bonus(final_score);
        if bonus > 0 {
            self.emit(GameEvent::Coins {
                amount: bonus,
                reason: CoinReason::CompletionBonus,
            });
        }
        self.emit(GameEvent::SessionEnded { final_score, cause });
        log::info!("Session ended ({:?}) with score {}", cause, final_score);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending events to collaborators
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn shield_active(&self) -> bool {
        self.session.shield_active(self.frame)
    }

    pub fn slow_motion_active(&self) -> bool {
        self.session.slow_motion_active(self.frame)
    }

    /// Effective scroll speed right now
    pub fn scroll_speed(&self) -> f32 {
        self.session.scroll_speed(self.frame, &self.tuning)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        let now = self.frame;
        Snapshot {
            phase: self.phase,
            frame: now,
            screen_width: self.tuning.screen_width,
            screen_height: self.tuning.screen_height,
            hero: HeroView {
                rect: self.hero.rect(),
                vel_y: self.hero.vel_y,
                shielded: self.session.shield_active(now),
            },
            pairs: self
                .field
                .pairs()
                .iter()
                .map(|pair| PairView {
                    id: pair.id,
                    top_rect: pair.top_rect(),
                    bottom_rect: pair.bottom_rect(self.tuning.screen_height),
                    passed: pair.is_passed(),
                    power_up: pair.power_up.as_ref().map(|p| PowerUpView {
                        kind: p.kind,
                        pos: p.pos,
                        radius: self.tuning.power_up_radius,
                        taken: p.is_taken(),
                    }),
                })
                .collect(),
            session: SessionView {
                score: self.session.score,
                speed_multiplier: self.session.speed_multiplier,
                shield_active: self.session.shield_active(now),
                slow_motion_active: self.session.slow_motion_active(now),
                shield_ticks_left: self.session.shield_until.saturating_sub(now),
                slow_motion_ticks_left: self.session.slow_motion_until.saturating_sub(now),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);

        // Pause/resume are no-ops outside Running/Paused
        state.pause();
        state.resume();
        assert_eq!(state.phase, GamePhase::Idle);

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        state.start();
        assert_eq!(state.phase, GamePhase::Running);

        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Running);

        state.end(EndCause::Obstacle);
        assert_eq!(state.phase, GamePhase::Ended);

        // Nothing but reset leaves Ended
        state.start();
        state.resume();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Ended);

        state.reset(2);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.seed, 2);
    }

    #[test]
    fn test_end_is_one_shot() {
        let mut state = GameState::new(1);
        state.start();
        state.session.score = 4;
        state.drain_events();

        state.end(EndCause::Obstacle);
        state.end(EndCause::Obstacle);

        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Cue(AudioCue::Crash),
                GameEvent::Coins {
                    amount: 8,
                    reason: CoinReason::CompletionBonus
                },
                GameEvent::SessionEnded {
                    final_score: 4,
                    cause: EndCause::Obstacle
                },
            ]
        );
    }

    #[test]
    fn test_zero_score_end_has_no_bonus() {
        let mut state = GameState::new(1);
        state.start();
        state.drain_events();
        state.end(EndCause::Obstacle);
        assert!(
            !state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::Coins { .. }))
        );
    }

    #[test]
    fn test_lift_only_while_running() {
        let mut state = GameState::new(1);
        state.lift();
        assert_eq!(state.hero.vel_y, 0.0);
        assert!(state.events().is_empty());

        state.start();
        state.drain_events();
        state.lift();
        assert_eq!(state.hero.vel_y, -10.0);
        assert_eq!(state.events(), &[GameEvent::Cue(AudioCue::Flap)]);

        state.hero.vel_y = 0.0;
        state.pause();
        state.lift();
        assert_eq!(state.hero.vel_y, 0.0);
    }

    #[test]
    fn test_speed_multiplier_ramp() {
        let tuning = Tuning::default();
        let mut session = Session::default();
        for _ in 0..9 {
            assert_eq!(session.record_pass(&tuning), None);
        }
        let raised = session.record_pass(&tuning);
        assert_eq!(session.score, 10);
        assert!((session.speed_multiplier - 1.05).abs() < 1e-6);
        assert_eq!(raised, Some(session.speed_multiplier));

        for _ in 0..200 {
            session.record_pass(&tuning);
        }
        assert!(session.speed_multiplier <= 1.25);
        assert!((session.speed_multiplier - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_speed_composition() {
        let tuning = Tuning::default();
        let mut session = Session::default();
        assert!((session.scroll_speed(5, &tuning) - 2.6).abs() < 1e-6);

        session.speed_multiplier = 1.1;
        session.activate(PowerUpKind::SlowMotion, 5, &tuning);
        assert!((session.scroll_speed(5, &tuning) - 2.6 * 0.6 * 1.1).abs() < 1e-5);

        // Expires exactly at the deadline
        let deadline = 5 + tuning.slow_motion_ticks;
        assert!(session.slow_motion_active(deadline - 1));
        assert!(!session.slow_motion_active(deadline));
        assert!((session.scroll_speed(deadline, &tuning) - 2.6 * 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_shield_window() {
        let tuning = Tuning::default();
        let mut session = Session::default();
        assert!(!session.shield_active(0));
        session.activate(PowerUpKind::Shield, 100, &tuning);
        assert_eq!(session.shield_until, 430);
        assert!(session.shield_active(429));
        session.consume_shield();
        assert_eq!(session.shield_until, 0);
        assert!(!session.shield_active(101));
    }

    #[test]
    fn test_effect_window_saturates() {
        // Built directly, bypassing validation
        let tuning = Tuning {
            shield_ticks: u64::MAX,
            slow_motion_ticks: u64::MAX,
            ..Tuning::default()
        };
        let mut session = Session::default();
        session.activate(PowerUpKind::Shield, 100, &tuning);
        session.activate(PowerUpKind::SlowMotion, u64::MAX - 1, &tuning);
        assert_eq!(session.shield_until, u64::MAX);
        assert_eq!(session.slow_motion_until, u64::MAX);
        assert!(session.shield_active(u64::MAX - 1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new(5);
        state.start();
        state.field.spawn(&state.tuning.clone());
        state.session.score = 23;
        state.session.speed_multiplier = 1.1;
        state.session.shield_until = 999;
        state.session.slow_motion_until = 999;
        state.frame = 500;

        state.reset(6);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.session, Session::default());
        assert_eq!(state.frame, 0);
        assert!(state.field.is_empty());
        assert!(state.events().is_empty());
        assert!(!state.shield_active());
        assert!(!state.slow_motion_active());
    }
}
