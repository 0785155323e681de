//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input mapping (pointer, keyboard, buttons) to simulation commands
//! - The per-frame host loop feeding events to the profile
//! - Storage (LocalStorage on web, in-memory natively)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::persistence::{Profile, Storage};
use crate::sim::{Command, GameEvent, GamePhase, GameState, InputQueue, TickInput, tick};
use crate::tuning::Tuning;

/// What a tap or Space press means in the current phase
pub fn primary_action(phase: GamePhase, next_seed: u64) -> Command {
    match phase {
        GamePhase::Idle => Command::Start,
        GamePhase::Ended => Command::Reset { seed: next_seed },
        GamePhase::Running | GamePhase::Paused => Command::Lift,
    }
}

/// Keyboard binding, keyed on `KeyboardEvent.code`
pub fn key_command(code: &str, phase: GamePhase, next_seed: u64) -> Option<Command> {
    match code {
        "Space" => Some(primary_action(phase, next_seed)),
        "KeyP" | "Escape" => Some(Command::TogglePause),
        "KeyR" => Some(Command::Reset { seed: next_seed }),
        "Enter" if phase == GamePhase::Idle => Some(Command::Start),
        _ => None,
    }
}

/// Owns a session plus its collaborators and runs one tick per frame
pub struct GameHost<S: Storage> {
    pub state: GameState,
    pub input: InputQueue,
    pub profile: Profile,
    pub storage: S,
}

impl<S: Storage> GameHost<S> {
    /// Load the profile from `storage` and set up an Idle session
    pub fn new(seed: u64, tuning: Tuning, storage: S) -> Self {
        let profile = Profile::load(&storage);
        Self {
            state: GameState::with_tuning(seed, tuning),
            input: InputQueue::new(),
            profile,
            storage,
        }
    }

    pub fn push(&mut self, command: Command) {
        self.input.push(command);
    }

    /// Run one frame: drain input, tick, hand events to the profile.
    /// Returns the events so the caller can route audio cues.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input: TickInput = self.input.take_input();
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for event in &events {
            self.profile.handle_event(event, &mut self.storage);
        }
        events
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStorage, keys};
    use crate::sim::EndCause;

    #[test]
    fn test_primary_action() {
        assert_eq!(primary_action(GamePhase::Running, 7), Command::Lift);
        assert_eq!(primary_action(GamePhase::Idle, 7), Command::Start);
        assert_eq!(primary_action(GamePhase::Paused, 7), Command::Lift);
        assert_eq!(
            primary_action(GamePhase::Ended, 7),
            Command::Reset { seed: 7 }
        );
    }

    #[test]
    fn test_first_tap_starts_the_run() {
        let mut host = GameHost::new(9, Tuning::default(), MemoryStorage::new());
        host.push(primary_action(host.phase(), 10));
        host.frame();
        assert_eq!(host.phase(), GamePhase::Running);

        // The next tap flies
        let before = host.state.hero.vel_y;
        host.push(primary_action(host.phase(), 10));
        host.frame();
        assert!(host.state.hero.vel_y < before);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            key_command("Space", GamePhase::Running, 1),
            Some(Command::Lift)
        );
        assert_eq!(
            key_command("KeyP", GamePhase::Running, 1),
            Some(Command::TogglePause)
        );
        assert_eq!(
            key_command("Enter", GamePhase::Idle, 1),
            Some(Command::Start)
        );
        assert_eq!(key_command("Enter", GamePhase::Running, 1), None);
        assert_eq!(key_command("KeyX", GamePhase::Running, 1), None);
    }

    #[test]
    fn test_session_end_reaches_storage() {
        let tuning = Tuning {
            gravity: 50.0,
            ..Tuning::default()
        };
        let mut host = GameHost::new(3, tuning, MemoryStorage::new());
        host.push(Command::Start);

        let mut ended = None;
        for _ in 0..60 {
            for event in host.frame() {
                if let GameEvent::SessionEnded { final_score, cause } = event {
                    ended = Some((final_score, cause));
                }
            }
        }

        assert!(matches!(
            ended,
            Some((0, EndCause::Boundary(crate::sim::Boundary::Floor)))
        ));
        assert_eq!(host.phase(), GamePhase::Ended);
        assert_eq!(host.profile.name, "Player");
        assert_eq!(host.profile.leaderboard.top_score(), Some(0));
        assert!(host.storage.get_item(keys::LEADERBOARD).unwrap().is_some());

        // Tap after the end resets
        host.push(primary_action(host.phase(), 4));
        host.frame();
        assert_eq!(host.phase(), GamePhase::Idle);
        assert_eq!(host.state.seed, 4);
    }

    #[test]
    fn test_profile_loaded_from_storage() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::COINS, "42").unwrap();
        storage.set_item(keys::NAME, "zed").unwrap();
        let host = GameHost::new(1, Tuning::default(), storage);
        assert_eq!(host.profile.wallet.coins(), 42);
        assert_eq!(host.profile.name, "zed");
    }
}
