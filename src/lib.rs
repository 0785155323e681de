//! Sky Hero Dash - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hero, obstacles, power-ups, scoring)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Snapshot to vertex conversion
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Storage backends and the player profile
//! - `highscores`, `wallet`, `settings`, `audio`: collaborators fed by sim events

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod wallet;

pub use highscores::Leaderboard;
pub use persistence::Profile;
pub use settings::{Cosmetics, Settings};
pub use tuning::Tuning;
pub use wallet::Wallet;

/// Game configuration constants
pub mod consts {
    /// Simulation rate; one tick per animation frame
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Maximum nickname length (characters)
    pub const MAX_NAME_LEN: usize = 16;
    /// Nickname used when the player never picks one
    pub const DEFAULT_NAME: &str = "Player";
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub const fn ms_to_ticks(ms: u32) -> u64 {
    (ms as u64 * consts::TICKS_PER_SECOND as u64) / 1000
}
