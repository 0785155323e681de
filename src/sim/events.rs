//! Events emitted by the simulation for outside collaborators
//!
//! The core never touches storage, audio or the wallet directly. It pushes
//! events onto the game state and the host drains them once per frame.

use serde::{Deserialize, Serialize};

use super::collision::Boundary;
use super::field::PowerUpKind;

/// Discrete sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    Flap,
    Score,
    Power,
    Crash,
}

/// Why coins were granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoinReason {
    Pass,
    Pickup,
    CompletionBonus,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Boundary(Boundary),
    Obstacle,
}

/// A gameplay event for collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Cue(AudioCue),
    Coins { amount: u32, reason: CoinReason },
    PowerUpCollected(PowerUpKind),
    ShieldAbsorbedHit,
    Passed { score: u64 },
    SpeedUp { multiplier: f32 },
    SessionEnded { final_score: u64, cause: EndCause },
}
