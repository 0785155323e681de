//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per animation frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies; collaborators are fed
//!   through [`GameEvent`]s and [`Snapshot`]s

pub mod collision;
pub mod events;
pub mod field;
pub mod hero;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Boundary, Rect, boundary_breach, hero_hits_pair, within_reach};
pub use events::{AudioCue, CoinReason, EndCause, GameEvent};
pub use field::{ObstacleField, ObstaclePair, PowerUp, PowerUpKind};
pub use hero::Hero;
pub use input::{Command, InputQueue};
pub use snapshot::{HeroView, PairView, PowerUpView, SessionView, Snapshot};
pub use state::{GamePhase, GameState, Session};
pub use tick::{TickInput, tick};
