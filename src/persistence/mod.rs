//! Local persistence
//!
//! Features:
//! - Key/value [`Storage`] abstraction (LocalStorage on web, in-memory elsewhere)
//! - Lenient loading: corrupt or missing values fall back to defaults
//! - [`Profile`]: everything that survives a session (nickname, best score,
//!   wallet, settings, cosmetics, leaderboard), fed by simulation events

pub mod profile;
pub mod storage;

pub use profile::{CosmeticError, NameError, Profile};
pub use storage::{MemoryStorage, Storage, StorageError, keys};
