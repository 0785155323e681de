//! Player profile: everything that outlives a session

use thiserror::Error;

use super::storage::{Storage, StorageError, keys};
use crate::consts::DEFAULT_NAME;
use crate::highscores::{Leaderboard, clip_name};
use crate::settings::{Body, ColorSlot, Cosmetics, Head, Settings, Trail};
use crate::sim::GameEvent;
use crate::wallet::{ShopError, Unlocks, Wallet};

/// A nickname that cannot be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("nickname can't be empty")]
    Empty,
}

/// A cosmetic change that was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CosmeticError {
    #[error("{0} is locked, buy it in the shop")]
    Locked(Trail),
    #[error("'{0}' is not a hex color")]
    BadColor(String),
}

/// Persistent player data
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Empty until the player picks one
    pub name: String,
    pub best: u64,
    pub wallet: Wallet,
    pub settings: Settings,
    pub cosmetics: Cosmetics,
    pub leaderboard: Leaderboard,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            best: 0,
            wallet: Wallet::default(),
            settings: Settings::default(),
            cosmetics: Cosmetics::default(),
            leaderboard: Leaderboard::new(),
        }
    }
}

/// Parse a stored counter as a number, floored and clamped at zero.
/// Anything unreadable counts as zero.
fn parse_count(raw: Option<String>) -> u64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map_or(0, |n| n.max(0.0).floor() as u64)
}

impl Profile {
    /// Load from storage, falling back field by field to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        let unlocks: Unlocks = storage
            .read_or_none(keys::UNLOCKS)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        let coins = parse_count(storage.read_or_none(keys::COINS)).min(u32::MAX as u64) as u32;

        let settings = storage
            .read_or_none(keys::SETTINGS)
            .map(|json| Settings::from_json(&json))
            .unwrap_or_default();
        let cosmetics = storage
            .read_or_none(keys::COSMETICS)
            .map(|json| Cosmetics::from_json(&json, &unlocks))
            .unwrap_or_default();
        let leaderboard = storage
            .read_or_none(keys::LEADERBOARD)
            .map(|json| Leaderboard::from_json(&json))
            .unwrap_or_default();

        let profile = Self {
            name: storage.read_or_none(keys::NAME).unwrap_or_default(),
            best: parse_count(storage.read_or_none(keys::BEST)),
            wallet: Wallet::new(coins, unlocks),
            settings,
            cosmetics,
            leaderboard,
        };
        log::info!(
            "Loaded profile '{}' (best {}, {} coins)",
            profile.name,
            profile.best,
            profile.wallet.coins()
        );
        profile
    }

    /// Write settings, cosmetics, unlocks and coins
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        storage.set_item(keys::SETTINGS, &self.settings.to_json()?)?;
        storage.set_item(keys::COSMETICS, &self.cosmetics.to_json()?)?;
        storage.set_item(keys::UNLOCKS, &serde_json::to_string(&self.wallet.unlocks)?)?;
        storage.set_item(keys::COINS, &self.wallet.coins().to_string())?;
        Ok(())
    }

    /// Save after a menu change; failures are logged, never surfaced
    fn persist(&self, storage: &mut dyn Storage) {
        if let Err(e) = self.save(storage) {
            log::warn!("Could not save profile: {}", e);
        }
    }

    /// Apply a settings change from the menu and save it
    pub fn update_settings(
        &mut self,
        storage: &mut dyn Storage,
        change: impl FnOnce(&mut Settings),
    ) {
        change(&mut self.settings);
        self.persist(storage);
    }

    pub fn set_body(&mut self, body: Body, storage: &mut dyn Storage) {
        self.cosmetics.body = body;
        self.persist(storage);
    }

    pub fn set_head(&mut self, head: Head, storage: &mut dyn Storage) {
        self.cosmetics.head = head;
        self.persist(storage);
    }

    pub fn set_color(
        &mut self,
        slot: ColorSlot,
        value: &str,
        storage: &mut dyn Storage,
    ) -> Result<(), CosmeticError> {
        if !self.cosmetics.set_color(slot, value) {
            return Err(CosmeticError::BadColor(value.to_string()));
        }
        self.persist(storage);
        Ok(())
    }

    /// Wear an unlocked trail
    pub fn select_trail(
        &mut self,
        trail: Trail,
        storage: &mut dyn Storage,
    ) -> Result<(), CosmeticError> {
        if !self.cosmetics.select_trail(trail, &self.wallet.unlocks) {
            return Err(CosmeticError::Locked(trail));
        }
        self.persist(storage);
        Ok(())
    }

    /// Buy a trail from the shop and save the new balance
    pub fn buy_trail(&mut self, trail: Trail, storage: &mut dyn Storage) -> Result<(), ShopError> {
        self.wallet.buy_trail(trail)?;
        log::info!("Unlocked {} trail, {} coins left", trail, self.wallet.coins());
        self.persist(storage);
        Ok(())
    }

    /// Set the nickname (trimmed, clipped to the length limit)
    pub fn set_name(&mut self, name: &str, storage: &mut dyn Storage) -> Result<(), NameError> {
        let name = clip_name(name.trim());
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if let Err(e) = storage.set_item(keys::NAME, &name) {
            log::warn!("Could not save nickname: {}", e);
        }
        self.name = name;
        Ok(())
    }

    /// Current nickname, assigning the default if none was picked
    pub fn ensure_name(&mut self, storage: &mut dyn Storage) -> &str {
        if self.name.is_empty() {
            // DEFAULT_NAME is non-empty
            let _ = self.set_name(DEFAULT_NAME, storage);
        }
        &self.name
    }

    /// Update best score and leaderboard. Returns the leaderboard rank.
    pub fn record_session_end(&mut self, score: u64, storage: &mut dyn Storage) -> Option<usize> {
        let name = self.ensure_name(storage).to_string();

        if score > self.best {
            self.best = score;
            if let Err(e) = storage.set_item(keys::BEST, &score.to_string()) {
                log::warn!("Could not save best score: {}", e);
            }
            log::info!("New best score: {}", score);
        }

        let rank = self.leaderboard.submit(&name, score);
        match self.leaderboard.to_json() {
            Ok(json) => {
                if let Err(e) = storage.set_item(keys::LEADERBOARD, &json) {
                    log::warn!("Could not save leaderboard: {}", e);
                }
            }
            Err(e) => log::warn!("Could not encode leaderboard: {}", e),
        }
        rank
    }

    /// Apply a simulation event. Storage failures are logged and dropped so
    /// they never reach the game loop.
    pub fn handle_event(&mut self, event: &GameEvent, storage: &mut dyn Storage) {
        match event {
            GameEvent::Coins { amount, .. } => {
                self.wallet.deposit(*amount);
                if let Err(e) = self.save(storage) {
                    log::warn!("Could not save wallet: {}", e);
                }
            }
            GameEvent::SessionEnded { final_score, .. } => {
                self.record_session_end(*final_score, storage);
            }
            _ => {}
        }
    }
}
