//! Coin wallet and the cosmetics shop
//!
//! Coins arrive as [`GameEvent::Coins`](crate::sim::GameEvent) from the
//! simulation; the wallet is the only place the balance changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Trail;

/// Why a purchase was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("{item} is already unlocked")]
    AlreadyUnlocked { item: Trail },
    #[error("{item} costs {price} coins, you have {balance}")]
    InsufficientCoins { item: Trail, price: u32, balance: u32 },
    #[error("{item} is not for sale")]
    NotForSale { item: Trail },
}

/// Purchased cosmetics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unlocks {
    pub spark: bool,
    pub neon: bool,
}

impl Unlocks {
    pub fn has_trail(&self, trail: Trail) -> bool {
        match trail {
            Trail::None => true,
            Trail::Spark => self.spark,
            Trail::Neon => self.neon,
        }
    }

    fn unlock(&mut self, trail: Trail) {
        match trail {
            Trail::None => {}
            Trail::Spark => self.spark = true,
            Trail::Neon => self.neon = true,
        }
    }
}

/// Shop price for a trail
pub fn trail_price(trail: Trail) -> Option<u32> {
    match trail {
        Trail::None => None,
        Trail::Spark => Some(50),
        Trail::Neon => Some(120),
    }
}

/// Coin balance plus unlocked items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    coins: u32,
    pub unlocks: Unlocks,
}

impl Wallet {
    pub fn new(coins: u32, unlocks: Unlocks) -> Self {
        Self { coins, unlocks }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn deposit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Buy a trail, deducting its price
    pub fn buy_trail(&mut self, trail: Trail) -> Result<(), ShopError> {
        let price = trail_price(trail).ok_or(ShopError::NotForSale { item: trail })?;
        if self.unlocks.has_trail(trail) {
            return Err(ShopError::AlreadyUnlocked { item: trail });
        }
        if self.coins < price {
            return Err(ShopError::InsufficientCoins {
                item: trail,
                price,
                balance: self.coins,
            });
        }
        self.coins -= price;
        self.unlocks.unlock(trail);
        log::info!("Unlocked {} for {} coins", trail, price);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_trail() {
        let mut wallet = Wallet::new(60, Unlocks::default());
        assert_eq!(
            wallet.buy_trail(Trail::Neon),
            Err(ShopError::InsufficientCoins {
                item: Trail::Neon,
                price: 120,
                balance: 60
            })
        );
        assert_eq!(wallet.buy_trail(Trail::Spark), Ok(()));
        assert_eq!(wallet.coins(), 10);
        assert!(wallet.unlocks.spark);
        assert_eq!(
            wallet.buy_trail(Trail::Spark),
            Err(ShopError::AlreadyUnlocked { item: Trail::Spark })
        );
        assert_eq!(
            wallet.buy_trail(Trail::None),
            Err(ShopError::NotForSale { item: Trail::None })
        );
    }

    #[test]
    fn test_deposit_saturates() {
        let mut wallet = Wallet::new(u32::MAX - 1, Unlocks::default());
        wallet.deposit(5);
        assert_eq!(wallet.coins(), u32::MAX);
    }

    #[test]
    fn test_error_messages() {
        let err = ShopError::InsufficientCoins {
            item: Trail::Neon,
            price: 120,
            balance: 3,
        };
        assert_eq!(err.to_string(), "neon costs 120 coins, you have 3");
    }
}
