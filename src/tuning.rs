//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! shipped game; a JSON override may replace any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::ms_to_ticks;

/// Longest timed effect a power-up may grant: one hour of play
pub const MAX_EFFECT_TICKS: u64 = ms_to_ticks(60 * 60 * 1000);

/// A tuning value outside its accepted range
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(String),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("spawn interval must be at least one frame")]
    ZeroSpawnInterval,
    #[error("score step for speed-ups must be at least 1")]
    ZeroSpeedUpEvery,
    #[error("gap of {gap} with margin {margin} does not fit a screen {height} tall")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
    #[error("hero of height {hero} does not fit a screen {height} tall")]
    HeroDoesNotFit { hero: f32, height: f32 },
    #[error("power-up chance must be within 0..=1 (got {0})")]
    ChanceOutOfRange(f32),
    #[error("{field} of {ticks} frames is longer than an hour")]
    DurationTooLong { field: &'static str, ticks: u64 },
    #[error("slow-motion factor must be within (0, 1] (got {0})")]
    SlowFactorOutOfRange(f32),
    #[error("speed multiplier cap must be at least 1.0 (got {0})")]
    CapBelowOne(f32),
}

/// Gameplay balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Hero ===
    pub hero_x: f32,
    pub hero_width: f32,
    pub hero_height: f32,
    /// Added to vertical velocity every running tick
    pub gravity: f32,
    /// Velocity set (not added) by a lift impulse
    pub lift: f32,

    // === Obstacles ===
    pub base_speed: f32,
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub spawn_interval: u64,
    /// Keep-out distance between the gap and the screen edges
    pub spawn_margin: f32,
    /// Pairs are pruned once their right edge is this far past the left edge
    pub prune_margin: f32,
    /// Horizontal offset past the right edge where pairs appear
    pub spawn_offset: f32,

    // === Power-ups ===
    pub power_up_chance: f32,
    pub power_up_radius: f32,
    /// Extra reach added to the power-up radius for pickup
    pub pickup_margin: f32,
    pub shield_ticks: u64,
    pub slow_motion_ticks: u64,
    pub slow_motion_factor: f32,

    // === Difficulty ===
    pub speed_up_every: u64,
    pub speed_step: f32,
    pub speed_cap: f32,

    // === Economy ===
    pub pass_coins: u32,
    pub pickup_coins: u32,
    pub completion_coins_per_point: u32,
    pub completion_coins_cap: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            hero_x: 80.0,
            hero_width: 34.0,
            hero_height: 34.0,
            gravity: 0.55,
            lift: -10.0,

            base_speed: 2.6,
            obstacle_width: 64.0,
            gap_size: 170.0,
            spawn_interval: 90,
            spawn_margin: 70.0,
            prune_margin: 60.0,
            spawn_offset: 10.0,

            power_up_chance: 0.22,
            power_up_radius: 18.0,
            pickup_margin: 12.0,
            shield_ticks: ms_to_ticks(5500),
            slow_motion_ticks: ms_to_ticks(4500),
            slow_motion_factor: 0.6,

            speed_up_every: 10,
            speed_step: 0.05,
            speed_cap: 1.25,

            pass_coins: 1,
            pickup_coins: 5,
            completion_coins_per_point: 2,
            completion_coins_cap: 60,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("hero_width", self.hero_width),
            ("hero_height", self.hero_height),
            ("base_speed", self.base_speed),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("power_up_radius", self.power_up_radius),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.spawn_interval == 0 {
            return Err(TuningError::ZeroSpawnInterval);
        }
        if self.speed_up_every == 0 {
            return Err(TuningError::ZeroSpeedUpEvery);
        }
        if self.hero_height >= self.screen_height {
            return Err(TuningError::HeroDoesNotFit {
                hero: self.hero_height,
                height: self.screen_height,
            });
        }
        // The gap top range [margin, height - margin - gap] must be non-empty
        if self.spawn_margin < 0.0
            || self.screen_height - 2.0 * self.spawn_margin - self.gap_size <= 0.0
        {
            return Err(TuningError::GapDoesNotFit {
                gap: self.gap_size,
                margin: self.spawn_margin,
                height: self.screen_height,
            });
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(TuningError::ChanceOutOfRange(self.power_up_chance));
        }
        for (field, ticks) in [
            ("shield_ticks", self.shield_ticks),
            ("slow_motion_ticks", self.slow_motion_ticks),
        ] {
            if ticks > MAX_EFFECT_TICKS {
                return Err(TuningError::DurationTooLong { field, ticks });
            }
        }
        if !(self.slow_motion_factor > 0.0 && self.slow_motion_factor <= 1.0) {
            return Err(TuningError::SlowFactorOutOfRange(self.slow_motion_factor));
        }
        if !(self.speed_cap >= 1.0) {
            return Err(TuningError::CapBelowOne(self.speed_cap));
        }
        Ok(())
    }

    /// Radius within which the hero collects a power-up
    pub fn pickup_radius(&self) -> f32 {
        self.power_up_radius + self.pickup_margin
    }

    /// Coins granted when a session ends with `score`
    pub fn completion_bonus(&self, score: u64) -> u32 {
        let earned = score.saturating_mul(self.completion_coins_per_point as u64);
        earned.min(self.completion_coins_cap as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.shield_ticks, 330);
        assert_eq!(tuning.slow_motion_ticks, 270);
        assert!((tuning.pickup_radius() - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.4, "spawn_interval": 120 }"#).unwrap();
        assert!((tuning.gravity - 0.4).abs() < f32::EPSILON);
        assert_eq!(tuning.spawn_interval, 120);
        assert_eq!(tuning.gap_size, 170.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            Tuning::from_json(r#"{ "spawn_interval": 0 }"#),
            Err(TuningError::ZeroSpawnInterval)
        );
        assert!(matches!(
            Tuning::from_json(r#"{ "gap_size": 500 }"#),
            Err(TuningError::GapDoesNotFit { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "speed_cap": 0.9 }"#),
            Err(TuningError::CapBelowOne(_))
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_endless_effects() {
        assert_eq!(
            Tuning::from_json(r#"{ "shield_ticks": 18446744073709551615 }"#),
            Err(TuningError::DurationTooLong {
                field: "shield_ticks",
                ticks: u64::MAX,
            })
        );
        assert!(matches!(
            Tuning::from_json(r#"{ "slow_motion_ticks": 216001 }"#),
            Err(TuningError::DurationTooLong { field: "slow_motion_ticks", .. })
        ));
        assert!(Tuning::from_json(r#"{ "shield_ticks": 216000 }"#).is_ok());
    }

    #[test]
    fn test_completion_bonus_is_capped() {
        let tuning = Tuning::default();
        assert_eq!(tuning.completion_bonus(0), 0);
        assert_eq!(tuning.completion_bonus(7), 14);
        assert_eq!(tuning.completion_bonus(30), 60);
        assert_eq!(tuning.completion_bonus(1000), 60);
    }
}
