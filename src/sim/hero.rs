//! Hero kinematics
//!
//! Vertical motion under constant gravity with an impulse that overrides
//! velocity. Bounds are not enforced here; the tick loop detects excursions
//! and ends the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// The player-controlled hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Top-left corner; `x` never changes during a session
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
}

impl Hero {
    /// Hero at its spawn point, vertically centred and at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.hero_x, tuning.screen_height * 0.5),
            size: Vec2::new(tuning.hero_width, tuning.hero_height),
            vel_y: 0.0,
        }
    }

    /// Integrate one tick: gravity into velocity, then velocity into position
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
    }

    /// Replace the vertical velocity with the lift impulse
    pub fn apply_lift(&mut self, lift: f32) {
        self.vel_y = lift;
    }

    /// Clamp into `[0, screen_height - h]`. Only used on the terminal tick so
    /// the final frame renders the hero on the boundary it crossed.
    pub fn pin_inside(&mut self, screen_height: f32) {
        self.pos.y = self.pos.y.clamp(0.0, screen_height - self.size.y);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_from_rest() {
        let tuning = Tuning::default();
        let mut hero = Hero::new(&tuning);
        let start_y = hero.pos.y;
        assert_eq!(start_y, 300.0);

        hero.apply_gravity(0.55);
        assert!((hero.vel_y - 0.55).abs() < 1e-6);
        assert!((hero.pos.y - (start_y + 0.55)).abs() < 1e-4);

        // Velocity accumulates
        hero.apply_gravity(0.55);
        assert!((hero.vel_y - 1.1).abs() < 1e-6);
        assert!((hero.pos.y - (start_y + 1.65)).abs() < 1e-4);
    }

    #[test]
    fn test_lift_overrides_velocity() {
        let tuning = Tuning::default();
        let mut hero = Hero::new(&tuning);
        hero.vel_y = 7.0;
        hero.apply_lift(tuning.lift);
        assert_eq!(hero.vel_y, -10.0);

        // A second lift does not stack
        hero.apply_lift(tuning.lift);
        assert_eq!(hero.vel_y, -10.0);
    }

    #[test]
    fn test_pin_inside() {
        let tuning = Tuning::default();
        let mut hero = Hero::new(&tuning);
        hero.pos.y = 590.0;
        hero.pin_inside(tuning.screen_height);
        assert_eq!(hero.pos.y, 566.0);

        hero.pos.y = -4.0;
        hero.pin_inside(tuning.screen_height);
        assert_eq!(hero.pos.y, 0.0);
    }

    #[test]
    fn test_center() {
        let tuning = Tuning::default();
        let hero = Hero::new(&tuning);
        assert_eq!(hero.center(), Vec2::new(97.0, 317.0));
    }
}
