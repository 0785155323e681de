//! Hit testing for the hero
//!
//! Everything is axis-aligned: the hero is a box, each obstacle pair is two
//! boxes stacked around a vertical gap, and power-ups are discs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap of the horizontal extents (touching edges do not count)
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// Which screen edge the hero crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Floor,
    Ceiling,
}

/// Check the hero against the screen bounds. The floor is tested first.
pub fn boundary_breach(hero: &Rect, screen_height: f32) -> Option<Boundary> {
    if hero.bottom() > screen_height {
        Some(Boundary::Floor)
    } else if hero.top() < 0.0 {
        Some(Boundary::Ceiling)
    } else {
        None
    }
}

/// Check the hero against an obstacle pair occupying `[left, right)` with an
/// open gap spanning `gap_top..gap_bottom`
pub fn hero_hits_pair(hero: &Rect, left: f32, right: f32, gap_top: f32, gap_bottom: f32) -> bool {
    if !hero.overlaps_x(left, right) {
        return false;
    }
    hero.top() < gap_top || hero.bottom() > gap_bottom
}

/// True when two centres are strictly closer than `radius`
pub fn within_reach(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_breach() {
        let h = 600.0;
        assert_eq!(boundary_breach(&Rect::new(80.0, 300.0, 34.0, 34.0), h), None);
        // Exactly touching the floor is still inside
        assert_eq!(boundary_breach(&Rect::new(80.0, 566.0, 34.0, 34.0), h), None);
        assert_eq!(
            boundary_breach(&Rect::new(80.0, 566.5, 34.0, 34.0), h),
            Some(Boundary::Floor)
        );
        assert_eq!(boundary_breach(&Rect::new(80.0, 0.0, 34.0, 34.0), h), None);
        assert_eq!(
            boundary_breach(&Rect::new(80.0, -0.1, 34.0, 34.0), h),
            Some(Boundary::Ceiling)
        );
    }

    #[test]
    fn test_hero_above_gap_is_hit() {
        // Gap 200..370; hero spans 100..134 and is inside the pair's columns
        let hero = Rect::new(80.0, 100.0, 34.0, 34.0);
        assert!(hero_hits_pair(&hero, 70.0, 134.0, 200.0, 370.0));
    }

    #[test]
    fn test_hero_inside_gap_is_clear() {
        let hero = Rect::new(80.0, 250.0, 34.0, 34.0);
        assert!(!hero_hits_pair(&hero, 70.0, 134.0, 200.0, 370.0));

        // Flush with both gap edges is still clear
        let hero = Rect::new(80.0, 200.0, 34.0, 170.0);
        assert!(!hero_hits_pair(&hero, 70.0, 134.0, 200.0, 370.0));
    }

    #[test]
    fn test_hero_below_gap_is_hit() {
        let hero = Rect::new(80.0, 340.0, 34.0, 34.0);
        assert!(hero_hits_pair(&hero, 70.0, 134.0, 200.0, 370.0));
    }

    #[test]
    fn test_no_horizontal_overlap_means_no_hit() {
        let hero = Rect::new(80.0, 0.0, 34.0, 34.0);
        // Pair entirely to the right, touching edge
        assert!(!hero_hits_pair(&hero, 114.0, 178.0, 200.0, 370.0));
        // Pair entirely to the left, touching edge
        assert!(!hero_hits_pair(&hero, 16.0, 80.0, 200.0, 370.0));
    }

    #[test]
    fn test_within_reach() {
        assert!(within_reach(Vec2::ZERO, Vec2::new(29.9, 0.0), 30.0));
        assert!(!within_reach(Vec2::ZERO, Vec2::new(30.0, 0.0), 30.0));
        assert!(within_reach(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0), 15.0));
    }
}
