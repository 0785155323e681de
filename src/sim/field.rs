//! Obstacle field and power-ups
//!
//! Obstacle pairs appear off-screen right, scroll left, and are pruned once
//! they have fully left the screen. A pair may carry one power-up sitting in
//! the middle of its gap.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Forgives one obstacle hit while active
    Shield,
    /// Scales scroll speed down while active
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::SlowMotion];
}

/// A collectible riding inside an obstacle gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Disc centre
    pub pos: Vec2,
    /// Write-once; a taken power-up never fires again
    taken: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            taken: false,
        }
    }

    pub fn is_taken(&self) -> bool {
        self.taken
    }

    /// Mark as collected. Returns true only for the first call.
    pub fn take(&mut self) -> bool {
        !std::mem::replace(&mut self.taken, true)
    }

    /// Follow the parent pair horizontally
    pub fn track(&mut self, center_x: f32) {
        self.pos.x = center_x;
    }
}

/// A top/bottom obstacle pair with a vertical gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Distance from the screen top to the start of the gap
    pub top: f32,
    pub gap_size: f32,
    /// Write-once; set when the pair scrolls past the hero
    passed: bool,
    pub power_up: Option<PowerUp>,
}

impl ObstaclePair {
    pub fn new(id: u32, x: f32, width: f32, top: f32, gap_size: f32) -> Self {
        Self {
            id,
            x,
            width,
            top,
            gap_size,
            passed: false,
            power_up: None,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn gap_bottom(&self) -> f32 {
        self.top + self.gap_size
    }

    pub fn gap_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.top + self.gap_size / 2.0)
    }

    /// Upper block, from the screen top down to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top)
    }

    /// Lower block, from the gap down to the screen bottom
    pub fn bottom_rect(&self, screen_height: f32) -> Rect {
        let gap_bottom = self.gap_bottom();
        Rect::new(self.x, gap_bottom, self.width, (screen_height - gap_bottom).max(0.0))
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Mark as passed. Returns true only for the first call.
    pub fn mark_passed(&mut self) -> bool {
        !std::mem::replace(&mut self.passed, true)
    }

    /// Scroll left by `speed`, dragging any uncollected power-up along
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
        let center_x = self.x + self.width / 2.0;
        if let Some(power_up) = self.power_up.as_mut().filter(|p| !p.is_taken()) {
            power_up.track(center_x);
        }
    }
}

/// All live obstacle pairs, in spawn order
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pairs: Vec<ObstaclePair>,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleField {
    /// Empty field whose spawns are driven by `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            pairs: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Spawn a pair just past the right edge. The gap top is drawn uniformly
    /// from `[margin, screen_height - margin - gap)` and floored; a power-up of
    /// a uniformly chosen kind is attached with probability `power_up_chance`.
    pub fn spawn(&mut self, tuning: &Tuning) -> &ObstaclePair {
        let top_min = tuning.spawn_margin;
        let top_max = tuning.screen_height - tuning.spawn_margin - tuning.gap_size;
        let roll: f32 = self.rng.random();
        let top = (top_min + roll * (top_max - top_min)).floor();

        let id = self.next_id;
        self.next_id += 1;

        let x = tuning.screen_width + tuning.spawn_offset;
        let mut pair = ObstaclePair::new(id, x, tuning.obstacle_width, top, tuning.gap_size);

        if self.rng.random::<f32>() < tuning.power_up_chance {
            let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
            pair.power_up = Some(PowerUp::new(kind, pair.gap_center()));
            log::debug!("Pair {} spawned with {:?}", id, kind);
        }

        self.pairs.push(pair);
        &self.pairs[self.pairs.len() - 1]
    }

    /// Scroll every pair left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for pair in &mut self.pairs {
            pair.advance(speed);
        }
    }

    /// Drop pairs whose right edge is at or beyond `-margin`
    pub fn prune(&mut self, margin: f32) {
        self.pairs.retain(|p| p.right() > -margin);
    }

    /// Insert a hand-built pair (tests and scripted scenarios)
    pub fn push(&mut self, mut pair: ObstaclePair) {
        pair.id = self.next_id;
        self.next_id += 1;
        self.pairs.push(pair);
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn pairs_mut(&mut self) -> &mut [ObstaclePair] {
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_gap_within_margins() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::new(7);
        for _ in 0..500 {
            let pair = field.spawn(&tuning);
            assert!(pair.top >= 70.0);
            assert!(pair.top < 360.0);
            assert_eq!(pair.top, pair.top.floor());
            assert_eq!(pair.x, 410.0);
            assert!(!pair.is_passed());
        }
        assert_eq!(field.len(), 500);
    }

    #[test]
    fn test_power_up_sits_in_gap_center() {
        let tuning = Tuning::default();
        let mut field = ObstacleField::new(11);
        let mut seen = 0;
        for _ in 0..200 {
            let pair = field.spawn(&tuning).clone();
            if let Some(power_up) = &pair.power_up {
                seen += 1;
                assert_eq!(power_up.pos, pair.gap_center());
                assert!(!power_up.is_taken());
            }
        }
        // 22% chance over 200 spawns
        assert!(seen > 10 && seen < 90, "unexpected power-up count {seen}");
    }

    #[test]
    fn test_power_up_chance_extremes() {
        let mut tuning = Tuning::default();
        tuning.power_up_chance = 0.0;
        let mut field = ObstacleField::new(3);
        for _ in 0..50 {
            assert!(field.spawn(&tuning).power_up.is_none());
        }

        tuning.power_up_chance = 1.0;
        for _ in 0..50 {
            assert!(field.spawn(&tuning).power_up.is_some());
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let tuning = Tuning::default();
        let mut a = ObstacleField::new(42);
        let mut b = ObstacleField::new(42);
        for _ in 0..20 {
            a.spawn(&tuning);
            b.spawn(&tuning);
        }
        assert_eq!(a.pairs(), b.pairs());
    }

    #[test]
    fn test_advance_moves_pairs_and_power_ups() {
        let mut field = ObstacleField::new(1);
        let mut pair = ObstaclePair::new(0, 200.0, 64.0, 150.0, 170.0);
        pair.power_up = Some(PowerUp::new(PowerUpKind::Shield, pair.gap_center()));
        field.push(pair);

        field.advance(2.6);
        let pair = &field.pairs()[0];
        assert!((pair.x - 197.4).abs() < 1e-4);
        let power_up = pair.power_up.as_ref().unwrap();
        assert!((power_up.pos.x - 229.4).abs() < 1e-4);
        assert_eq!(power_up.pos.y, 235.0);
    }

    #[test]
    fn test_taken_power_up_stops_tracking() {
        let mut pair = ObstaclePair::new(1, 200.0, 64.0, 150.0, 170.0);
        pair.power_up = Some(PowerUp::new(PowerUpKind::SlowMotion, pair.gap_center()));
        assert!(pair.power_up.as_mut().unwrap().take());
        pair.advance(10.0);
        assert_eq!(pair.power_up.as_ref().unwrap().pos.x, 232.0);
    }

    #[test]
    fn test_prune_only_fully_offscreen() {
        let mut field = ObstacleField::new(1);
        field.push(ObstaclePair::new(0, -123.0, 64.0, 100.0, 170.0)); // right = -59
        field.push(ObstaclePair::new(0, -124.0, 64.0, 100.0, 170.0)); // right = -60
        field.push(ObstaclePair::new(0, -200.0, 64.0, 100.0, 170.0));
        field.prune(60.0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.pairs()[0].x, -123.0);
    }

    #[test]
    fn test_write_once_flags() {
        let mut pair = ObstaclePair::new(1, 0.0, 64.0, 100.0, 170.0);
        assert!(pair.mark_passed());
        assert!(!pair.mark_passed());
        assert!(pair.is_passed());

        let mut power_up = PowerUp::new(PowerUpKind::Shield, Vec2::ZERO);
        assert!(power_up.take());
        assert!(!power_up.take());
        assert!(power_up.is_taken());
    }

    #[test]
    fn test_block_rects() {
        let pair = ObstaclePair::new(1, 50.0, 64.0, 200.0, 170.0);
        assert_eq!(pair.top_rect(), Rect::new(50.0, 0.0, 64.0, 200.0));
        assert_eq!(pair.bottom_rect(600.0), Rect::new(50.0, 370.0, 64.0, 230.0));
    }
}
