//! Read-only per-frame views for rendering and the HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::field::PowerUpKind;
use super::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub rect: Rect,
    pub vel_y: f32,
    pub shielded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairView {
    pub id: u32,
    pub top_rect: Rect,
    pub bottom_rect: Rect,
    pub passed: bool,
    pub power_up: Option<PowerUpView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub score: u64,
    pub speed_multiplier: f32,
    pub shield_active: bool,
    pub slow_motion_active: bool,
    pub shield_ticks_left: u64,
    pub slow_motion_ticks_left: u64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub frame: u64,
    pub screen_width: f32,
    pub screen_height: f32,
    pub hero: HeroView,
    pub pairs: Vec<PairView>,
    pub session: SessionView,
}
