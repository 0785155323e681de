//! Hero sprite: trail, suit, cape, body and head variants, mask
//!
//! The art is laid out on a 34x34 grid and stretched over the hitbox, so a
//! tuning with a different hero size still gets a recognizable hero.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, hex_color};
use crate::settings::{Body, Cosmetics, Head, Trail};
use crate::sim::{HeroView, Rect};

const GRID: f32 = 34.0;
const SEGMENTS: u32 = 12;
/// Cape outline thickness
const CAPE: f32 = 3.0;

/// Maps grid coordinates onto the hero rect
struct Grid {
    origin: Vec2,
    scale: Vec2,
}

impl Grid {
    fn new(r: &Rect) -> Self {
        Self {
            origin: Vec2::new(r.x, r.y),
            scale: Vec2::new(r.w, r.h) / GRID,
        }
    }

    fn point(&self, x: f32, y: f32) -> Vec2 {
        self.origin + Vec2::new(x, y) * self.scale
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let p = self.point(x, y);
        Rect::new(p.x, p.y, w * self.scale.x, h * self.scale.y)
    }

    fn radius(&self, r: f32) -> f32 {
        r * self.scale.min_element()
    }

    fn circle(&self, x: f32, y: f32, r: f32, color: [f32; 4]) -> Vec<Vertex> {
        shapes::circle(self.point(x, y), self.radius(r), color, SEGMENTS)
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Particles streaming behind the hero; they wobble with `frame`
pub fn trail(hero: &Rect, trail: Trail, frame: u64) -> Vec<Vertex> {
    let g = Grid::new(hero);
    let (x, y) = (-6.0, 18.0);
    let f = (frame % 10_000) as f32;
    let mut out = Vec::new();
    match trail {
        Trail::None => {}
        Trail::Spark => {
            for i in 0..4 {
                let i = i as f32;
                let color = with_alpha(colors::SPARK, (0.25 + i * 0.12) * 0.65);
                let wobble = ((f + i) * 0.6).sin() * 3.0;
                out.extend(g.circle(x - i * 10.0, y + wobble, 4.0 - i * 0.7, color));
            }
        }
        Trail::Neon => {
            for i in 0..5 {
                let i = i as f32;
                let color = with_alpha(colors::NEON, (0.25 + i * 0.1) * 0.55);
                let wobble = ((f + i) * 0.7).sin() * 3.0;
                let thickness = 3.0 - i * 0.4;
                let streak = g.rect(x - i * 10.0 - 8.0, y + wobble, 8.0, thickness);
                out.extend(shapes::rect(&streak, color));
            }
        }
    }
    out
}

/// The hero, back to front. Invalid colors fall back (suit) or are skipped.
pub fn hero(view: &HeroView, cosmetics: &Cosmetics, frame: u64) -> Vec<Vertex> {
    let r = &view.rect;
    let g = Grid::new(r);
    let mut out = trail(r, cosmetics.trail, frame);

    let suit = hex_color(&cosmetics.suit).unwrap_or(colors::HERO_FALLBACK);
    out.extend(shapes::rect(r, suit));
    if let Some(cape) = hex_color(&cosmetics.cape) {
        out.extend(shapes::rect_outline(r, CAPE, cape));
    }

    match cosmetics.body {
        Body::Classic => {}
        Body::Armored => {
            for y in [12.0, 18.0, 24.0] {
                out.extend(shapes::rect(&g.rect(2.0, y, 30.0, 4.0), colors::ARMOR_PLATE));
            }
        }
        Body::Speed => {
            out.extend(shapes::rect(&g.rect(6.0, 12.0, 4.0, 20.0), colors::SPEED_STRIPE));
            out.extend(shapes::rect(&g.rect(16.0, 12.0, 3.0, 20.0), colors::SPEED_STRIPE));
        }
    }
    out.extend(shapes::rect(&g.rect(6.0, 26.0, 22.0, 4.0), colors::BELT));

    let mask_rect = match cosmetics.head {
        Head::Classic => {
            out.extend(g.circle(17.0, 6.0, 10.0, colors::SKIN));
            g.rect(7.0, 2.0, 20.0, 6.0)
        }
        Head::Helmet => {
            out.extend(shapes::rect(&g.rect(6.0, -4.0, 22.0, 14.0), colors::HELMET));
            g.rect(7.0, 4.0, 20.0, 6.0)
        }
        Head::Hood => {
            out.extend(g.circle(17.0, 7.0, 12.0, colors::HOOD));
            out.extend(g.circle(17.0, 8.0, 8.0, colors::SKIN));
            g.rect(9.0, 6.0, 16.0, 5.0)
        }
    };
    if let Some(mask) = hex_color(&cosmetics.mask) {
        out.extend(shapes::rect(&mask_rect, mask));
    }

    // Eyes and emblem
    out.extend(shapes::rect(&g.rect(10.0, 6.0, 6.0, 2.0), colors::WHITE));
    out.extend(shapes::rect(&g.rect(19.0, 6.0, 6.0, 2.0), colors::WHITE));
    out.extend(g.circle(17.0, 20.0, 4.0, colors::WHITE));

    out
}
