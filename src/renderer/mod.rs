//! Rendering module
//!
//! Turns a [`Snapshot`] into colored triangles. The host decides how to put
//! them on screen (2D canvas in the browser, nothing natively).

pub mod hero;
pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, hex_color};

use glam::Vec2;

use crate::settings::{Background, Cosmetics};
use crate::sim::{PowerUpKind, Snapshot};
use vertex::colors;

const CIRCLE_SEGMENTS: u32 = 20;
const OUTLINE: f32 = 3.0;

/// Sky fill for a backdrop theme
pub fn background_color(background: Background) -> [f32; 4] {
    match background {
        Background::CityDay => colors::SKY_DAY,
        Background::CityNight => colors::SKY_NIGHT,
        Background::Cloudy => colors::SKY_CLOUDY,
        Background::Rainy => colors::SKY_RAINY,
    }
}

pub fn power_up_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Shield => colors::POWER_SHIELD,
        PowerUpKind::SlowMotion => colors::SLOW_MOTION,
    }
}

/// Build the triangle list for one frame, back to front
pub fn scene(snapshot: &Snapshot, cosmetics: &Cosmetics) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(256 + snapshot.pairs.len() * 96);

    for pair in &snapshot.pairs {
        for r in [&pair.top_rect, &pair.bottom_rect] {
            vertices.extend(shapes::rect(r, colors::BUILDING));
            vertices.extend(shapes::rect_outline(r, OUTLINE, colors::BUILDING_EDGE));
        }
        if let Some(p) = pair.power_up.as_ref().filter(|p| !p.taken) {
            vertices.extend(shapes::circle(
                p.pos,
                p.radius,
                power_up_color(p.kind),
                CIRCLE_SEGMENTS,
            ));
        }
    }

    let view = &snapshot.hero;
    vertices.extend(hero::hero(view, cosmetics, snapshot.frame));

    if view.shielded {
        let center = Vec2::new(
            view.rect.x + view.rect.w * 0.5,
            view.rect.y + view.rect.h * 0.5,
        );
        let r = view.rect.w.max(view.rect.h) * 0.75;
        vertices.extend(shapes::ring(center, r, r + 4.0, colors::SHIELD, CIRCLE_SEGMENTS));
    }

    vertices
}
