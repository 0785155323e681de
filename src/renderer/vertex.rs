//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// `f32`s per vertex in a flat buffer: x, y, r, g, b, a
    pub const FLOATS: usize = std::mem::size_of::<Vertex>() / std::mem::size_of::<f32>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Flat view of a vertex list, the layout a draw backend consumes
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Parse a `#rgb` or `#rrggbb` CSS color
pub fn hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.strip_prefix('#')?;
    let width = match digits.len() {
        3 => 1,
        6 => 2,
        _ => return None,
    };
    let channel = |i: usize| {
        let v = u8::from_str_radix(digits.get(i * width..(i + 1) * width)?, 16).ok()?;
        // #abc is shorthand for #aabbcc
        let v = if width == 1 { v * 17 } else { v };
        Some(v as f32 / 255.0)
    };
    Some([channel(0)?, channel(1)?, channel(2)?, 1.0])
}

/// Colors for game elements
pub mod colors {
    pub const SKY_DAY: [f32; 4] = [0.53, 0.81, 0.98, 1.0];
    pub const SKY_NIGHT: [f32; 4] = [0.04, 0.06, 0.16, 1.0];
    pub const SKY_CLOUDY: [f32; 4] = [0.66, 0.72, 0.78, 1.0];
    pub const SKY_RAINY: [f32; 4] = [0.33, 0.40, 0.48, 1.0];
    pub const BUILDING: [f32; 4] = [0.16, 0.20, 0.28, 1.0];
    pub const BUILDING_EDGE: [f32; 4] = [0.35, 0.42, 0.55, 1.0];
    pub const SHIELD: [f32; 4] = [0.3, 0.9, 1.0, 0.45];
    pub const SLOW_MOTION: [f32; 4] = [0.8, 0.5, 1.0, 1.0];
    pub const POWER_SHIELD: [f32; 4] = [0.2, 0.8, 1.0, 1.0];
    pub const HERO_FALLBACK: [f32; 4] = [0.85, 0.1, 0.15, 1.0];
    pub const SKIN: [f32; 4] = [1.0, 0.8, 0.6, 1.0];
    pub const HELMET: [f32; 4] = [0.78, 0.78, 0.78, 1.0];
    pub const HOOD: [f32; 4] = [0.17, 0.17, 0.17, 1.0];
    pub const BELT: [f32; 4] = [1.0, 0.83, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ARMOR_PLATE: [f32; 4] = [0.0, 0.0, 0.0, 0.22];
    pub const SPEED_STRIPE: [f32; 4] = [1.0, 1.0, 1.0, 0.22];
    /// Trail colors; alpha is set per particle
    pub const SPARK: [f32; 4] = [1.0, 0.78, 0.16, 1.0];
    pub const NEON: [f32; 4] = [0.0, 1.0, 0.9, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(hex_color("#FFFFFF"), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(hex_color("ff0000"), None);
        assert_eq!(hex_color("#f00"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(hex_color("#ffff"), None);
        assert_eq!(hex_color("#gg0000"), None);
        assert_eq!(hex_color("#éé"), None);
    }

    #[test]
    fn test_flat_buffer_layout() {
        assert_eq!(Vertex::FLOATS, 6);
        let v = [
            Vertex::new(1.0, 2.0, [0.1, 0.2, 0.3, 0.4]),
            Vertex::new(5.0, 6.0, [0.5, 0.6, 0.7, 0.8]),
        ];
        assert_eq!(
            as_floats(&v),
            &[1.0, 2.0, 0.1, 0.2, 0.3, 0.4, 5.0, 6.0, 0.5, 0.6, 0.7, 0.8]
        );
    }
}
