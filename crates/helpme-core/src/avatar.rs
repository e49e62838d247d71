//! Deterministic anonymous avatars
//!
//! Every identity in the app is drawn as a simple glyph derived from an
//! integer seed. The same seed always yields the same shape, and the color
//! stays neutral until the viewer has earned some trust.

use serde::Serialize;
use std::f64::consts::PI;

/// The symbolic forms an avatar can take, in derivation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Triangle,
    Square,
    Diamond,
    Hexagon,
    Star,
}

pub const SHAPES: [Shape; 6] = [
    Shape::Circle,
    Shape::Triangle,
    Shape::Square,
    Shape::Diamond,
    Shape::Hexagon,
    Shape::Star,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AvatarColor {
    pub name: &'static str,
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

/// Index 0 is reserved for anonymous (trust level 0) avatars.
pub const PALETTE: [AvatarColor; 6] = [
    AvatarColor { name: "neutral", hex: "#E0E0E0", rgb: (0xE0, 0xE0, 0xE0) },
    AvatarColor { name: "blue", hex: "#4A90D9", rgb: (0x4A, 0x90, 0xD9) },
    AvatarColor { name: "green", hex: "#4CAF50", rgb: (0x4C, 0xAF, 0x50) },
    AvatarColor { name: "orange", hex: "#FFA726", rgb: (0xFF, 0xA7, 0x26) },
    AvatarColor { name: "purple", hex: "#AB47BC", rgb: (0xAB, 0x47, 0xBC) },
    AvatarColor { name: "red", hex: "#EF5350", rgb: (0xEF, 0x53, 0x50) },
];

pub const NEUTRAL: AvatarColor = PALETTE[0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Avatar {
    pub shape: Shape,
    pub color: AvatarColor,
}

/// Derive the avatar for `seed` as seen at `trust_level`.
///
/// Negative seeds are reduced with floor-mod so every integer maps onto a
/// valid shape and color.
pub fn derive_avatar(seed: i64, trust_level: u8) -> Avatar {
    let shape = SHAPES[seed.rem_euclid(SHAPES.len() as i64) as usize];
    let color = if trust_level == 0 {
        NEUTRAL
    } else {
        let revealed = (PALETTE.len() - 1) as i64;
        PALETTE[1 + seed.rem_euclid(revealed) as usize]
    };
    Avatar { shape, color }
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Diamond => "diamond",
            Shape::Hexagon => "hexagon",
            Shape::Star => "star",
        }
    }

    /// Outline of this shape inside a `dimension` x `dimension` box.
    /// Coordinates grow right and down, like an SVG viewBox.
    pub fn glyph(&self, dimension: f64) -> Glyph {
        let half = dimension / 2.0;
        match self {
            Shape::Circle => Glyph::Circle {
                cx: half,
                cy: half,
                r: half * 0.7,
            },
            Shape::Square => Glyph::Rect {
                x: half * 0.3,
                y: half * 0.3,
                width: half * 1.4,
                height: half * 1.4,
            },
            Shape::Triangle => Glyph::Polygon(vec![
                (half, half * 0.4),
                (half * 0.3, half * 1.6),
                (half * 1.7, half * 1.6),
            ]),
            Shape::Diamond => Glyph::Polygon(vec![
                (half, half * 0.3),
                (half * 1.7, half),
                (half, half * 1.7),
                (half * 0.3, half),
            ]),
            Shape::Hexagon => Glyph::Polygon(
                (0..6)
                    .map(|i| polar(half, half * 0.7, PI / 3.0 * i as f64 - PI / 2.0))
                    .collect(),
            ),
            Shape::Star => Glyph::Polygon(
                (0..10)
                    .map(|i| {
                        let radius = if i % 2 == 0 { half * 0.7 } else { half * 0.35 };
                        polar(half, radius, PI / 5.0 * i as f64 - PI / 2.0)
                    })
                    .collect(),
            ),
        }
    }
}

fn polar(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    (center + radius * angle.cos(), center + radius * angle.sin())
}

/// Rendering sizes, in viewBox units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSize {
    Small,
    Medium,
    Large,
}

impl AvatarSize {
    pub fn dimension(&self) -> f64 {
        match self {
            AvatarSize::Small => 40.0,
            AvatarSize::Medium => 60.0,
            AvatarSize::Large => 100.0,
        }
    }
}

/// A renderer-independent outline
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Polygon(Vec<(f64, f64)>),
}

impl Glyph {
    /// Closed outline edges, for renderers that only draw lines
    pub fn edges(&self) -> Vec<((f64, f64), (f64, f64))> {
        match self {
            Glyph::Circle { .. } => Vec::new(),
            Glyph::Rect { x, y, width, height } => {
                let corners = [
                    (*x, *y),
                    (x + width, *y),
                    (x + width, y + height),
                    (*x, y + height),
                ];
                close(&corners)
            }
            Glyph::Polygon(points) => close(points),
        }
    }
}

fn close(points: &[(f64, f64)]) -> Vec<((f64, f64), (f64, f64))> {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_inputs_same_avatar() {
        for seed in [-9_999, -1, 0, 1, 7392, 4821, i64::MAX, i64::MIN] {
            for level in 0..=4 {
                assert_eq!(derive_avatar(seed, level), derive_avatar(seed, level));
            }
        }
    }

    #[test]
    fn test_anonymous_avatar_is_neutral() {
        for seed in -50..50 {
            assert_eq!(derive_avatar(seed, 0).color, NEUTRAL);
        }
    }

    #[test]
    fn test_color_ignores_exact_trust_level() {
        for seed in -50..50 {
            let first = derive_avatar(seed, 1).color;
            assert_ne!(first, NEUTRAL);
            for level in 2..=4 {
                assert_eq!(derive_avatar(seed, level).color, first);
            }
        }
    }

    #[test]
    fn test_known_identities() {
        // 7392 % 6 == 0, 7392 % 5 == 2
        let user = derive_avatar(7392, 2);
        assert_eq!(user.shape, Shape::Circle);
        assert_eq!(user.color.hex, "#FFA726");

        // 4821 % 6 == 3, 4821 % 5 == 1
        let partner = derive_avatar(4821, 1);
        assert_eq!(partner.shape, Shape::Diamond);
        assert_eq!(partner.color.hex, "#4CAF50");
    }

    #[test]
    fn test_negative_seed_uses_floor_mod() {
        // -1 mod 6 == 5, -1 mod 5 == 4
        let avatar = derive_avatar(-1, 3);
        assert_eq!(avatar.shape, Shape::Star);
        assert_eq!(avatar.color.hex, "#EF5350");
    }

    #[test]
    fn test_shape_covers_all_forms() {
        let shapes: Vec<Shape> = (0..6).map(|seed| derive_avatar(seed, 0).shape).collect();
        assert_eq!(shapes, SHAPES.to_vec());
    }

    #[test]
    fn test_glyph_vertex_counts() {
        let d = AvatarSize::Medium.dimension();
        let count = |shape: Shape| match shape.glyph(d) {
            Glyph::Polygon(points) => points.len(),
            _ => 0,
        };
        assert_eq!(count(Shape::Triangle), 3);
        assert_eq!(count(Shape::Diamond), 4);
        assert_eq!(count(Shape::Hexagon), 6);
        assert_eq!(count(Shape::Star), 10);
        assert!(matches!(Shape::Circle.glyph(d), Glyph::Circle { r, .. } if (r - 21.0).abs() < 1e-9));
    }

    #[test]
    fn test_glyph_stays_inside_box() {
        let d = AvatarSize::Large.dimension();
        for shape in SHAPES {
            for ((x1, y1), (x2, y2)) in shape.glyph(d).edges() {
                for v in [x1, y1, x2, y2] {
                    assert!((0.0..=d).contains(&v), "{} escapes the box", shape.as_str());
                }
            }
        }
    }

    #[test]
    fn test_edges_close_the_outline() {
        let edges = Shape::Square.glyph(40.0).edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges.last().map(|e| e.1), edges.first().map(|e| e.0));
    }
}
