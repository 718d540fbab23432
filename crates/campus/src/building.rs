use std::fmt;

use bevy::math::bounding::Aabb3d;
use bevy::math::Vec3A;
use bevy::prelude::*;

use crate::config::{HIGHLIGHT_COLOR, HOVER_LIFT};

/// 24-bit sRGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(text: &str) -> Option<Rgb> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb)
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.r(), self.g(), self.b())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Static description of one campus building. `name` is the natural key.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingDescriptor {
    pub name: String,
    pub color: Rgb,
    /// Centre of the footprint at ground level.
    pub position: Vec3,
    /// Width, height and depth.
    pub size: Vec3,
}

impl BuildingDescriptor {
    /// The resting elevation of the building base.
    pub fn base_elevation(&self) -> f32 {
        self.position.y
    }

    /// Pickable volume. While hovered the box is stretched upwards by the lift
    /// rather than shifted, so the pointer does not fall off the bottom edge
    /// of a building that just rose under it.
    pub fn pick_bounds(&self, hovered: bool) -> Aabb3d {
        let half = Vec3::new(self.size.x * 0.5, 0.0, self.size.z * 0.5);
        let lift = if hovered { HOVER_LIFT } else { 0.0 };
        Aabb3d {
            min: Vec3A::new(self.position.x - half.x, self.position.y, self.position.z - half.z),
            max: Vec3A::new(
                self.position.x + half.x,
                self.position.y + self.size.y + lift,
                self.position.z + half.z,
            ),
        }
    }
}

/// Color and elevation a building should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingVisual {
    pub color: Rgb,
    pub elevation: f32,
}

impl BuildingVisual {
    /// Always derived from the descriptor, never from the previous visual, so
    /// any number of hover toggles lands on the same bits.
    pub fn for_hover(descriptor: &BuildingDescriptor, active: bool) -> Self {
        if active {
            Self {
                color: Rgb(HIGHLIGHT_COLOR),
                elevation: descriptor.base_elevation() + HOVER_LIFT,
            }
        } else {
            Self {
                color: descriptor.color,
                elevation: descriptor.base_elevation(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> BuildingDescriptor {
        BuildingDescriptor {
            name: "Block 4".to_string(),
            color: Rgb(0xffd700),
            position: Vec3::new(4.0, 0.0, 1.0),
            size: Vec3::new(2.5, 1.2, 2.5),
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#87ceeb"), Some(Rgb(0x87ceeb)));
        assert_eq!(Rgb::parse_hex("7fffd4"), Some(Rgb(0x7fffd4)));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_rgb_channels_and_display() {
        let c = Rgb(0x0a1929);
        assert_eq!((c.r(), c.g(), c.b()), (0x0a, 0x19, 0x29));
        assert_eq!(c.to_string(), "#0a1929");
    }

    #[test]
    fn test_pick_bounds_sits_on_base() {
        let b = block();
        let bounds = b.pick_bounds(false);
        assert_eq!(bounds.min, Vec3A::new(2.75, 0.0, -0.25));
        assert_eq!(bounds.max, Vec3A::new(5.25, 1.2, 2.25));
    }

    #[test]
    fn test_hovered_bounds_keep_base_and_grow_up() {
        let b = block();
        let rest = b.pick_bounds(false);
        let hovered = b.pick_bounds(true);
        assert_eq!(hovered.min, rest.min);
        assert!((hovered.max.y - (rest.max.y + HOVER_LIFT)).abs() < 1e-6);
    }

    #[test]
    fn test_hover_visual_highlights_and_lifts() {
        let b = block();
        let on = BuildingVisual::for_hover(&b, true);
        assert_eq!(on.color, Rgb::WHITE);
        assert_eq!(on.elevation, HOVER_LIFT);
    }

    #[test]
    fn test_hover_visual_restores_bit_identical_after_many_cycles() {
        let mut b = block();
        b.position.y = 0.1;
        let before = BuildingVisual::for_hover(&b, false);
        let mut visual = before;
        for _ in 0..1000 {
            visual = BuildingVisual::for_hover(&b, true);
            assert_ne!(visual, before);
            visual = BuildingVisual::for_hover(&b, false);
        }
        assert_eq!(visual.color, before.color);
        assert_eq!(visual.elevation.to_bits(), before.elevation.to_bits());
    }
}
