//! RGBA colours.

use core::ops::Mul;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const BROWN: Color = Color::rgb(165.0 / 255.0, 42.0 / 255.0, 42.0 / 255.0);
    pub const BEIGE: Color = Color::rgb(245.0 / 255.0, 245.0 / 255.0, 220.0 / 255.0);
    pub const DARK_SLATE_GRAY: Color = Color::rgb(47.0 / 255.0, 79.0 / 255.0, 79.0 / 255.0);
}

/// Scales every channel, alpha included.
impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, s: f32) -> Color {
        Color { r: self.r * s, g: self.g * s, b: self.b * s, a: self.a * s }
    }
}
