//! Dashboard color scheme and CPU usage color ramp.

use std::fmt;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

use crate::core::config::CpuScale;

/// 8-bit-per-channel color, printable as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b).into()
    }
}

/// LCD background
pub const BACKGROUND: Color = Color::from_hex(0x00129A);
/// Main values
pub const TEXT_PRIMARY: Color = Color::from_hex(0xFFFFFF);
/// Panel labels and units
pub const TEXT_SECONDARY: Color = Color::from_hex(0xC9C9C9);
/// Network values once the estimator has stopped
pub const TEXT_STALE: Color = Color::from_hex(0x7A7A7A);
pub const SEPARATOR: Color = Color::from_hex(0x000000);

const GREEN: Color = Color::new(0, 255, 0);
const YELLOW: Color = Color::new(255, 255, 0);
const RED: Color = Color::new(255, 0, 0);

/// Cycling colors of the decorative label.
pub const ACCENT_PALETTE: [Color; 16] = [
    Color::from_hex(0xd5c1ee),
    Color::from_hex(0xe0cce4),
    Color::from_hex(0xc2f0ba),
    Color::from_hex(0xbfc7c0),
    Color::from_hex(0xc2cbe6),
    Color::from_hex(0xd5c2b7),
    Color::from_hex(0xb4ffe1),
    Color::from_hex(0xced0e7),
    Color::from_hex(0xe2c9c1),
    Color::from_hex(0xcee8f8),
    Color::from_hex(0xe4d9d9),
    Color::from_hex(0xdccfc3),
    Color::from_hex(0xdee7f3),
    Color::from_hex(0xe4e9e1),
    Color::from_hex(0xb9c6dc),
    Color::from_hex(0xbdb8e3),
];

/// Green → yellow → red over the two halves of the scale's range.
///
/// Values outside `[0, max]` (including NaN) map to [`BACKGROUND`].
pub fn cpu_color(value: f32, scale: CpuScale) -> Color {
    let max = scale.max();
    if !(0.0..=max).contains(&value) {
        return BACKGROUND;
    }

    let half = max / 2.0;
    if value <= half {
        lerp(GREEN, YELLOW, value / half)
    } else {
        lerp(YELLOW, RED, (value - half) / half)
    }
}

/// Per-channel interpolation, truncating toward zero.
fn lerp(from: Color, to: Color, ratio: f32) -> Color {
    let channel = |a: u8, b: u8| (a as f32 + ratio * (b as f32 - a as f32)) as u8;
    Color::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// Bounded cyclic index into [`ACCENT_PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    index: usize,
    len: usize,
}

impl AnimationState {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(ACCENT_PALETTE.len())
    }
}
