//! Frame rendering for the LCD panel.

pub mod assets;
pub mod colors;
pub mod composer;
mod frame;

pub use assets::Assets;
pub use colors::{cpu_color, AnimationState, Color, ACCENT_PALETTE, BACKGROUND};
pub use composer::{format_rate, FrameComposer};
pub use frame::Frame;
