//! Display back ends.
//!
//! The ST7789 panel is driven directly over spidev. A kernel framebuffer
//! (fbtft overlay) and a PNG file are the alternatives.

mod framebuffer;
mod png;
pub mod spi;
pub mod st7789;

pub use framebuffer::FramebufferSink;
pub use png::PngSink;
pub use spi::SpiPins;
pub use st7789::{PanelBus, St7789Sink};

/// Which sink the binary should construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Spi,
    Framebuffer,
    Png,
}

impl SinkKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "spi" => Some(SinkKind::Spi),
            "framebuffer" | "fb" => Some(SinkKind::Framebuffer),
            "png" => Some(SinkKind::Png),
            _ => None,
        }
    }

    pub fn default_device(self) -> &'static str {
        match self {
            SinkKind::Spi => "/dev/spidev0.0",
            SinkKind::Framebuffer => "/dev/fb1",
            SinkKind::Png => "./frame.png",
        }
    }
}
