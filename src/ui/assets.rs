//! Background and splash images.

use std::path::Path;

use crate::core::config::{DashboardConfig, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::{DashError, Result};

use super::colors::BACKGROUND;
use super::frame::Frame;

/// Decoded images, converted once to panel geometry.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Frame,
    pub splash: Frame,
}

impl Assets {
    /// Load both images; a missing or broken file degrades to a plain fill.
    pub fn load(config: &DashboardConfig) -> Self {
        Self {
            background: load_or_fill(&config.background_image),
            splash: load_or_fill(&config.splash_image),
        }
    }

    pub fn plain() -> Self {
        Self {
            background: blank_frame(),
            splash: blank_frame(),
        }
    }
}

pub fn blank_frame() -> Frame {
    Frame::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, BACKGROUND.into())
}

/// Decode a PNG into a frame of panel size.
pub fn load_image(path: &Path) -> Result<Frame> {
    if !path.exists() {
        return Err(DashError::asset(format!("{} not found", path.display())));
    }
    let image = image::open(path)?.to_rgb8();
    if image.dimensions() != (DISPLAY_WIDTH, DISPLAY_HEIGHT) {
        log::warn!(
            "{} is {}x{}, expected {}x{}",
            path.display(),
            image.width(),
            image.height(),
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT
        );
    }
    Ok(Frame::from_rgb_image(
        &image,
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        BACKGROUND.into(),
    ))
}

fn load_or_fill(path: &Path) -> Frame {
    load_image(path).unwrap_or_else(|e| {
        log::warn!("Using plain background instead of image: {}", e);
        blank_frame()
    })
}
