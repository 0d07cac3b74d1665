use std::fs;
use std::path::PathBuf;

use crate::core::dashboard::DisplaySink;
use crate::error::Result;
use crate::ui::Frame;

/// Writes every frame to a PNG file, for hosts without a panel.
///
/// The image is written next to the target and renamed into place so viewers
/// never pick up a half-written file.
pub struct PngSink {
    path: PathBuf,
    backlight: u8,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backlight: 100,
        }
    }

    pub fn backlight(&self) -> u8 {
        self.backlight
    }
}

impl DisplaySink for PngSink {
    fn init(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        log::info!("Writing frames to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn set_backlight(&mut self, percent: u8) -> Result<()> {
        self.backlight = percent.min(100);
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        let staging = self.path.with_extension("png.tmp");
        frame
            .to_rgb_image()
            .save_with_format(&staging, image::ImageFormat::Png)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
