use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::core::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::core::dashboard::DisplaySink;
use crate::error::{DashError, Result};
use crate::ui::{Frame, BACKGROUND};

/// 16bpp Linux framebuffer, e.g. `/dev/fb1` exposed by fbtft for an SPI panel.
///
/// Backlight is optional and driven through a sysfs backlight directory
/// (`brightness` / `max_brightness`).
pub struct FramebufferSink {
    device: PathBuf,
    backlight: Option<PathBuf>,
    file: Option<File>,
}

impl FramebufferSink {
    pub fn new(device: impl Into<PathBuf>, backlight: Option<PathBuf>) -> Self {
        Self {
            device: device.into(),
            backlight,
            file: None,
        }
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| DashError::display("framebuffer not initialized"))?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

impl DisplaySink for FramebufferSink {
    fn init(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .open(&self.device)
            .map_err(|e| {
                DashError::display(format!("cannot open {}: {}", self.device.display(), e))
            })?;
        self.file = Some(file);
        log::info!("Framebuffer {} opened", self.device.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let blank = Frame::new(DISPLAY_WIDTH, DISPLAY_HEIGHT, BACKGROUND.into());
        self.write_frame(&blank.to_rgb565_le_bytes())
    }

    fn set_backlight(&mut self, percent: u8) -> Result<()> {
        let Some(dir) = self.backlight.as_ref() else {
            return Ok(());
        };

        let max: u32 = fs::read_to_string(dir.join("max_brightness"))?
            .trim()
            .parse()
            .map_err(|e| DashError::display(format!("bad max_brightness: {}", e)))?;
        let level = max * u32::from(percent.min(100)) / 100;

        fs::write(dir.join("brightness"), level.to_string())?;
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.write_frame(&frame.to_rgb565_le_bytes())
    }
}
