//! ST7789V2 panel protocol (1.69" 240x280 module).
//!
//! The controller RAM is 240x320; this module shows rows 20..300 of it.

use std::time::Duration;

use crate::core::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::core::dashboard::DisplaySink;
use crate::error::{DashError, Result};
use crate::ui::{Frame, BACKGROUND};

const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// 16 bits per pixel, RGB565
const COLMOD_RGB565: u8 = 0x05;
const ROW_OFFSET: u16 = 20;

/// Wires between the host and the controller: data/command select on top of
/// the SPI bus, the reset line and the backlight.
pub trait PanelBus: Send {
    fn hard_reset(&mut self) -> Result<()>;

    fn command(&mut self, command: u8) -> Result<()>;

    fn data(&mut self, bytes: &[u8]) -> Result<()>;

    fn backlight(&mut self, percent: u8) -> Result<()>;

    fn delay(&mut self, duration: Duration);
}

pub struct St7789Sink<B> {
    bus: B,
    width: u16,
    height: u16,
}

impl<B: PanelBus> St7789Sink<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            width: DISPLAY_WIDTH as u16,
            height: DISPLAY_HEIGHT as u16,
        }
    }

    fn command_with(&mut self, command: u8, data: &[u8]) -> Result<()> {
        self.bus.command(command)?;
        if !data.is_empty() {
            self.bus.data(data)?;
        }
        Ok(())
    }

    /// Full-screen address window followed by a RAM write.
    fn begin_frame(&mut self) -> Result<()> {
        let x_end = self.width - 1;
        let y_start = ROW_OFFSET;
        let y_end = ROW_OFFSET + self.height - 1;

        self.command_with(CASET, &window(0, x_end))?;
        self.command_with(RASET, &window(y_start, y_end))?;
        self.bus.command(RAMWR)
    }

    fn write_pixels(&mut self, frame: &Frame) -> Result<()> {
        if (frame.width(), frame.height()) != (u32::from(self.width), u32::from(self.height)) {
            return Err(DashError::display(format!(
                "frame is {}x{}, panel is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        self.begin_frame()?;
        self.bus.data(&frame.to_rgb565_be_bytes())
    }
}

fn window(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}

impl<B: PanelBus> DisplaySink for St7789Sink<B> {
    fn init(&mut self) -> Result<()> {
        self.bus.hard_reset()?;

        self.bus.command(SWRESET)?;
        self.bus.delay(Duration::from_millis(150));
        self.bus.command(SLPOUT)?;
        self.bus.delay(Duration::from_millis(120));

        self.command_with(MADCTL, &[0x00])?;
        self.command_with(COLMOD, &[COLMOD_RGB565])?;
        self.bus.command(INVON)?;
        self.bus.command(NORON)?;
        self.bus.command(DISPON)?;
        self.bus.delay(Duration::from_millis(20));

        log::info!("ST7789 panel initialized");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let blank = Frame::new(
            u32::from(self.width),
            u32::from(self.height),
            BACKGROUND.into(),
        );
        self.write_pixels(&blank)
    }

    fn set_backlight(&mut self, percent: u8) -> Result<()> {
        self.bus.backlight(percent.min(100))
    }

    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.write_pixels(frame)
    }
}
