//! Builds one dashboard frame from a [`DashboardSnapshot`].
//!
//! Layout on the 240x280 panel:
//!
//! ```text
//! +--------+--------+--------+
//! |  eth0  |  TEMP  |  RAM   |
//! +--------+--------+--------+
//! |  DISK  |  CPU   |  SWAP  |
//! |        +--------+--------+
//! |        |     Web3Pi.io   |
//! +--------+-----------------+
//! |      IP / HOSTNAME       |
//! +--------------------------+
//! ```

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_7X13, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::core::config::CpuScale;
use crate::core::dashboard::DashboardSnapshot;

use super::colors::{
    cpu_color, AnimationState, Color, ACCENT_PALETTE, SEPARATOR, TEXT_PRIMARY, TEXT_SECONDARY,
    TEXT_STALE,
};
use super::frame::Frame;

const VALUE_FONT: &MonoFont<'static> = &FONT_10X20;
const LABEL_FONT: &MonoFont<'static> = &FONT_9X18_BOLD;
const SMALL_FONT: &MonoFont<'static> = &FONT_7X13;

const SEPARATOR_WIDTH: u32 = 2;
const COLUMN: i32 = 80;
const ROW: i32 = 93;
/// Bottom edge of the CPU/SWAP row on the right two columns.
const ACCENT_ROW: i32 = 2 * ROW - 22;

const BRAND_LABEL: &str = "Web3Pi.io";
const BRAND_POSITION: Point = Point::new(165, 175);

/// Above this, network rates drop the decimal.
const RATE_DECIMAL_THRESHOLD: f64 = 100.0;

/// Rate text: one decimal below the threshold, none at or above it.
pub fn format_rate(prefix: &str, mbps: f64) -> String {
    if mbps >= RATE_DECIMAL_THRESHOLD {
        format!("{}:{:.0}", prefix, mbps)
    } else {
        format!("{}:{:.1}", prefix, mbps)
    }
}

pub struct FrameComposer {
    background: Frame,
    cpu_scale: CpuScale,
}

impl FrameComposer {
    pub fn new(background: Frame, cpu_scale: CpuScale) -> Self {
        Self {
            background,
            cpu_scale,
        }
    }

    /// Draw one frame and step the accent animation.
    ///
    /// Never fails: missing values are already defaults in the snapshot, and
    /// drawing into a [`Frame`] is infallible.
    pub fn compose(&self, snapshot: &DashboardSnapshot, animation: &mut AnimationState) -> Frame {
        let mut canvas = Canvas {
            frame: self.background.clone(),
        };

        canvas.separators();
        self.network_panel(&mut canvas, snapshot);
        self.temperature_panel(&mut canvas, snapshot);
        self.memory_panel(&mut canvas, snapshot);
        self.disk_panel(&mut canvas, snapshot);
        self.cpu_panel(&mut canvas, snapshot);
        self.swap_panel(&mut canvas, snapshot);
        self.address_strip(&mut canvas, snapshot);

        let accent = ACCENT_PALETTE[animation.index() % ACCENT_PALETTE.len()];
        canvas.centered(BRAND_LABEL, BRAND_POSITION, SMALL_FONT, accent);
        animation.advance();

        canvas.frame
    }

    fn network_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        let value_color = if snapshot.estimator_alive {
            TEXT_PRIMARY
        } else {
            TEXT_STALE
        };

        canvas.centered(&snapshot.interface, Point::new(40, 18), LABEL_FONT, TEXT_SECONDARY);
        canvas.left(
            &format_rate("D", snapshot.download_mbps),
            Point::new(5, 45),
            SMALL_FONT,
            value_color,
        );
        canvas.left(
            &format_rate("U", snapshot.upload_mbps),
            Point::new(5, 65),
            SMALL_FONT,
            value_color,
        );
        canvas.centered("Mbps", Point::new(55, 80), SMALL_FONT, TEXT_SECONDARY);
    }

    fn temperature_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        canvas.centered("TEMP", Point::new(120, 18), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(
            &(snapshot.cpu_temperature as i32).to_string(),
            Point::new(120, 50),
            VALUE_FONT,
            TEXT_PRIMARY,
        );
        canvas.centered("°C", Point::new(145, 78), LABEL_FONT, TEXT_SECONDARY);
    }

    fn memory_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        canvas.centered("RAM", Point::new(200, 18), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(
            &(snapshot.memory_percent as i32).to_string(),
            Point::new(200, 50),
            VALUE_FONT,
            TEXT_PRIMARY,
        );
        canvas.centered("%", Point::new(225, 78), LABEL_FONT, TEXT_SECONDARY);
    }

    fn disk_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        canvas.centered("DISK", Point::new(40, 108), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(
            &format!("{}%", snapshot.disk_percent as i32),
            Point::new(40, 140),
            VALUE_FONT,
            TEXT_PRIMARY,
        );
        canvas.centered(
            &format!("{:.1}GB", snapshot.disk_used_gb),
            Point::new(42, 170),
            SMALL_FONT,
            TEXT_SECONDARY,
        );
    }

    fn cpu_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        // The ramp is applied to the whole-number value that is displayed.
        let shown = snapshot.cpu_percent as i32;

        canvas.centered("CPU", Point::new(118, 108), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(
            &shown.to_string(),
            Point::new(120, 140),
            VALUE_FONT,
            cpu_color(shown as f32, self.cpu_scale),
        );
        if !self.cpu_scale.is_per_core() {
            canvas.centered("%", Point::new(150, 145), SMALL_FONT, TEXT_SECONDARY);
        }
    }

    fn swap_panel(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        canvas.centered("SWAP", Point::new(195, 108), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(
            &(snapshot.swap_percent as i32).to_string(),
            Point::new(200, 140),
            VALUE_FONT,
            TEXT_PRIMARY,
        );
        canvas.centered("%", Point::new(230, 145), LABEL_FONT, TEXT_SECONDARY);
    }

    fn address_strip(&self, canvas: &mut Canvas, snapshot: &DashboardSnapshot) {
        canvas.centered("IP / HOSTNAME", Point::new(120, 203), LABEL_FONT, TEXT_SECONDARY);
        canvas.centered(&snapshot.ip_address, Point::new(120, 230), SMALL_FONT, TEXT_PRIMARY);
        if !snapshot.hostname.is_empty() {
            canvas.centered(
                &format!("{}.local", snapshot.hostname),
                Point::new(120, 255),
                SMALL_FONT,
                TEXT_PRIMARY,
            );
        }
    }
}

struct Canvas {
    frame: Frame,
}

impl Canvas {
    fn separators(&mut self) {
        let lines = [
            // vertical
            (Point::new(COLUMN, 0), Point::new(COLUMN, 2 * ROW)),
            (Point::new(2 * COLUMN, 0), Point::new(2 * COLUMN, ACCENT_ROW)),
            // horizontal
            (Point::new(0, ROW), Point::new(3 * COLUMN, ROW)),
            (Point::new(0, 2 * ROW), Point::new(3 * COLUMN, 2 * ROW)),
            (Point::new(COLUMN, ACCENT_ROW), Point::new(3 * COLUMN, ACCENT_ROW)),
        ];
        let style = PrimitiveStyle::with_stroke(Rgb565::from(SEPARATOR), SEPARATOR_WIDTH);
        for (start, end) in lines {
            let _ = Line::new(start, end).into_styled(style).draw(&mut self.frame);
        }
    }

    /// Text anchored at its middle, like the panel values.
    fn centered(&mut self, text: &str, at: Point, font: &'static MonoFont<'static>, color: Color) {
        self.text(text, at, font, color, Alignment::Center);
    }

    /// Text anchored at its left middle.
    fn left(&mut self, text: &str, at: Point, font: &'static MonoFont<'static>, color: Color) {
        self.text(text, at, font, color, Alignment::Left);
    }

    fn text(
        &mut self,
        text: &str,
        at: Point,
        font: &'static MonoFont<'static>,
        color: Color,
        alignment: Alignment,
    ) {
        if text.is_empty() {
            return;
        }
        let character_style = MonoTextStyle::new(font, Rgb565::from(color));
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        let _ = Text::with_text_style(text, at, character_style, text_style).draw(&mut self.frame);
    }
}
