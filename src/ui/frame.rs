//! Owned RGB565 raster the composer draws into.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use image::RgbImage;

/// One composed raster image, upright, in panel geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl Frame {
    pub fn new(width: u32, height: u32, fill: Rgb565) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        }
    }

    /// Copy an RGB image into a frame of the given size.
    ///
    /// Pixels outside the image stay `fill`; image pixels outside the frame are
    /// dropped.
    pub fn from_rgb_image(image: &RgbImage, width: u32, height: u32, fill: Rgb565) -> Self {
        let mut frame = Self::new(width, height, fill);
        for (x, y, pixel) in image.enumerate_pixels() {
            if x < width && y < height {
                let [r, g, b] = pixel.0;
                frame.pixels[(y * width + x) as usize] = Rgb888::new(r, g, b).into();
            }
        }
        frame
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Big-endian RGB565, the byte order ST7789 expects over SPI.
    pub fn to_rgb565_be_bytes(&self) -> Vec<u8> {
        self.raw_words().flat_map(u16::to_be_bytes).collect()
    }

    /// Little-endian RGB565, the layout of a Linux 16bpp framebuffer.
    pub fn to_rgb565_le_bytes(&self) -> Vec<u8> {
        self.raw_words().flat_map(u16::to_le_bytes).collect()
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color: Rgb888 = self.pixels[(y * self.width + x) as usize].into();
            image::Rgb([color.r(), color.g(), color.b()])
        })
    }

    fn raw_words(&self) -> impl Iterator<Item = u16> + '_ {
        self.pixels
            .iter()
            .map(|&color| RawU16::from(color).into_inner())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.pixels[(y * self.width + x) as usize] = color;
            }
        }
        Ok(())
    }
}
