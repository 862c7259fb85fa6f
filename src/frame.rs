use image::{Rgb, RgbImage};

use crate::camera::Viewport;
use crate::math::{black, Color};

/// One color per pixel, row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            pixels: vec![black(); viewport.pixel_count()],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Color> {
        if x < self.width && y < self.height {
            self.pixels.get(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// 8-bit copy for display or saving, with channels clamped to [0, 1].
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[y as usize * self.width as usize + x as usize];
            Rgb::from([to_byte(color.x), to_byte(color.y), to_byte(color.z)])
        })
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.min(1.).max(0.) * 255.) as u8
}
