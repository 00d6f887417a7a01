use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use ultraviolet::DVec3;

use crate::error::RenderError;

/// Linear colour buffer with channels in [0, 1], stored row major with row 0
/// at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<DVec3>,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![DVec3::zero(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> DVec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: DVec3) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    pub fn row(&self, y: usize) -> &[DVec3] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [DVec3] {
        let start = self.index(0, y);
        &mut self.pixels[start..start + self.width]
    }

    pub fn pixels(&self) -> &[DVec3] {
        &self.pixels
    }

    /// 8-bit copy of the buffer. Channels are scaled by 255 and truncated.
    pub fn to_rgb8(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let color = self.get_pixel(x as usize, y as usize);
            Rgb([to_byte(color.x), to_byte(color.y), to_byte(color.z)])
        })
    }

    /// Encode to disk, format picked from the file extension.
    pub fn save(&self, output_path: &Path) -> Result<(), RenderError> {
        self.to_rgb8().save(output_path)?;
        Ok(())
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}
