//! A rectangular pixel buffer: width, height, channel count, and a
//! contiguous byte array in row-major order. Row 0 is the *bottom* row of
//! the image, matching the rest of the core's single bottom-left-origin
//! convention (see `buffers` and §9 of the design notes for why the
//! original C++ source's split addressing was not carried over).

use crate::color::Rgba;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Image> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(Error::UnsupportedChannelCount(channels));
        }
        Ok(Image {
            width,
            height,
            channels,
            data: vec![0u8; width * height * channels],
        })
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.channels
    }

    // Fetch a pixel at the given coordinates. Caller must ensure `x < width`
    // and `y < height`; out-of-bounds access panics, matching the "no
    // defensive checks away from construction" policy (see `get_pixel_safe`
    // for the clamping variant used by kernels that read neighbor pixels).
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgba {
        let i = self.index(x, y);
        match self.channels {
            1 => Rgba::opaque(self.data[i], self.data[i], self.data[i]),
            3 => Rgba::opaque(self.data[i], self.data[i + 1], self.data[i + 2]),
            4 => Rgba::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]),
            _ => unreachable!("channel count validated at construction"),
        }
    }

    // Same as `get_pixel`, but clamps (possibly negative) coordinates into
    // bounds first. Used by post-process kernels that sample around the
    // current pixel.
    pub fn get_pixel_safe(&self, x: i64, y: i64) -> Rgba {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.get_pixel(cx, cy)
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = self.index(x, y);
        match self.channels {
            1 => self.data[i] = color.r,
            3 => {
                self.data[i] = color.r;
                self.data[i + 1] = color.g;
                self.data[i + 2] = color.b;
            }
            4 => {
                self.data[i] = color.r;
                self.data[i + 1] = color.g;
                self.data[i + 2] = color.b;
                self.data[i + 3] = color.a;
            }
            _ => unreachable!("channel count validated at construction"),
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
    }

    // Nearest-neighbor sample at uv in [0, 1]^2. `v` follows the image's
    // own bottom-left origin, so `v = 0` is the bottom row.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Rgba {
        let x = ((u * (self.width - 1) as f32).round() as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * (self.height - 1) as f32).round() as i64).clamp(0, self.height as i64 - 1) as usize;
        self.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Image::new(0, 4, 4).is_err());
        assert!(Image::new(4, 0, 4).is_err());
    }

    #[test]
    fn rejects_bad_channel_count() {
        assert!(Image::new(4, 4, 2).is_err());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut img = Image::new(2, 2, 4).unwrap();
        img.set_pixel(1, 0, Rgba::new(10, 20, 30, 40));
        assert_eq!(img.get_pixel(1, 0), Rgba::new(10, 20, 30, 40));
        assert_eq!(img.get_pixel(0, 0), Rgba::new(0, 0, 0, 0));
    }

    #[test]
    fn safe_sampler_clamps_negative_and_overflowing_coords() {
        let mut img = Image::new(2, 2, 4).unwrap();
        img.set_pixel(0, 0, Rgba::opaque(1, 2, 3));
        img.set_pixel(1, 1, Rgba::opaque(9, 9, 9));
        assert_eq!(img.get_pixel_safe(-5, -5), Rgba::opaque(1, 2, 3));
        assert_eq!(img.get_pixel_safe(50, 50), Rgba::opaque(9, 9, 9));
    }
}
