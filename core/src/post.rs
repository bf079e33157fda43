//! Screen-space post-process effects, applied after the scene is drawn
//! and before the framebuffer is presented.
//!
//! Each effect reads from `frame_buffer`/`z_buffer` and writes into
//! `temp_buffer`; `apply_post_process` commits `temp_buffer` back into
//! `frame_buffer` once the effect has finished the whole image, so an
//! effect never reads pixels it (or an earlier effect in the same pass)
//! has already overwritten.

use crate::buffers::{OutputBuffers, MIN_Z};
use crate::color::Rgba;
use crate::math::Mat3;

pub enum ScreenSpaceEffect {
    ChromaticAberration(ChromaticAberration),
    SobelEdge(SobelEdge),
    JumboPixels(JumboPixels),
}

impl ScreenSpaceEffect {
    pub fn apply(&self, buffers: &mut OutputBuffers) {
        match self {
            ScreenSpaceEffect::ChromaticAberration(e) => e.apply(buffers),
            ScreenSpaceEffect::SobelEdge(e) => e.apply(buffers),
            ScreenSpaceEffect::JumboPixels(e) => e.apply(buffers),
        }
    }
}

pub fn apply_post_process(effect: &ScreenSpaceEffect, buffers: &mut OutputBuffers) {
    effect.apply(buffers);
    buffers.commit_temp_buffer();
}

/////////////////////////////////////////////////////////////////////////////
//
// ChromaticAberration
//
// Each channel is sampled independently with its own offset, applied to
// both x and the vertically-mirrored y (`flipped_y = H-1-y`): red at
// `(x+red_offset, flipped_y+red_offset)`, green at
// `(x+green_offset, flipped_y+green_offset)`, blue likewise. The y-flip
// is specific to this effect, matching the ground-truth sampling rather
// than the core's usual bottom-left addressing; applying the effect
// twice with all offsets zero undoes the flip and reproduces the
// original frame.
//
/////////////////////////////////////////////////////////////////////////////

pub struct ChromaticAberration {
    pub red_offset: i64,
    pub green_offset: i64,
    pub blue_offset: i64,
}

impl ChromaticAberration {
    pub fn new(red_offset: i64, green_offset: i64, blue_offset: i64) -> Self {
        ChromaticAberration { red_offset, green_offset, blue_offset }
    }

    fn apply(&self, buffers: &mut OutputBuffers) {
        let width = buffers.width;
        let height = buffers.height;

        for y in 0..height {
            let flipped_y = height as i64 - 1 - y as i64;
            for x in 0..width {
                let center = buffers.frame_buffer.get_pixel(x, y);
                let red = buffers
                    .frame_buffer
                    .get_pixel_safe(x as i64 + self.red_offset, flipped_y + self.red_offset);
                let green = buffers
                    .frame_buffer
                    .get_pixel_safe(x as i64 + self.green_offset, flipped_y + self.green_offset);
                let blue = buffers
                    .frame_buffer
                    .get_pixel_safe(x as i64 + self.blue_offset, flipped_y + self.blue_offset);

                let shifted = Rgba::new(red.r, green.g, blue.b, center.a);
                buffers.temp_buffer.set_pixel(x, y, shifted);
            }
        }
    }
}

impl Default for ChromaticAberration {
    fn default() -> Self {
        ChromaticAberration::new(1, -1, -2)
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// SobelEdge
//
// Classic 3x3 Sobel operator over the grayscale neighborhood of each
// interior pixel. `Gx . a` and `Gy . a` are Frobenius inner products
// (elementwise multiply, then sum) of the kernel against the 3x3
// neighborhood, not a weighting by the alpha channel. Pixels with no
// rasterized geometry underneath (sentinel z) are left untouched so the
// effect doesn't outline the clear color against itself. Below
// threshold, every channel is a flat dark gray; at or above it, every
// channel carries the scaled gradient magnitude.
//
/////////////////////////////////////////////////////////////////////////////

const SOBEL_GX: Mat3 = Mat3::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);
const SOBEL_GY: Mat3 = Mat3::from_rows([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]);

pub struct SobelEdge {
    pub threshold: f32,
}

impl SobelEdge {
    pub fn new(threshold: f32) -> Self {
        SobelEdge { threshold }
    }

    fn apply(&self, buffers: &mut OutputBuffers) {
        let width = buffers.width;
        let height = buffers.height;

        for y in 0..height {
            for x in 0..width {
                let z_idx = buffers.z_index(x, y);
                if buffers.z_buffer[z_idx] <= MIN_Z {
                    let pixel = buffers.frame_buffer.get_pixel(x, y);
                    buffers.temp_buffer.set_pixel(x, y, pixel);
                    continue;
                }

                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    let pixel = buffers.frame_buffer.get_pixel(x, y);
                    buffers.temp_buffer.set_pixel(x, y, pixel);
                    continue;
                }

                let mut neighborhood = [[0.0f32; 3]; 3];
                for (row, dy) in (-1..=1).enumerate() {
                    for (col, dx) in (-1..=1).enumerate() {
                        let sample = buffers.frame_buffer.get_pixel_safe(x as i64 + dx, y as i64 + dy);
                        neighborhood[row][col] = grayscale(sample);
                    }
                }
                let a = Mat3::from_rows(neighborhood);

                let gx = SOBEL_GX.elementwise_mul(a).sum();
                let gy = SOBEL_GY.elementwise_mul(a).sum();
                let magnitude = gx.abs() + gy.abs();

                let out = if magnitude < self.threshold {
                    Rgba::new(15, 15, 15, 15)
                } else {
                    let v = (magnitude * 255.0).clamp(0.0, 255.0).round() as u8;
                    Rgba::new(v, v, v, v)
                };
                buffers.temp_buffer.set_pixel(x, y, out);
            }
        }
    }
}

fn grayscale(c: Rgba) -> f32 {
    (c.r as f32 * 0.299 + c.g as f32 * 0.587 + c.b as f32 * 0.114) / 255.0
}

/////////////////////////////////////////////////////////////////////////////
//
// JumboPixels
//
// An RGB sub-pixel split, not a pixelation/mosaic effect: for
// `px = x mod (3*pixel_size)`, the first third of the band keeps only
// the red channel, the second third only green, the last third only
// blue, zeroing the other two. Only operates where the z-buffer shows
// rasterized geometry underneath.
//
/////////////////////////////////////////////////////////////////////////////

pub struct JumboPixels {
    pub pixel_size: usize,
}

impl JumboPixels {
    pub fn new(pixel_size: usize) -> Self {
        JumboPixels { pixel_size: pixel_size.max(1) }
    }

    fn apply(&self, buffers: &mut OutputBuffers) {
        let width = buffers.width;
        let height = buffers.height;
        let period = 3 * self.pixel_size;

        for y in 0..height {
            for x in 0..width {
                let pixel = buffers.frame_buffer.get_pixel(x, y);

                let z_idx = buffers.z_index(x, y);
                if buffers.z_buffer[z_idx] <= MIN_Z {
                    buffers.temp_buffer.set_pixel(x, y, pixel);
                    continue;
                }

                let band = x % period;
                let out = if band < self.pixel_size {
                    Rgba::new(pixel.r, 0, 0, pixel.a)
                } else if band < 2 * self.pixel_size {
                    Rgba::new(0, pixel.g, 0, pixel.a)
                } else {
                    Rgba::new(0, 0, pixel.b, pixel.a)
                };
                buffers.temp_buffer.set_pixel(x, y, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::OutputBuffers;

    #[test]
    fn sobel_on_uniform_frame_finds_no_edges() {
        let mut buffers = OutputBuffers::new(6, 6).unwrap();
        buffers.clear(Rgba::opaque(50, 50, 50));
        for z in buffers.z_buffer.iter_mut() {
            *z = 0.0;
        }

        let effect = ScreenSpaceEffect::SobelEdge(SobelEdge::new(200.0));
        apply_post_process(&effect, &mut buffers);

        for y in 1..5 {
            for x in 1..5 {
                assert_eq!(buffers.frame_buffer.get_pixel(x, y), Rgba::new(15, 15, 15, 15));
            }
        }
    }

    #[test]
    fn sobel_skips_pixels_with_no_rasterized_geometry() {
        let mut buffers = OutputBuffers::new(6, 6).unwrap();
        buffers.clear(Rgba::opaque(10, 20, 30));

        let effect = ScreenSpaceEffect::SobelEdge(SobelEdge::new(0.0));
        apply_post_process(&effect, &mut buffers);

        assert_eq!(buffers.frame_buffer.get_pixel(3, 3), Rgba::opaque(10, 20, 30));
    }

    #[test]
    fn sobel_emits_scaled_magnitude_above_threshold() {
        let mut buffers = OutputBuffers::new(6, 6).unwrap();
        buffers.clear(Rgba::BLACK);
        for z in buffers.z_buffer.iter_mut() {
            *z = 0.0;
        }
        for y in 0..6 {
            for x in 3..6 {
                buffers.frame_buffer.set_pixel(x, y, Rgba::opaque(255, 255, 255));
            }
        }

        let effect = ScreenSpaceEffect::SobelEdge(SobelEdge::new(0.01));
        apply_post_process(&effect, &mut buffers);

        let edge = buffers.frame_buffer.get_pixel(3, 3);
        assert_ne!(edge, Rgba::new(15, 15, 15, 15));
        assert_eq!(edge.r, edge.g);
        assert_eq!(edge.g, edge.b);
        assert_eq!(edge.a, edge.r);
    }

    #[test]
    fn jumbo_pixels_splits_channels_by_column_band() {
        let mut buffers = OutputBuffers::new(9, 1).unwrap();
        buffers.clear(Rgba::opaque(200, 200, 200));
        for z in buffers.z_buffer.iter_mut() {
            *z = 0.0;
        }

        let effect = ScreenSpaceEffect::JumboPixels(JumboPixels::new(1));
        apply_post_process(&effect, &mut buffers);

        for &x in &[0usize, 3, 6] {
            let p = buffers.frame_buffer.get_pixel(x, 0);
            assert_eq!(p, Rgba::opaque(200, 0, 0));
        }
        for &x in &[1usize, 4, 7] {
            let p = buffers.frame_buffer.get_pixel(x, 0);
            assert_eq!(p, Rgba::opaque(0, 200, 0));
        }
        for &x in &[2usize, 5, 8] {
            let p = buffers.frame_buffer.get_pixel(x, 0);
            assert_eq!(p, Rgba::opaque(0, 0, 200));
        }
    }

    #[test]
    fn jumbo_pixels_skips_pixels_with_no_rasterized_geometry() {
        let mut buffers = OutputBuffers::new(3, 1).unwrap();
        buffers.clear(Rgba::opaque(200, 200, 200));

        let effect = ScreenSpaceEffect::JumboPixels(JumboPixels::new(1));
        apply_post_process(&effect, &mut buffers);

        assert_eq!(buffers.frame_buffer.get_pixel(0, 0), Rgba::opaque(200, 200, 200));
    }

    #[test]
    fn chromatic_aberration_twice_with_zero_offsets_is_identity() {
        let mut buffers = OutputBuffers::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                let shade = ((x + y * 5) * 7) as u8;
                buffers.frame_buffer.set_pixel(x, y, Rgba::opaque(shade, shade.wrapping_add(1), shade.wrapping_add(2)));
            }
        }
        let before = buffers.frame_buffer.data.clone();

        let effect = ScreenSpaceEffect::ChromaticAberration(ChromaticAberration::new(0, 0, 0));
        apply_post_process(&effect, &mut buffers);
        apply_post_process(&effect, &mut buffers);

        assert_eq!(buffers.frame_buffer.data, before);
    }
}
