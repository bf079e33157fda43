//! `Rgba` / `Hsla` color types and the conversion between them.

/////////////////////////////////////////////////////////////////////////////
//
// Rgba
//
// Four 8-bit channels. Alpha is carried through the framebuffer but never
// blended or written to the host surface by the core.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const ORANGE: Rgba = Rgba::opaque(255, 165, 0);

    pub fn as_floats(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    // Scales each color channel (alpha untouched) and saturates to
    // [0, 255]. The Blinn shader multiplies channels by floats > 1 (e.g.
    // `1.2 * diffuse_term`); saturating here is the explicit policy call
    // the spec leaves open, chosen over silent wraparound.
    pub fn scale_saturating(self, factor: f32) -> Rgba {
        let scale_channel = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Rgba::new(scale_channel(self.r), scale_channel(self.g), scale_channel(self.b), self.a)
    }

    pub fn add_saturating(self, rhs: Rgba) -> Rgba {
        Rgba::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
            self.a,
        )
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// Hsla
//
// Four floats in [0, 1]: hue, saturation, lightness, alpha.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Hsla { h, s, l, a }
    }

    // Hue of the complementary color, wrapped back into [0, 1].
    pub fn complementary_hue(self) -> f32 {
        let h = self.h + 0.5;
        if h > 1.0 {
            h - 1.0
        } else {
            h
        }
    }

    pub fn to_rgba(self) -> Rgba {
        if self.s <= 0.0 {
            let gray = (self.l.clamp(0.0, 1.0) * 255.0).round() as u8;
            return Rgba::new(gray, gray, gray, (self.a.clamp(0.0, 1.0) * 255.0).round() as u8);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;

        let to_channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };

        Rgba::new(
            to_channel(self.h + 1.0 / 3.0),
            to_channel(self.h),
            to_channel(self.h - 1.0 / 3.0),
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    pub fn from_rgba(c: Rgba) -> Hsla {
        let [r, g, b, a] = c.as_floats();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < 1e-6 {
            return Hsla::new(0.0, 0.0, l, a);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        let h = if (max - r).abs() < 1e-6 {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < 1e-6 {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        } / 6.0;

        Hsla::new(h, s, l, a)
    }
}
