#![allow(clippy::many_single_char_names)]

use std::ops;

/////////////////////////////////////////////////////////////////////////////
//
// Vec2 / Vec3 / Vec4
//
// Value-type vectors of 2, 3 and 4 floats. `+`/`-`/scalar-`*` are
// componentwise; `v * v` is the inner (dot) product. See `cross` for the
// right-handed 3D cross product.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub const fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }

    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    pub const fn zero() -> Self {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub const fn splat(v: f32) -> Self {
        Vec3 { x: v, y: v, z: v }
    }

    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    // Returns a unit vector, or the zero vector if `self` is (close to) zero.
    pub fn normalise(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            Vec3::zero()
        }
    }

    pub fn v3_to_v2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    // Appends a `w` coordinate, lifting the point into clip space.
    pub fn project_4d(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Vec4 { x, y, z, w }
    }

    pub const fn zero() -> Self {
        Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 }
    }

    // Perspective divide: {x/w, y/w, z/w}.
    pub fn project_3d(self) -> Vec3 {
        Vec3::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

macro_rules! impl_vec_ops {
    ($ty:ty { $($field:ident),+ }) => {
        impl ops::Add for $ty {
            type Output = $ty;
            fn add(self, rhs: $ty) -> $ty {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl ops::Sub for $ty {
            type Output = $ty;
            fn sub(self, rhs: $ty) -> $ty {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl ops::Neg for $ty {
            type Output = $ty;
            fn neg(self) -> $ty {
                Self { $($field: -self.$field),+ }
            }
        }

        impl ops::Mul<f32> for $ty {
            type Output = $ty;
            fn mul(self, rhs: f32) -> $ty {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl ops::Mul<$ty> for f32 {
            type Output = $ty;
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl ops::Div<f32> for $ty {
            type Output = $ty;
            fn div(self, rhs: f32) -> $ty {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                *self = *self + rhs;
            }
        }

        impl ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                *self = *self - rhs;
            }
        }

        // Componentwise product, used by the barycentric-weighting code
        // and by anything treating the vector as a plain tuple of floats.
        impl ops::Mul for $ty {
            type Output = f32;
            fn mul(self, rhs: $ty) -> f32 {
                self.dot(rhs)
            }
        }
    };
}

impl_vec_ops!(Vec2 { x, y });
impl_vec_ops!(Vec3 { x, y, z });
impl_vec_ops!(Vec4 { x, y, z, w });
