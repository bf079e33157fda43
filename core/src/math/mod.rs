pub mod mat;
pub mod vec;

pub use mat::{Mat3, Mat4};
pub use vec::{cross, Vec2, Vec3, Vec4};
