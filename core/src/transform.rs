//! Camera, projection and viewport builders, plus the handful of rigid
//! transforms the rasterizer composes into `model_view`.

use crate::math::{cross, Mat4, Vec3};

/////////////////////////////////////////////////////////////////////////////
//
// look_at
//
// Standard right-handed view matrix. Forward points from `center` to
// `eye` (so the camera looks down -z in its own space); `right` and
// `true_up` complete an orthonormal basis.
//
/////////////////////////////////////////////////////////////////////////////

pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let z = (eye - center).normalise();
    let x = cross(up, z).normalise();
    let y = cross(z, x);

    Mat4::from_rows([
        [x.x, x.y, x.z, -x.dot(eye)],
        [y.x, y.y, y.z, -y.dot(eye)],
        [z.x, z.y, z.z, -z.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/////////////////////////////////////////////////////////////////////////////
//
// projection
//
// A simple perspective matrix with no explicit near/far or FOV
// parameters: `projection[3][2] = -1 / |eye - center|`. Everything else
// is identity, so the only thing this matrix contributes beyond
// `model_view` is the perspective divide term written into row 3.
//
/////////////////////////////////////////////////////////////////////////////

pub fn projection(eye: Vec3, center: Vec3) -> Mat4 {
    let mut m = Mat4::identity();
    m.rows[3][2] = -1.0 / (eye - center).length();
    m
}

/////////////////////////////////////////////////////////////////////////////
//
// view_port
//
// Maps NDC in [-1, 1] to the rectangle [x, x+w] x [y, y+h] in the
// framebuffer. The depth coordinate is likewise rescaled, but the exact
// scale is unimportant: the rasterizer z-tests against this viewport-space
// z (see `raster::Rasterizer`), so the viewport's z row only needs to
// preserve ordering, not hit a particular numeric range.
//
/////////////////////////////////////////////////////////////////////////////

pub fn view_port(x: f32, y: f32, w: f32, h: f32) -> Mat4 {
    let depth = 255.0;
    Mat4::from_rows([
        [w / 2.0, 0.0, 0.0, x + w / 2.0],
        [0.0, h / 2.0, 0.0, y + h / 2.0],
        [0.0, 0.0, depth / 2.0, depth / 2.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rot_x(deg: f32) -> Mat4 {
    let (s, c) = deg.to_radians().sin_cos();
    Mat4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rot_y(deg: f32) -> Mat4 {
    let (s, c) = deg.to_radians().sin_cos();
    Mat4::from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn trans(v: Vec3) -> Mat4 {
    Mat4::from_rows([
        [1.0, 0.0, 0.0, v.x],
        [0.0, 1.0, 0.0, v.y],
        [0.0, 0.0, 1.0, v.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn scale(v: Vec3) -> Mat4 {
    Mat4::from_rows([
        [v.x, 0.0, 0.0, 0.0],
        [0.0, v.y, 0.0, 0.0],
        [0.0, 0.0, v.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn identity() -> Mat4 {
    Mat4::identity()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn look_at_places_eye_at_origin_of_camera_space() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let view = look_at(eye, Vec3::zero(), Vec3::new(0.0, 1.0, 0.0));
        let origin_in_eye = view * eye.project_4d(1.0);
        assert_relative_eq!(origin_in_eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(origin_in_eye.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(origin_in_eye.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn view_port_maps_ndc_corners() {
        let vp = view_port(0.0, 0.0, 100.0, 100.0);
        let bottom_left = vp * Vec3::new(-1.0, -1.0, 0.0).project_4d(1.0);
        assert_relative_eq!(bottom_left.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(bottom_left.y, 0.0, epsilon = 1e-4);

        let top_right = vp * Vec3::new(1.0, 1.0, 0.0).project_4d(1.0);
        assert_relative_eq!(top_right.x, 100.0, epsilon = 1e-4);
        assert_relative_eq!(top_right.y, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn rot_y_full_turn_is_identity() {
        let m = rot_y(360.0);
        let v = Vec3::new(1.0, 2.0, 3.0).project_4d(1.0);
        let rotated = m * v;
        assert_relative_eq!(rotated.x, v.x, epsilon = 1e-4);
        assert_relative_eq!(rotated.z, v.z, epsilon = 1e-4);
    }
}
