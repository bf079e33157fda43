//! `RenderState`: camera parameters, the three matrices the rasterizer
//! reads, toggles, and cumulative frame timing.

use crate::math::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct RenderState {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub light_dir: Vec3,

    pub model_view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,

    pub backspace_culling: bool,
    pub wire_frame: bool,
    pub smooth_shading: bool,

    // Per-frame and cumulative elapsed time, set by the host driving the
    // loop; the core never reads these itself (kept for host-side
    // diagnostics/animation, mirroring the original render_state).
    pub dt: f32,
    pub culm_dt: f32,
}

impl RenderState {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3, light_dir: Vec3) -> RenderState {
        RenderState {
            eye,
            center,
            up,
            light_dir: light_dir.normalise(),
            model_view: Mat4::identity(),
            projection: crate::transform::projection(eye, center),
            viewport: Mat4::identity(),
            backspace_culling: true,
            wire_frame: false,
            smooth_shading: true,
            dt: 0.0,
            culm_dt: 0.0,
        }
    }

    // Recomputes `model_view`/`projection` from the current camera
    // parameters; called by the host once per frame before drawing.
    pub fn update_camera(&mut self) {
        self.model_view = crate::transform::look_at(self.eye, self.center, self.up);
        self.projection = crate::transform::projection(self.eye, self.center);
    }
}
