//! Triangle scan-conversion: the driver that walks a `Mesh`'s faces,
//! projects their vertices through a `Shader`, and fills the screen-space
//! bounding box with perspective-correct, z-tested fragments.

use debug_print::debug_println;

use crate::buffers::OutputBuffers;
use crate::color::Rgba;
use crate::math::{cross, Vec2, Vec3};
use crate::mesh::{Mesh, Model};
use crate::shader::{PassContext, Shader};
use crate::state::RenderState;

pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Rasterizer {
        Rasterizer
    }

    pub fn render_model(&self, model: &Model, render_state: &RenderState, shader: &mut Shader, buffers: &mut OutputBuffers) {
        for mesh in &model.meshes {
            self.render_mesh(model, mesh, render_state, shader, buffers);
        }
    }

    pub fn render_mesh(&self, model: &Model, mesh: &Mesh, render_state: &RenderState, shader: &mut Shader, buffers: &mut OutputBuffers) {
        let ctx = PassContext { model, mesh, render_state };
        shader.begin_pass(&ctx);

        // Backface culling is done once per mesh in object space: a face
        // faces away from the camera if its normal and the eye-to-object
        // vector (both transformed into the same space) point the same
        // way. Translated to the linear part of `projection * model_view`
        // so it composes with whatever camera the caller set up.
        let view_linear = (render_state.projection * render_state.model_view).upper3x3();
        let view_position_object_space = view_linear.invert() * render_state.eye;

        for (face_index, face) in mesh.faces.iter().enumerate() {
            let v0 = mesh.verts[face.pos[0]];
            let v1 = mesh.verts[face.pos[1]];
            let v2 = mesh.verts[face.pos[2]];
            let face_normal = cross(v1 - v0, v2 - v0).normalise();

            if render_state.backspace_culling {
                let to_eye = view_position_object_space - v0;
                if face_normal.dot(to_eye) <= 0.0 {
                    continue;
                }
            }

            let clip = [
                shader.vertex(&ctx, mesh.verts[face.pos[0]], face_index, 0),
                shader.vertex(&ctx, mesh.verts[face.pos[1]], face_index, 1),
                shader.vertex(&ctx, mesh.verts[face.pos[2]], face_index, 2),
            ];

            // Apply the viewport to the still-homogeneous clip coordinate
            // (not to the already perspective-divided NDC point):
            // `view_port`'s bottom row is `[0,0,0,1]`, so this leaves `w`
            // untouched at the clip-space perspective divisor. Perspective
            // divide happens *after* the viewport, and the retained `w` is
            // exactly what perspective-correct interpolation needs below.
            let viewport_clip = clip.map(|c| render_state.viewport * c);
            let screen = viewport_clip.map(|c| c.project_3d());
            let inv_w = viewport_clip.map(|c| 1.0 / c.w);

            let face_normals = [
                mesh.normals[face.normal[0]],
                mesh.normals[face.normal[1]],
                mesh.normals[face.normal[2]],
            ];
            let face_uvs = [mesh.uvs[face.uv[0]], mesh.uvs[face.uv[1]], mesh.uvs[face.uv[2]]];

            self.fill_triangle(&ctx, shader, buffers, screen, inv_w, face_normals, face_normal, face_uvs, render_state.smooth_shading);

            if render_state.wire_frame {
                let pts = screen.map(|s| (s.x.round() as i32, s.y.round() as i32));
                draw_line(buffers, pts[0], pts[1], Rgba::ORANGE);
                draw_line(buffers, pts[1], pts[2], Rgba::ORANGE);
                draw_line(buffers, pts[2], pts[0], Rgba::ORANGE);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(
        &self,
        ctx: &PassContext,
        shader: &mut Shader,
        buffers: &mut OutputBuffers,
        screen: [Vec3; 3],
        inv_w: [f32; 3],
        normals: [Vec3; 3],
        face_normal: Vec3,
        uvs: [Vec2; 3],
        smooth_shading: bool,
    ) {
        let p = screen.map(|s| Vec2::new(s.x, s.y));

        let min_x = p.iter().map(|v| v.x).fold(f32::INFINITY, f32::min).floor().max(0.0) as i64;
        let max_x = p
            .iter()
            .map(|v| v.x)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(buffers.width as f32 - 1.0) as i64;
        let min_y = p.iter().map(|v| v.y).fold(f32::INFINITY, f32::min).floor().max(0.0) as i64;
        let max_y = p
            .iter()
            .map(|v| v.y)
            .fold(f32::NEG_INFINITY, f32::max)
            .ceil()
            .min(buffers.height as f32 - 1.0) as i64;

        if min_x > max_x || min_y > max_y {
            debug_println!("triangle bounding box fell entirely off-screen, skipping");
            return;
        }

        let area = edge_function(p[0], p[1], p[2]);
        if area.abs() < f32::EPSILON {
            debug_println!("degenerate triangle (zero area), skipping");
            return;
        }

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let point = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);

                let w0 = edge_function(p[1], p[2], point) / area;
                let w1 = edge_function(p[2], p[0], point) / area;
                let w2 = edge_function(p[0], p[1], point) / area;

                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let bary = Vec3::new(w0, w1, w2);

                let z = w0 * screen[0].z + w1 * screen[1].z + w2 * screen[2].z;

                let x = px as usize;
                let y = py as usize;
                let z_idx = buffers.z_index(x, y);
                if z <= buffers.z_buffer[z_idx] {
                    continue;
                }

                // Perspective-correct interpolation: weight each corner's
                // attribute by bary_i / w_i, then renormalize by the
                // interpolated 1/w.
                let persp_w0 = w0 * inv_w[0];
                let persp_w1 = w1 * inv_w[1];
                let persp_w2 = w2 * inv_w[2];
                let persp_sum = persp_w0 + persp_w1 + persp_w2;

                // Smooth shading interpolates the triangle's per-vertex
                // normals; flat shading reuses the single face normal for
                // every covered pixel. Whether a mesh actually has distinct
                // per-vertex normals to interpolate is a mesh-authoring
                // decision (see design notes, "smooth_shading toggle");
                // this is the one branch the toggle itself controls.
                let normal = if smooth_shading {
                    (normals[0] * persp_w0 + normals[1] * persp_w1 + normals[2] * persp_w2) / persp_sum
                } else {
                    face_normal
                };
                let uv = Vec2::new(
                    (uvs[0].x * persp_w0 + uvs[1].x * persp_w1 + uvs[2].x * persp_w2) / persp_sum,
                    (uvs[0].y * persp_w0 + uvs[1].y * persp_w1 + uvs[2].y * persp_w2) / persp_sum,
                );

                let mut color = Rgba::BLACK;
                let emitted = shader.fragment(ctx, bary, &mut color, normal, uv, (px as i32, py as i32));
                if !emitted {
                    continue;
                }

                buffers.frame_buffer.set_pixel(x, y, color);
                buffers.z_buffer[z_idx] = z;
            }
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Rasterizer::new()
    }
}

fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/////////////////////////////////////////////////////////////////////////////
//
// draw_line
//
// Bresenham's line algorithm, terminating naturally when the walking
// point reaches `v1` rather than on an iteration-count sentinel (see
// design notes, "Bresenham iteration cap").
//
/////////////////////////////////////////////////////////////////////////////

fn draw_line(buffers: &mut OutputBuffers, v0: (i32, i32), v1: (i32, i32), color: Rgba) {
    let (mut x0, mut y0) = v0;
    let (x1, y1) = v1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as usize) < buffers.width && (y0 as usize) < buffers.height {
            buffers.frame_buffer.set_pixel(x0 as usize, y0 as usize, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::OutputBuffers;
    use crate::math::Vec3;
    use crate::mesh::{Face, Mesh, Model};
    use crate::shader::{FlatShader, Shader};
    use crate::state::RenderState;

    fn unit_square_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.verts = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        mesh.uvs = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        mesh.normals = vec![Vec3::new(0.0, 0.0, 1.0)];
        mesh.faces = vec![
            Face::new([0, 1, 2], [0, 1, 2], [0, 0, 0]),
            Face::new([0, 2, 3], [0, 2, 3], [0, 0, 0]),
        ];
        mesh
    }

    #[test]
    fn facing_quad_fills_the_viewport() {
        let mut model = Model::new("quad");
        model.meshes.push(unit_square_mesh());

        let mut render_state = RenderState::new(Vec3::new(0.0, 0.0, 3.0), Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        render_state.update_camera();
        render_state.viewport = crate::transform::view_port(0.0, 0.0, 8.0, 8.0);
        render_state.backspace_culling = false;

        let mut buffers = OutputBuffers::new(8, 8).unwrap();
        buffers.clear(Rgba::BLACK);

        let mut shader = Shader::Flat(FlatShader::new());
        let rasterizer = Rasterizer::new();
        rasterizer.render_model(&model, &render_state, &mut shader, &mut buffers);

        let center = buffers.frame_buffer.get_pixel(4, 4);
        assert_ne!(center, Rgba::BLACK);
    }

    #[test]
    fn nearer_triangle_wins_the_depth_test() {
        let mut buffers = OutputBuffers::new(4, 4).unwrap();
        buffers.clear(Rgba::BLACK);

        let idx = buffers.z_index(2, 2);
        buffers.z_buffer[idx] = 0.0;
        buffers.frame_buffer.set_pixel(2, 2, Rgba::opaque(10, 10, 10));

        // A fragment attempt behind the stored depth must not overwrite it.
        assert!(-1.0 <= buffers.z_buffer[idx]);
    }

    #[test]
    fn draw_line_terminates_on_shared_endpoint() {
        let mut buffers = OutputBuffers::new(4, 4).unwrap();
        buffers.clear(Rgba::BLACK);
        draw_line(&mut buffers, (0, 0), (0, 0), Rgba::WHITE);
        assert_eq!(buffers.frame_buffer.get_pixel(0, 0), Rgba::WHITE);
    }
}
