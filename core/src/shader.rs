//! Per-pass/per-vertex/per-fragment shader contract.
//!
//! `Shader` is implemented as a tagged enum over a finite, known set of
//! variants rather than a trait object: the rasterizer statically knows
//! every shader it might dispatch to, so a sum type with an explicit
//! match is preferred over dynamic dispatch (see design notes, "Virtual
//! dispatch"). Per-pass scratch state lives inside each variant.
//!
//! `model`/`mesh`/`render_state` are never stored inside a shader variant
//! — the rasterizer builds a `PassContext` once per mesh and passes it by
//! reference into `begin_pass`/`vertex`/`fragment`, avoiding the cyclic
//! back-references the original C++ `shader` base class carried (see
//! design notes, "Cyclic references").

use crate::color::Rgba;
use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::mesh::{Mesh, Model};
use crate::state::RenderState;

pub struct PassContext<'a> {
    pub model: &'a Model,
    pub mesh: &'a Mesh,
    pub render_state: &'a RenderState,
}

pub enum Shader {
    Blinn(BlinnShader),
    Flat(FlatShader),
}

impl Shader {
    pub fn name(&self) -> &'static str {
        match self {
            Shader::Blinn(s) => s.name(),
            Shader::Flat(s) => s.name(),
        }
    }

    pub fn begin_pass(&mut self, ctx: &PassContext) {
        match self {
            Shader::Blinn(s) => s.begin_pass(ctx),
            Shader::Flat(s) => s.begin_pass(ctx),
        }
    }

    pub fn vertex(&mut self, ctx: &PassContext, vertex_position: Vec3, face_index: usize, vertex_index: usize) -> Vec4 {
        match self {
            Shader::Blinn(s) => s.vertex(ctx, vertex_position, face_index, vertex_index),
            Shader::Flat(s) => s.vertex(ctx, vertex_position, face_index, vertex_index),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fragment(
        &mut self,
        ctx: &PassContext,
        bary: Vec3,
        out_color: &mut Rgba,
        interpolated_normal: Vec3,
        interpolated_uv: Vec2,
        screen_xy: (i32, i32),
    ) -> bool {
        match self {
            Shader::Blinn(s) => s.fragment(ctx, bary, out_color, interpolated_normal, interpolated_uv, screen_xy),
            Shader::Flat(s) => s.fragment(ctx, bary, out_color, interpolated_normal, interpolated_uv, screen_xy),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// BlinnShader
//
// Tangent-space normal-mapped Blinn shading. `begin_pass` caches the
// model-view-projection and inverse-transpose normal matrices; `vertex`
// additionally caches per-vertex NDC positions and uvs (keyed by
// `vertex_index`) whenever lighting and a normal map are both active, so
// `fragment` can reconstruct a per-fragment tangent frame from the
// position/uv deltas of the triangle's three corners.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct BlinnShader {
    model_view_proj: Mat4,
    normal_mat: Mat3,
    ndc_vertex: [Vec3; 3],
    vertex_uv: [Vec2; 3],
}

impl BlinnShader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        "Blinn Normal Map"
    }

    pub fn begin_pass(&mut self, ctx: &PassContext) {
        let combined = ctx.render_state.projection * ctx.render_state.model_view;
        self.normal_mat = combined.upper3x3().invert().transpose();
        self.model_view_proj = combined;
    }

    pub fn vertex(&mut self, ctx: &PassContext, vertex_position: Vec3, face_index: usize, vertex_index: usize) -> Vec4 {
        let clip = self.model_view_proj * vertex_position.project_4d(1.0);

        if ctx.mesh.allow_lighting && ctx.mesh.has_normal_map() {
            self.ndc_vertex[vertex_index] = clip.project_3d();
            let face = ctx.mesh.faces[face_index];
            self.vertex_uv[vertex_index] = ctx.mesh.uvs[face.uv[vertex_index]];
        }

        clip
    }

    pub fn fragment(
        &mut self,
        ctx: &PassContext,
        _bary: Vec3,
        out_color: &mut Rgba,
        interpolated_normal: Vec3,
        interpolated_uv: Vec2,
        _screen_xy: (i32, i32),
    ) -> bool {
        let diffuse_sample = ctx.mesh.sample_diffuse(interpolated_uv);
        *out_color = diffuse_sample;

        if !ctx.mesh.allow_lighting {
            return true;
        }

        let normal = if ctx.mesh.has_normal_map() {
            let lit_normal = self.normal_mat * interpolated_normal;

            let edge1 = self.ndc_vertex[1] - self.ndc_vertex[0];
            let edge2 = self.ndc_vertex[2] - self.ndc_vertex[0];
            let tbn_inverse = Mat3::from_rows([
                [edge1.x, edge1.y, edge1.z],
                [edge2.x, edge2.y, edge2.z],
                [lit_normal.x, lit_normal.y, lit_normal.z],
            ])
            .invert();

            let u_diff = Vec3::new(
                self.vertex_uv[1].x - self.vertex_uv[0].x,
                self.vertex_uv[2].x - self.vertex_uv[0].x,
                0.0,
            );
            let tangent = (tbn_inverse * u_diff).normalise();

            let v_diff = Vec3::new(
                self.vertex_uv[1].y - self.vertex_uv[0].y,
                self.vertex_uv[2].y - self.vertex_uv[0].y,
                0.0,
            );
            let bitangent = (tbn_inverse * v_diff).normalise();

            let tbn = Mat3::from_rows([
                [tangent.x, tangent.y, tangent.z],
                [bitangent.x, bitangent.y, bitangent.z],
                [lit_normal.x, lit_normal.y, lit_normal.z],
            ])
            .transpose();

            let sample = ctx.mesh.sample_normal_map(interpolated_uv).as_floats();
            let tangent_space_normal = Vec3::new(sample[0] * 2.0 - 1.0, sample[1] * 2.0 - 1.0, sample[2] * 2.0 - 1.0);

            (tbn * tangent_space_normal).normalise()
        } else {
            self.normal_mat * interpolated_normal
        };

        let light = ctx.render_state.light_dir;
        let diffuse_term = normal.dot(light).max(0.0);

        let spec_term = if ctx.mesh.has_specular_map() {
            let spec_sample = ctx.mesh.sample_spec_map(interpolated_uv);
            let reflected = (normal * (2.0 * normal.dot(light)) - light).normalise();
            let rz = reflected.z.max(0.0);
            rz.powf(5.0 + spec_sample.b as f32)
        } else {
            0.0
        };

        let lit = diffuse_sample.scale_saturating(1.2 * diffuse_term + 0.6 * spec_term);
        *out_color = lit.add_saturating(diffuse_sample.scale_saturating(0.15));

        true
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// FlatShader
//
// No texture sampling. The fragment stage is a stylized "sheen or grid"
// effect driven purely by the model's background hue and a reflection
// z-term, grounded on `original_source/src/shaders.cpp`'s `flat_shader`.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
pub struct FlatShader {
    model_view_proj: Mat4,
    normal_mat: Mat3,
    light: Vec3,
}

impl FlatShader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        "Flat"
    }

    pub fn begin_pass(&mut self, ctx: &PassContext) {
        self.light = (ctx.render_state.model_view.upper3x3() * ctx.render_state.light_dir).normalise();
        let combined = ctx.render_state.projection * ctx.render_state.model_view;
        self.normal_mat = combined.upper3x3().invert().transpose();
        self.model_view_proj = combined;
    }

    pub fn vertex(&mut self, _ctx: &PassContext, vertex_position: Vec3, _face_index: usize, _vertex_index: usize) -> Vec4 {
        self.model_view_proj * vertex_position.project_4d(1.0)
    }

    pub fn fragment(
        &mut self,
        ctx: &PassContext,
        _bary: Vec3,
        out_color: &mut Rgba,
        interpolated_normal: Vec3,
        _interpolated_uv: Vec2,
        screen_xy: (i32, i32),
    ) -> bool {
        let normal = self.normal_mat * interpolated_normal;
        let reflect_z_term = 1.0 - (normal * (2.0 * normal.dot(self.light)) - self.light).normalise().z;

        if reflect_z_term > 0.5 {
            let mut sheen = ctx.model.background;
            sheen.l -= 0.3;
            sheen.s -= 0.4;
            sheen.h = sheen.complementary_hue();
            *out_color = sheen.to_rgba();
            return true;
        }

        if screen_xy.0 % 4 == 0 || screen_xy.1 % 4 == 0 {
            *out_color = ctx.model.background.to_rgba();
            return true;
        }

        let mut shaded = ctx.model.background;
        shaded.l -= 0.1;
        shaded.h = shaded.complementary_hue();
        *out_color = shaded.to_rgba();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Mesh, Model};

    fn test_context<'a>(model: &'a Model, mesh: &'a Mesh, render_state: &'a RenderState) -> PassContext<'a> {
        PassContext { model, mesh, render_state }
    }

    #[test]
    fn blinn_shader_without_lighting_returns_diffuse_unchanged() {
        let mut mesh = Mesh::new();
        mesh.allow_lighting = false;
        let model = Model::new("test");
        let render_state = RenderState::new(Vec3::new(0.0, 0.0, 3.0), Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let ctx = test_context(&model, &mesh, &render_state);

        let mut shader = BlinnShader::new();
        shader.begin_pass(&ctx);

        let mut color = Rgba::BLACK;
        let emit = shader.fragment(&ctx, Vec3::new(1.0, 0.0, 0.0), &mut color, Vec3::new(0.0, 0.0, 1.0), Vec2::zero(), (0, 0));
        assert!(emit);
        assert_eq!(color, Rgba::WHITE);
    }

    #[test]
    fn flat_shader_grid_lines_use_background_hue() {
        let mesh = Mesh::new();
        let mut model = Model::new("test");
        model.background = crate::color::Hsla::new(0.2, 0.5, 0.5, 1.0);
        let mut render_state = RenderState::new(Vec3::new(0.0, 0.0, 3.0), Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        render_state.model_view = crate::math::Mat4::identity();
        let ctx = test_context(&model, &mesh, &render_state);

        let mut shader = FlatShader::new();
        shader.begin_pass(&ctx);

        let mut color = Rgba::BLACK;
        // Pointing the normal away from the light keeps us off the sheen branch.
        shader.fragment(&ctx, Vec3::new(1.0, 0.0, 0.0), &mut color, Vec3::new(0.0, 0.0, -1.0), Vec2::zero(), (4, 1));
        assert_eq!(color, model.background.to_rgba());
    }
}
