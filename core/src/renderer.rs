//! Top-level entry point: owns the output buffers and render state
//! explicitly (no global mutable statics, see design notes, "Global
//! mutable state") and orchestrates clear -> draw -> post-process for a
//! frame.

use debug_print::debug_println;

use crate::buffers::OutputBuffers;
use crate::color::Rgba;
use crate::error::Result;
use crate::post::ScreenSpaceEffect;
use crate::raster::Rasterizer;
use crate::scene::Scene;
use crate::shader::Shader;
use crate::state::RenderState;

pub struct Renderer {
    pub buffers: OutputBuffers,
    pub render_state: RenderState,
    rasterizer: Rasterizer,
}

impl Renderer {
    pub fn new(width: usize, height: usize, render_state: RenderState) -> Result<Renderer> {
        Ok(Renderer {
            buffers: OutputBuffers::new(width, height)?,
            render_state,
            rasterizer: Rasterizer::new(),
        })
    }

    pub fn begin_frame(&mut self, clear_color: Rgba) {
        debug_println!("begin_frame: {}x{}", self.buffers.width, self.buffers.height);
        self.render_state.update_camera();
        self.buffers.clear(clear_color);
    }

    pub fn draw_scene(&mut self, scene: &Scene, shader_for_model: impl Fn(&crate::mesh::Model) -> Shader) {
        debug_println!("draw_scene: {} models", scene.models.len());
        for model in &scene.models {
            let mut shader = shader_for_model(model);
            self.rasterizer.render_model(model, &self.render_state, &mut shader, &mut self.buffers);
        }
    }

    pub fn apply_post_process(&mut self, effects: &[ScreenSpaceEffect]) {
        debug_println!("apply_post_process: {} effects", effects.len());
        for effect in effects {
            crate::post::apply_post_process(effect, &mut self.buffers);
        }
    }

    pub fn frame_buffer(&self) -> &crate::image::Image {
        &self.buffers.frame_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsla;
    use crate::math::Vec3;
    use crate::mesh::{Face, Mesh, Model};
    use crate::shader::FlatShader;

    fn quad_model() -> Model {
        let mut mesh = Mesh::new();
        mesh.verts = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        mesh.uvs = vec![
            crate::math::Vec2::zero(),
            crate::math::Vec2::new(1.0, 0.0),
            crate::math::Vec2::new(1.0, 1.0),
            crate::math::Vec2::new(0.0, 1.0),
        ];
        mesh.normals = vec![Vec3::new(0.0, 0.0, 1.0)];
        mesh.faces = vec![Face::new([0, 1, 2], [0, 1, 2], [0, 0, 0]), Face::new([0, 2, 3], [0, 2, 3], [0, 0, 0])];

        let mut model = Model::new("quad");
        model.background = Hsla::new(0.5, 0.8, 0.5, 1.0);
        model.meshes.push(mesh);
        model
    }

    #[test]
    fn full_frame_draws_and_commits_without_panicking() {
        let render_state = RenderState::new(Vec3::new(0.0, 0.0, 3.0), Vec3::zero(), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let mut renderer = Renderer::new(16, 16, render_state).unwrap();
        renderer.render_state.viewport = crate::transform::view_port(0.0, 0.0, 16.0, 16.0);
        renderer.render_state.backspace_culling = false;

        let mut scene = Scene::new();
        scene.add(quad_model());

        renderer.begin_frame(Rgba::BLACK);
        renderer.draw_scene(&scene, |_| Shader::Flat(FlatShader::new()));
        renderer.apply_post_process(&[]);

        assert_ne!(renderer.frame_buffer().get_pixel(8, 8), Rgba::BLACK);
    }
}
