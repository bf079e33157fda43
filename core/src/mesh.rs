//! The mesh/model data model: parallel per-mesh vertex arrays addressed by
//! per-face index triples, and the model that groups meshes sharing one
//! transform.

use crate::color::{Hsla, Rgba};
use crate::image::Image;
use crate::math::{Vec2, Vec3};

/////////////////////////////////////////////////////////////////////////////
//
// Face
//
// Three index triples addressing a mesh's parallel `verts`/`uvs`/`normals`
// arrays — not a single shared vertex table. `pos`, `uv` and `normal` each
// hold the three corner indices in the same winding order.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub pos: [usize; 3],
    pub uv: [usize; 3],
    pub normal: [usize; 3],
}

impl Face {
    pub const fn new(pos: [usize; 3], uv: [usize; 3], normal: [usize; 3]) -> Self {
        Face { pos, uv, normal }
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// Mesh
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub verts: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,

    pub diffuse: Option<Image>,
    pub normal_map: Option<Image>,
    pub spec_map: Option<Image>,

    // Disables shading entirely for meshes meant as flat overlays (e.g.
    // UI backplates baked into the same pipeline — out of scope for the
    // core itself, but the flag is honored regardless of who sets it).
    pub allow_lighting: bool,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh { allow_lighting: true, ..Default::default() }
    }

    pub fn has_normal_map(&self) -> bool {
        self.normal_map.is_some()
    }

    pub fn has_specular_map(&self) -> bool {
        self.spec_map.is_some()
    }

    pub fn sample_diffuse(&self, uv: Vec2) -> Rgba {
        match &self.diffuse {
            Some(img) => img.sample_nearest(uv.x, uv.y),
            None => Rgba::WHITE,
        }
    }

    pub fn sample_normal_map(&self, uv: Vec2) -> Rgba {
        match &self.normal_map {
            Some(img) => img.sample_nearest(uv.x, uv.y),
            None => Rgba::new(128, 128, 255, 255),
        }
    }

    pub fn sample_spec_map(&self, uv: Vec2) -> Rgba {
        match &self.spec_map {
            Some(img) => img.sample_nearest(uv.x, uv.y),
            None => Rgba::BLACK,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
//
// Model
//
// An ordered sequence of meshes that share a single transform, plus the
// metadata an (out-of-scope) UI layer displays alongside it.
//
/////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub author: String,
    pub url: String,
    pub meshes: Vec<Mesh>,
    pub initial_rotation: Vec3,
    pub background: Hsla,
    pub text_color: Rgba,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            author: String::new(),
            url: String::new(),
            meshes: Vec::new(),
            initial_rotation: Vec3::zero(),
            background: Hsla::new(0.0, 0.0, 0.0, 1.0),
            text_color: Rgba::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_without_textures_samples_sane_defaults() {
        let mesh = Mesh::new();
        assert_eq!(mesh.sample_diffuse(Vec2::new(0.5, 0.5)), Rgba::WHITE);
        assert!(!mesh.has_normal_map());
        assert!(!mesh.has_specular_map());
    }
}
