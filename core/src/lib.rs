//! CPU software rasterizer: linear algebra, transform builders, a
//! triangle rasterizer with perspective-correct interpolation, built-in
//! shaders, and screen-space post-process effects.
//!
//! Nothing in this crate touches a GPU, a window, or a file. Image I/O,
//! asset loading, and presenting frames to a screen are host concerns,
//! left to whatever binary links against this one.

pub mod buffers;
pub mod color;
pub mod error;
pub mod image;
pub mod math;
pub mod mesh;
pub mod post;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod state;
pub mod transform;

pub use buffers::OutputBuffers;
pub use color::{Hsla, Rgba};
pub use error::{Error, Result};
pub use image::Image;
pub use mesh::{Face, Mesh, Model};
pub use post::{ChromaticAberration, JumboPixels, ScreenSpaceEffect, SobelEdge};
pub use raster::Rasterizer;
pub use renderer::Renderer;
pub use scene::Scene;
pub use shader::{BlinnShader, FlatShader, PassContext, Shader};
pub use state::RenderState;
