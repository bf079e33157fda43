//! Illustrative host: builds a textured cube in memory, drives one frame
//! through `raster_core`, runs a post-process pass, and saves the result
//! as a PNG. No asset loading — the checker texture and geometry are
//! synthesized here, since decoding image files is out of scope for the
//! core crate.

use raster_core::math::{Vec2, Vec3};
use raster_core::{
    BlinnShader, ChromaticAberration, Face, Hsla, Image, Mesh, Model, Renderer, RenderState, Rgba, Scene, Shader, ScreenSpaceEffect,
};

fn checker_texture(size: usize, cell: usize, a: Rgba, b: Rgba) -> Image {
    let mut img = Image::new(size, size, 4).expect("non-zero, 4-channel image is always valid");
    for y in 0..size {
        for x in 0..size {
            let on_a = ((x / cell) + (y / cell)) % 2 == 0;
            img.set_pixel(x, y, if on_a { a } else { b });
        }
    }
    img
}

fn cube_mesh(diffuse: Image) -> Mesh {
    let mut mesh = Mesh::new();

    mesh.verts = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
    ];

    mesh.uvs = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];

    mesh.normals = vec![
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];

    let quad = |a: usize, b: usize, c: usize, d: usize, n: usize| {
        [Face::new([a, b, c], [0, 1, 2], [n, n, n]), Face::new([a, c, d], [0, 2, 3], [n, n, n])]
    };

    mesh.faces = [
        quad(0, 1, 2, 3, 0), // back
        quad(5, 4, 7, 6, 1), // front
        quad(4, 0, 3, 7, 2), // left
        quad(1, 5, 6, 2, 3), // right
        quad(4, 5, 1, 0, 4), // bottom
        quad(3, 2, 6, 7, 5), // top
    ]
    .into_iter()
    .flatten()
    .collect();

    mesh.diffuse = Some(diffuse);
    mesh
}

fn save_png(image: &Image, path: &str) -> image::ImageResult<()> {
    let mut buf = image::RgbaImage::new(image.width as u32, image.height as u32);
    for y in 0..image.height {
        // `raster_core::Image` puts row 0 at the bottom; PNG rows run
        // top-to-bottom, so the write flips vertically.
        let dst_y = image.height - 1 - y;
        for x in 0..image.width {
            let p = image.get_pixel(x, y);
            buf.put_pixel(x as u32, dst_y as u32, image::Rgba([p.r, p.g, p.b, p.a]));
        }
    }
    buf.save(path)
}

fn main() {
    let diffuse = checker_texture(64, 8, Rgba::opaque(220, 220, 220), Rgba::opaque(40, 40, 60));
    let mesh = cube_mesh(diffuse);

    let mut model = Model::new("demo cube");
    model.author = "raster_core demo".into();
    model.initial_rotation = Vec3::new(20.0, 35.0, 0.0);
    model.background = Hsla::new(0.6, 0.5, 0.2, 1.0);
    model.text_color = Rgba::WHITE;
    model.meshes.push(mesh);

    let rotation = raster_core::transform::rot_y(model.initial_rotation.y) * raster_core::transform::rot_x(model.initial_rotation.x);
    for m in model.meshes.iter_mut() {
        for v in m.verts.iter_mut() {
            let rotated = rotation * v.project_4d(1.0);
            *v = rotated.project_3d();
        }
        for n in m.normals.iter_mut() {
            let rotated = rotation.upper3x3() * *n;
            *n = rotated.normalise();
        }
    }

    let mut scene = Scene::new();
    scene.add(model);

    let width = 512;
    let height = 512;
    let render_state = RenderState::new(
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::zero(),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.6, 0.8, 0.4),
    );

    let mut renderer = Renderer::new(width, height, render_state).expect("512x512 RGBA buffers are always constructible");
    renderer.render_state.viewport = raster_core::transform::view_port(0.0, 0.0, width as f32, height as f32);

    renderer.begin_frame(Rgba::opaque(15, 15, 20));
    renderer.draw_scene(&scene, |_| Shader::Blinn(BlinnShader::new()));
    renderer.apply_post_process(&[ScreenSpaceEffect::ChromaticAberration(ChromaticAberration::default())]);

    save_png(renderer.frame_buffer(), "demo_frame.png").expect("writing demo_frame.png");
    debug_print::debug_println!("wrote demo_frame.png ({width}x{height})");
}
