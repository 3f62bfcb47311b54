//! The `Renderer`: orchestrates the pipeline from mesh + camera down to
//! filled or wireframed pixels.

use crate::camera::Camera;
use crate::color::{self, Color3};
use crate::dispatch::parallel_for;
use crate::error::Error;
use crate::math::{vec3f, Matrix4x4f, Vec3f};
use crate::mesh::Mesh;
use crate::rasterizer::{draw_triangle, draw_triangle_filled, DepthBuffer, FrameBuffer};

/// Shading mode. A closed, exhaustively-matched set — the core never opens
/// this up to user-supplied shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Wireframe,
    Shaded,
    Normals,
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "wireframe" => Ok(Mode::Wireframe),
            "shaded" => Ok(Mode::Shaded),
            "normals" => Ok(Mode::Normals),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

pub struct Renderer {
    pub backface_cull: bool,
    pub wireframe_color: Color3,
    pub worker_count: Option<usize>,
    depthbuffer: Option<DepthBuffer>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { backface_cull: false, wireframe_color: color::white(), worker_count: None, depthbuffer: None }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn depthbuffer(&mut self, width: usize, height: usize) -> &DepthBuffer {
        let needs_alloc = match &self.depthbuffer {
            Some(db) => db.width() != width || db.height() != height,
            None => true,
        };
        if needs_alloc {
            self.depthbuffer = Some(DepthBuffer::new(width, height));
        } else if let Some(db) = &mut self.depthbuffer {
            db.clear();
        }
        self.depthbuffer.as_ref().unwrap()
    }

    /// Render one or more meshes into `framebuffer` under `camera` using
    /// `mode`. Borrows all inputs; returns nothing but propagates a
    /// degenerate-camera error.
    pub fn draw(&mut self, meshes: &[Mesh], camera: &Camera, framebuffer: &mut FrameBuffer, mode: Mode) -> Result<(), Error> {
        let width = framebuffer.width();
        let height = framebuffer.height();
        let aspect = width as f32 / height as f32;

        let view = camera.view_matrix()?;
        let projection = camera.projection_matrix(aspect);

        log::debug!("draw: {}x{} mode={:?} meshes={}", width, height, mode, meshes.len());

        let backface_cull = self.backface_cull;
        let wireframe_color = self.wireframe_color;
        let worker_count = self.worker_count;

        let depthbuffer = self.depthbuffer(width, height);
        let framebuffer_ref: &FrameBuffer = framebuffer;

        for mesh in meshes {
            let world_transform = view * mesh.model_matrix;
            let view_space: Vec<Vec3f> =
                mesh.vertices.iter().map(|&v| (world_transform * v.extend(1.0)).xyz()).collect();

            let ndc: Vec<Vec3f> = view_space
                .iter()
                .map(|&v| {
                    let clip = projection * v.extend(1.0);
                    (clip.xyz()) / clip.w()
                })
                .collect();

            parallel_for(0, mesh.faces.len(), worker_count, |face_idx| {
                let face = mesh.faces[face_idx];
                let (i, j, k) = face;
                let Ok(normal) = Mesh::face_normal_from_winding(face, &view_space) else {
                    log::trace!("face {face_idx}: degenerate normal, skipping");
                    return;
                };

                let (n0, n1, n2) = (ndc[i], ndc[j], ndc[k]);

                match mode {
                    Mode::Wireframe => {
                        draw_triangle(n0, n1, n2, framebuffer_ref, depthbuffer, wireframe_color);
                    }
                    Mode::Shaded => {
                        let light = vec3f(1.0, 1.0, 1.0).unit().expect("nonzero light direction");
                        let intensity = normal.dot(light).max(0.01);
                        let color = vec3f(intensity, intensity, intensity);
                        draw_triangle_filled(n0, n1, n2, framebuffer_ref, depthbuffer, color, backface_cull);
                    }
                    Mode::Normals => {
                        let color = vec3f(normal.x().abs(), normal.y().abs(), normal.z().abs());
                        draw_triangle_filled(n0, n1, n2, framebuffer_ref, depthbuffer, color, backface_cull);
                    }
                }
            });
        }

        Ok(())
    }
}

/// Composes a model matrix from translation only — the common case for
/// placing a loaded mesh in the scene. Kept separate from `Mesh` so meshes
/// stay plain data; callers that need rotation/scale compose their own
/// `Matrix4x4f` via `crate::math::{rotation_x, rotation_y, rotation_z, scale}`.
pub fn translate(position: Vec3f) -> Matrix4x4f {
    crate::math::translation(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3f;

    fn unit_triangle_mesh() -> Mesh {
        let vertices = vec![vec3f(-1.0, -1.0, 0.0), vec3f(1.0, -1.0, 0.0), vec3f(0.0, 1.0, 0.0)];
        Mesh::new(vertices, vec![(0, 1, 2)]).unwrap()
    }

    #[test]
    fn mode_from_str_accepts_the_closed_set() {
        assert_eq!("wireframe".parse::<Mode>().unwrap(), Mode::Wireframe);
        assert_eq!("shaded".parse::<Mode>().unwrap(), Mode::Shaded);
        assert_eq!("normals".parse::<Mode>().unwrap(), Mode::Normals);
        assert!("glow".parse::<Mode>().is_err());
    }

    #[test]
    fn single_pixel_shaded_triangle_is_non_black() {
        let mesh = unit_triangle_mesh();
        let camera = Camera { position: vec3f(0.0, 0.0, -3.0), ..Camera::default() };
        let mut fb = FrameBuffer::new(1, 1);
        let mut renderer = Renderer::new();

        renderer.draw(&[mesh], &camera, &mut fb, Mode::Shaded).unwrap();
        assert_ne!(fb.get(0, 0).unwrap(), color::black());
    }

    #[test]
    fn model_matrix_translates_the_mesh_out_of_view() {
        let camera = Camera { position: vec3f(0.0, 0.0, -3.0), ..Camera::default() };
        let mut renderer = Renderer::new();

        let mut fb_at_origin = FrameBuffer::new(16, 16);
        renderer.draw(&[unit_triangle_mesh()], &camera, &mut fb_at_origin, Mode::Shaded).unwrap();
        let origin_drew_something = (0..16).flat_map(|y| (0..16).map(move |x| (x, y))).any(|(x, y)| fb_at_origin.get(x, y).unwrap() != color::black());
        assert!(origin_drew_something);

        let moved = unit_triangle_mesh().with_model_matrix(translate(vec3f(50.0, 0.0, 0.0)));
        let mut fb_moved_away = FrameBuffer::new(16, 16);
        renderer.draw(&[moved], &camera, &mut fb_moved_away, Mode::Shaded).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(fb_moved_away.get(x, y).unwrap(), color::black());
            }
        }
    }

    #[test]
    fn empty_scene_leaves_the_clear_color() {
        let mut fb = FrameBuffer::new(16, 16);
        let camera = Camera::default();
        let mut renderer = Renderer::new();

        renderer.draw(&[], &camera, &mut fb, Mode::Shaded).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(fb.get(x, y).unwrap(), color::black());
            }
        }
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let mesh = unit_triangle_mesh();
        let camera = Camera { position: vec3f(0.0, 0.0, -3.0), ..Camera::default() };

        let mut fb1 = FrameBuffer::new(32, 32);
        let mut r1 = Renderer::new();
        r1.draw(&[unit_triangle_mesh()], &camera, &mut fb1, Mode::Shaded).unwrap();

        let mut fb2 = FrameBuffer::new(32, 32);
        let mut r2 = Renderer::new();
        r2.draw(&[mesh], &camera, &mut fb2, Mode::Shaded).unwrap();

        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(fb1.get(x, y).unwrap(), fb2.get(x, y).unwrap());
            }
        }
    }

    #[test]
    fn nearer_triangle_occludes_farther_one() {
        // Two overlapping, camera-facing quads at different depths: the
        // nearer one must win every shared pixel, regardless of draw order.
        let near = Mesh::new(
            vec![vec3f(-1.0, -1.0, 1.0), vec3f(1.0, -1.0, 1.0), vec3f(0.0, 1.0, 1.0)],
            vec![(0, 1, 2)],
        )
        .unwrap();
        let far = Mesh::new(
            vec![vec3f(-1.0, -1.0, -1.0), vec3f(1.0, -1.0, -1.0), vec3f(0.0, 1.0, -1.0)],
            vec![(0, 1, 2)],
        )
        .unwrap();
        let camera = Camera { position: vec3f(0.0, 0.0, -5.0), ..Camera::default() };

        let clone = |m: &Mesh| Mesh::new(m.vertices.clone(), m.faces.clone()).unwrap();

        let mut fb_near_first = FrameBuffer::new(32, 32);
        Renderer::new().draw(&[clone(&near), clone(&far)], &camera, &mut fb_near_first, Mode::Normals).unwrap();

        let mut fb_far_first = FrameBuffer::new(32, 32);
        Renderer::new().draw(&[clone(&far), clone(&near)], &camera, &mut fb_far_first, Mode::Normals).unwrap();

        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(
                    fb_near_first.get(x, y).unwrap(),
                    fb_far_first.get(x, y).unwrap(),
                    "pixel ({x},{y}) depends on draw order"
                );
            }
        }
    }

    #[test]
    fn parallel_and_sequential_renders_agree() {
        let mesh = unit_triangle_mesh();
        let camera = Camera { position: vec3f(0.0, 0.0, -3.0), ..Camera::default() };

        let mut fb_seq = FrameBuffer::new(64, 64);
        let mut r_seq = Renderer { worker_count: Some(1), ..Renderer::new() };
        r_seq.draw(&[unit_triangle_mesh()], &camera, &mut fb_seq, Mode::Shaded).unwrap();

        let mut fb_par = FrameBuffer::new(64, 64);
        let mut r_par = Renderer { worker_count: Some(8), ..Renderer::new() };
        r_par.draw(&[mesh], &camera, &mut fb_par, Mode::Shaded).unwrap();

        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(fb_seq.get(x, y).unwrap(), fb_par.get(x, y).unwrap());
            }
        }
    }
}
