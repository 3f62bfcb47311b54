//! A triangle mesh: vertex positions in model space plus triangle faces,
//! together with the model matrix that places the mesh in world space.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;
use crate::math::{Matrix4x4f, Vec3f};
use crate::obj;

pub struct Mesh {
    pub vertices: Vec<Vec3f>,
    pub faces: Vec<(usize, usize, usize)>,
    pub model_matrix: Matrix4x4f,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3f>, faces: Vec<(usize, usize, usize)>) -> Result<Self, Error> {
        for &(a, b, c) in &faces {
            for i in [a, b, c] {
                if i >= vertices.len() {
                    return Err(Error::OutOfBounds { what: "mesh face vertex", index: i, len: vertices.len() });
                }
            }
        }
        Ok(Self { vertices, faces, model_matrix: Matrix4x4f::identity() })
    }

    /// Load a mesh from a Wavefront OBJ file. The loaded mesh starts with
    /// an identity model matrix; callers compose `model_matrix` themselves
    /// if the mesh needs to be placed away from the origin.
    pub fn from_obj_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        let parsed = obj::parse(BufReader::new(file))?;
        Self::new(parsed.vertices, parsed.faces)
    }

    pub fn with_model_matrix(mut self, model_matrix: Matrix4x4f) -> Self {
        self.model_matrix = model_matrix;
        self
    }

    pub fn vertex(&self, i: usize) -> Result<Vec3f, Error> {
        self.vertices.get(i).copied().ok_or(Error::OutOfBounds { what: "mesh vertex", index: i, len: self.vertices.len() })
    }

    /// The geometric normal implied by a face's winding order, from three
    /// already-transformed positions (the renderer calls this with
    /// view-space vertices, but it's agnostic to which space `positions` is
    /// in). Fails on a degenerate (zero-area) face.
    pub fn face_normal_from_winding(face: (usize, usize, usize), positions: &[Vec3f]) -> Result<Vec3f, Error> {
        let (i, j, k) = face;
        let (v0, v1, v2) = (positions[i], positions[j], positions[k]);
        (v1 - v0).cross(v2 - v0).unit()
    }
}
