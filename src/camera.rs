use crate::error::Error;
use crate::math::{vec3f, Matrix4x4f, Vec3f};

/// Eye/target/up/fov/near/far camera, emitting the view and projection
/// matrices the renderer needs to take a mesh from world space to clip
/// space.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3f,
    pub target: Vec3f,
    pub up: Vec3f,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: vec3f(0.0, 0.0, -2.0),
            target: vec3f(0.0, 0.0, 0.0),
            up: vec3f(0.0, 1.0, 0.0),
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    /// Right-handed look-at. `z` is the forward axis (target - position),
    /// `x = unit(z cross up)`, `y = x cross z`. The translation column
    /// places the camera at the origin of the resulting space.
    ///
    /// Fails if `target == position` (no forward axis) or if `up` is
    /// parallel to the view direction (no well-defined `x` axis) — both
    /// surface as `Error::DegenerateMath` via the underlying `unit()` calls.
    pub fn view_matrix(&self) -> Result<Matrix4x4f, Error> {
        let z = (self.target - self.position).unit()?;
        let x = z.cross(self.up).unit()?;
        let y = x.cross(z);

        Ok(Matrix4x4f::from_rows([
            [x.x(), x.y(), x.z(), -x.dot(self.position)],
            [y.x(), y.y(), y.z(), -y.dot(self.position)],
            [z.x(), z.y(), z.z(), -z.dot(self.position)],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Standard finite perspective projection. `aspect = width / height`.
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4x4f {
        let fov_rad = self.fov_deg * std::f32::consts::PI / 180.0;
        let e = 1.0 / (fov_rad / 2.0).tan();
        let (near, far) = (self.near, self.far);

        Matrix4x4f::from_rows([
            [e / aspect, 0.0, 0.0, 0.0],
            [0.0, e, 0.0, 0.0],
            [0.0, 0.0, -(far + near) / (near - far), -2.0 * far * near / (near - far)],
            [0.0, 0.0, -1.0, 1.0],
        ])
    }
}
