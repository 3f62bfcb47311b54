//! Fixed-size vector and matrix math used throughout the pipeline.
//!
//! Earlier revisions of this module were generic over a phantom
//! coordinate-space type parameter (`Vector<WorldSpace, 3>` and friends) so
//! that the compiler could catch transforms applied in the wrong space. That
//! approach never got past a handful of `unimplemented!()` stubs, so this
//! module sticks to plain `Vector<T, N>` / `Matrix<T, R, C>` and leaves space
//! tracking to the pipeline stages in `render.rs`, which apply transforms in
//! a fixed, documented order.

pub mod matrix;
pub mod transform;
pub mod vector;

pub use matrix::{Matrix, Matrix4x4f};
pub use transform::{rotation_x, rotation_y, rotation_z, scale, translation};
pub use vector::{vec2f, vec3f, vec4f, Color3, Vec2f, Vec3f, Vec4f, Vector};
