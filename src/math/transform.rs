use crate::math::matrix::Matrix4x4f;
use crate::math::vector::Vec3f;

pub fn translation(v: Vec3f) -> Matrix4x4f {
    Matrix4x4f::from_rows([
        [1.0, 0.0, 0.0, v.x()],
        [0.0, 1.0, 0.0, v.y()],
        [0.0, 0.0, 1.0, v.z()],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn scale(s: f32) -> Matrix4x4f {
    Matrix4x4f::from_rows([
        [s, 0.0, 0.0, 0.0],
        [0.0, s, 0.0, 0.0],
        [0.0, 0.0, s, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_x(rad: f32) -> Matrix4x4f {
    Matrix4x4f::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, rad.cos(), -rad.sin(), 0.0],
        [0.0, rad.sin(), rad.cos(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_y(rad: f32) -> Matrix4x4f {
    Matrix4x4f::from_rows([
        [rad.cos(), 0.0, rad.sin(), 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-rad.sin(), 0.0, rad.cos(), 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_z(rad: f32) -> Matrix4x4f {
    Matrix4x4f::from_rows([
        [rad.cos(), -rad.sin(), 0.0, 0.0],
        [rad.sin(), rad.cos(), 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
