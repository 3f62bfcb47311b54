use crate::math::Vec2f;

/// Integer pixel bounding box of a screen-space triangle, clamped to a
/// framebuffer's extent. `max_x`/`max_y` are exclusive, matching Rust range
/// conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBoundingBox {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl PixelBoundingBox {
    /// Bounding box of the three points, clamped to `[0, width) x [0, height)`.
    pub fn clamped(vertices: &[Vec2f; 3], width: usize, height: usize) -> Self {
        let (min_x, max_x, min_y, max_y) = vertices.iter().fold(
            (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
            |(min_x, max_x, min_y, max_y), p| (min_x.min(p.x()), max_x.max(p.x()), min_y.min(p.y()), max_y.max(p.y())),
        );

        let min_x = (min_x.floor().max(0.0) as usize).min(width);
        let min_y = (min_y.floor().max(0.0) as usize).min(height);
        let max_x = (max_x.ceil().max(0.0) as usize).min(width);
        let max_y = (max_y.ceil().max(0.0) as usize).min(height);

        Self { min_x, max_x, min_y, max_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2f;

    #[test]
    fn bounding_box_inside_the_framebuffer() {
        let points = [vec2f(100.0, 200.0), vec2f(230.0, 200.0), vec2f(230.0, 300.0)];
        let bb = PixelBoundingBox::clamped(&points, 1000, 1000);
        assert_eq!(bb, PixelBoundingBox { min_x: 100, max_x: 230, min_y: 200, max_y: 300 });
    }

    #[test]
    fn bounding_box_is_clamped_to_the_framebuffer() {
        let points = [vec2f(-50.0, -10.0), vec2f(230.0, 100.0), vec2f(500.0, 900.0)];
        let bb = PixelBoundingBox::clamped(&points, 400, 400);
        assert_eq!(bb, PixelBoundingBox { min_x: 0, max_x: 400, min_y: 0, max_y: 400 });
    }
}
