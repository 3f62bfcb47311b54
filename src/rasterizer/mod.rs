//! Line and triangle rasterization: the per-face primitives the renderer
//! drives the pipeline with. Everything here operates in NDC in, screen
//! pixels out; the renderer owns vertex transforms and shading.

mod bounding_box;
mod buffers;

pub use bounding_box::PixelBoundingBox;
pub use buffers::{DepthBuffer, FrameBuffer};

use crate::color::Color3;
use crate::math::{vec2f, Vec2f, Vec3f};

const DEGENERATE_AREA_EPS: f32 = 1e-6;

fn to_screen_space(ndc: Vec3f, width: usize, height: usize) -> (f32, f32, f32) {
    let x = (ndc.x() + 1.0) * 0.5 * width as f32;
    let y = (1.0 - ndc.y()) * 0.5 * height as f32;
    (x, y, ndc.z())
}

/// Twice the signed area of `(a, b, c)`, via the shoelace formula.
fn signed_area(a: Vec2f, b: Vec2f, c: Vec2f) -> f32 {
    0.5 * ((b.y() - a.y()) * (b.x() + a.x()) + (c.y() - b.y()) * (c.x() + b.x()) + (a.y() - c.y()) * (a.x() + c.x()))
}

/// Whether a screen-space triangle's winding marks it as facing away from
/// the camera. Positive signed area is front-facing by convention here —
/// see DESIGN.md for why.
pub fn is_back_facing(a: Vec2f, b: Vec2f, c: Vec2f) -> bool {
    signed_area(a, b, c) < 0.0
}

/// Bresenham-style DDA from `a` to `b` (both NDC), writing through the
/// given pixel's depth lock so concurrent lines from other faces never
/// race on a shared pixel. The depth value used is `+inf`: lines don't
/// participate in the depth test, they just need the same mutual
/// exclusion the fill rasterizer already pays for.
pub fn draw_line(a: Vec3f, b: Vec3f, framebuffer: &FrameBuffer, depthbuffer: &DepthBuffer, color: Color3) {
    let (ax, ay, _) = to_screen_space(a, framebuffer.width(), framebuffer.height());
    let (bx, by, _) = to_screen_space(b, framebuffer.width(), framebuffer.height());

    let transpose = (ay - by).abs() > (ax - bx).abs();
    let (mut p0, mut p1) = if transpose { ((ay, ax), (by, bx)) } else { ((ax, ay), (bx, by)) };
    if p0.0 > p1.0 {
        std::mem::swap(&mut p0, &mut p1);
    }

    let x0 = p0.0.round() as i64;
    let x1 = p1.0.round() as i64;

    let mut plot = |x: i64, y: i64| {
        let (px, py) = if transpose { (y, x) } else { (x, y) };
        if px >= 0 && py >= 0 {
            depthbuffer.test_and_write(px as usize, py as usize, f32::INFINITY, color, framebuffer);
        }
    };

    if x0 == x1 {
        plot(x0, p0.1.round() as i64);
        return;
    }
    for x in x0..=x1 {
        let t = (x - x0) as f32 / (x1 - x0) as f32;
        let y = (p0.1 + t * (p1.1 - p0.1)).round() as i64;
        plot(x, y);
    }
}

/// Wireframe triangle: the three edges of `(a, b, c)`, each via `draw_line`.
pub fn draw_triangle(a: Vec3f, b: Vec3f, c: Vec3f, framebuffer: &FrameBuffer, depthbuffer: &DepthBuffer, color: Color3) {
    draw_line(a, b, framebuffer, depthbuffer, color);
    draw_line(b, c, framebuffer, depthbuffer, color);
    draw_line(c, a, framebuffer, depthbuffer, color);
}

/// Filled triangle via edge functions / barycentric coordinates. `a`, `b`,
/// `c` are NDC. Degenerate (zero-area) triangles are silently skipped, not
/// an error. `cull` discards back-facing triangles before rasterizing —
/// see [`is_back_facing`].
pub fn draw_triangle_filled(
    a: Vec3f,
    b: Vec3f,
    c: Vec3f,
    framebuffer: &FrameBuffer,
    depthbuffer: &DepthBuffer,
    color: Color3,
    cull: bool,
) {
    let (ax, ay, az) = to_screen_space(a, framebuffer.width(), framebuffer.height());
    let (bx, by, bz) = to_screen_space(b, framebuffer.width(), framebuffer.height());
    let (cx, cy, cz) = to_screen_space(c, framebuffer.width(), framebuffer.height());
    let (a2, b2, c2) = (vec2f(ax, ay), vec2f(bx, by), vec2f(cx, cy));

    if cull && is_back_facing(a2, b2, c2) {
        return;
    }

    let area = signed_area(a2, b2, c2);
    if area.abs() < DEGENERATE_AREA_EPS {
        return;
    }

    let bbox = PixelBoundingBox::clamped(&[a2, b2, c2], framebuffer.width(), framebuffer.height());
    for y in bbox.min_y..bbox.max_y {
        for x in bbox.min_x..bbox.max_x {
            let p = vec2f(x as f32, y as f32);
            let alpha = signed_area(p, b2, c2) / area;
            let beta = signed_area(a2, p, c2) / area;
            let gamma = signed_area(a2, b2, p) / area;

            if alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0 {
                let z = alpha * az + beta * bz + gamma * cz;
                depthbuffer.test_and_write(x, y, z, color, framebuffer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{black, red, white};
    use crate::math::vec3f;

    #[test]
    fn line_fidelity_horizontal_run() {
        let fb = FrameBuffer::new(16, 16);
        let db = DepthBuffer::new(16, 16);

        let to_ndc = |x: f32, y: f32| vec3f(x / 16.0 * 2.0 - 1.0, 1.0 - y / 16.0 * 2.0, 0.0);
        draw_line(to_ndc(2.0, 2.0), to_ndc(10.0, 2.0), &fb, &db, white());

        let mut lit = 0;
        for x in 0..16 {
            if fb.get(x, 2).unwrap() == white() {
                lit += 1;
            }
        }
        assert_eq!(lit, 9);
    }

    #[test]
    fn fill_equals_edges_for_a_right_triangle() {
        const N: usize = 16;
        let to_ndc = |x: f32, y: f32| vec3f(x / N as f32 * 2.0 - 1.0, 1.0 - y / N as f32 * 2.0, 0.0);

        let fb_fill = FrameBuffer::new(N, N);
        let db_fill = DepthBuffer::new(N, N);
        draw_triangle_filled(
            to_ndc(0.0, 0.0),
            to_ndc(10.0, 0.0),
            to_ndc(0.0, 10.0),
            &fb_fill,
            &db_fill,
            red(),
            false,
        );

        let fb_wire = FrameBuffer::new(N, N);
        let db_wire = DepthBuffer::new(N, N);
        draw_triangle(to_ndc(0.0, 0.0), to_ndc(10.0, 0.0), to_ndc(0.0, 10.0), &fb_wire, &db_wire, red());

        for y in 0..N {
            for x in 0..N {
                if fb_wire.get(x, y).unwrap() == red() {
                    assert_eq!(fb_fill.get(x, y).unwrap(), red(), "boundary pixel ({x},{y}) not filled");
                }
            }
        }
    }

    #[test]
    fn degenerate_triangle_writes_nothing() {
        let fb = FrameBuffer::new(8, 8);
        let db = DepthBuffer::new(8, 8);
        let p = vec3f(0.0, 0.0, 0.0);
        draw_triangle_filled(p, p, p, &fb, &db, white(), false);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(fb.get(x, y).unwrap(), black());
            }
        }
    }

    #[test]
    fn cull_discards_back_facing_triangles() {
        let fb = FrameBuffer::new(8, 8);
        let db = DepthBuffer::new(8, 8);
        // This winding is front-facing under our convention (positive screen area).
        let (a, b, c) = (vec3f(-0.5, -0.5, 0.0), vec3f(0.5, -0.5, 0.0), vec3f(0.0, 0.5, 0.0));
        draw_triangle_filled(a, b, c, &fb, &db, white(), true);
        let front_facing_drew_something = (0..8).flat_map(|y| (0..8).map(move |x| (x, y))).any(|(x, y)| fb.get(x, y).unwrap() == white());
        assert!(front_facing_drew_something);

        let fb2 = FrameBuffer::new(8, 8);
        let db2 = DepthBuffer::new(8, 8);
        // Reversed winding is back-facing and should be culled entirely.
        draw_triangle_filled(a, c, b, &fb2, &db2, white(), true);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(fb2.get(x, y).unwrap(), black());
            }
        }
    }
}
