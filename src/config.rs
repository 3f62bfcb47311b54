//! Plain configuration data threaded from the CLI into the render pipeline.
//! Kept separate from `Renderer` so the CLI layer has one place to build
//! and validate settings before any rendering starts.

use std::path::PathBuf;

use crate::color::{self, Color3};
use crate::render::Mode;

/// Resolved settings for a single render invocation.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: usize,
    /// Output image height in pixels.
    pub height: usize,
    /// Shading mode applied to every mesh in the scene.
    pub mode: Mode,
    /// Discard back-facing triangles before rasterizing.
    pub backface_cull: bool,
    /// Line color used in `Mode::Wireframe`.
    pub wireframe_color: Color3,
    /// Thread count for the per-face parallel dispatcher. `None` uses
    /// `num_cpus::get()`.
    pub worker_count: Option<usize>,
    /// Where the rendered PNG is written.
    pub output_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1500,
            mode: Mode::Wireframe,
            backface_cull: false,
            wireframe_color: color::white(),
            worker_count: None,
            output_path: PathBuf::from("output.png"),
        }
    }
}
