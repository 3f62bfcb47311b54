use std::path::PathBuf;
use std::process;

use clap::Parser;

use rusterizer::camera::Camera;
use rusterizer::config::RenderConfig;
use rusterizer::math::{rotation_x, rotation_y, rotation_z, scale, vec3f, Matrix4x4f, Vec3f};
use rusterizer::rasterizer::FrameBuffer;
use rusterizer::render::{self, Mode};
use rusterizer::{png_writer, Error, Mesh, Renderer};

/// Render one or more OBJ meshes to a PNG using a CPU rasterizer.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to an OBJ mesh. May be repeated to render several meshes in one scene.
    #[arg(long = "mesh", required = true)]
    meshes: Vec<PathBuf>,

    /// Output image width in pixels.
    #[arg(long, default_value_t = 1500)]
    width: usize,

    /// Output image height in pixels.
    #[arg(long, default_value_t = 1500)]
    height: usize,

    /// Shading mode.
    #[arg(long, default_value = "wireframe")]
    mode: String,

    /// Discard back-facing triangles.
    #[arg(long)]
    cull: bool,

    /// Where to write the rendered PNG.
    #[arg(long, default_value = "output.png")]
    output: PathBuf,

    /// Parallel worker count. Defaults to the number of logical CPUs.
    #[arg(long)]
    workers: Option<usize>,

    /// Suppress informational logging; only warnings and errors are printed.
    #[arg(long)]
    quiet: bool,

    /// Camera position as "x,y,z".
    #[arg(long, default_value = "0,0,-2")]
    cam_pos: String,

    /// Camera look-at target as "x,y,z".
    #[arg(long, default_value = "0,0,0")]
    cam_target: String,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 45.0)]
    fov: f32,

    /// Move every loaded mesh by "x,y,z" in world space, applied after
    /// `--mesh-scale`/`--mesh-rotate-*`.
    #[arg(long, default_value = "0,0,0")]
    mesh_translate: String,

    /// Uniformly scale every loaded mesh about its own origin.
    #[arg(long, default_value_t = 1.0)]
    mesh_scale: f32,

    /// Rotate every loaded mesh about its own x axis, in degrees.
    #[arg(long, default_value_t = 0.0)]
    mesh_rotate_x: f32,

    /// Rotate every loaded mesh about its own y axis, in degrees.
    #[arg(long, default_value_t = 0.0)]
    mesh_rotate_y: f32,

    /// Rotate every loaded mesh about its own z axis, in degrees.
    #[arg(long, default_value_t = 0.0)]
    mesh_rotate_z: f32,
}

fn parse_vec3(s: &str) -> Result<Vec3f, Error> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(Error::InvalidMode(format!("expected \"x,y,z\", got {s:?}")));
    }
    let mut components = [0.0f32; 3];
    for (i, part) in parts.iter().enumerate() {
        components[i] = part.trim().parse::<f32>().map_err(|_| Error::InvalidMode(format!("not a number: {part:?}")))?;
    }
    Ok(vec3f(components[0], components[1], components[2]))
}

fn to_radians(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

fn mesh_model_matrix(cli: &Cli) -> Result<Matrix4x4f, Error> {
    let rotate = rotation_z(to_radians(cli.mesh_rotate_z))
        * rotation_y(to_radians(cli.mesh_rotate_y))
        * rotation_x(to_radians(cli.mesh_rotate_x));
    let translate = render::translate(parse_vec3(&cli.mesh_translate)?);
    Ok(translate * rotate * scale(cli.mesh_scale))
}

fn run(cli: Cli) -> Result<(), Error> {
    let mode: Mode = cli.mode.parse()?;

    let camera = Camera {
        position: parse_vec3(&cli.cam_pos)?,
        target: parse_vec3(&cli.cam_target)?,
        fov_deg: cli.fov,
        ..Camera::default()
    };

    let model_matrix = mesh_model_matrix(&cli)?;

    let config = RenderConfig {
        width: cli.width,
        height: cli.height,
        mode,
        backface_cull: cli.cull,
        worker_count: cli.workers,
        output_path: cli.output,
        ..RenderConfig::default()
    };
    let meshes: Vec<Mesh> = cli
        .meshes
        .iter()
        .map(|path| Mesh::from_obj_file(path).map(|mesh| mesh.with_model_matrix(model_matrix)))
        .collect::<Result<_, _>>()?;
    log::info!("loaded {} mesh(es)", meshes.len());

    let mut framebuffer = FrameBuffer::new(config.width, config.height);
    let mut renderer = Renderer::new();
    renderer.backface_cull = config.backface_cull;
    renderer.wireframe_color = config.wireframe_color;
    renderer.worker_count = config.worker_count;

    renderer.draw(&meshes, &camera, &mut framebuffer, config.mode)?;
    png_writer::write(&framebuffer, &config.output_path)?;
    log::info!("wrote {}", config.output_path.display());

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(err) = run(cli) {
        log::error!("{err}");
        process::exit(1);
    }
}
