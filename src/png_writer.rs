//! Encodes a `FrameBuffer` to an 8-bit RGBA PNG, gamma-correcting each
//! channel on the way out.

use std::io::BufWriter;
use std::path::Path;

use crate::error::Error;
use crate::rasterizer::FrameBuffer;

const GAMMA: f32 = 2.2;

pub fn write<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    log::debug!("writing {}x{} PNG to {}", framebuffer.width(), framebuffer.height(), path.display());

    let file = std::fs::File::create(path).map_err(Error::Io)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, framebuffer.width() as u32, framebuffer.height() as u32);
    encoder.set_color(png::ColorType::RGBA);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let rgba = framebuffer.to_gamma_rgba8(GAMMA);
    writer.write_image_data(&rgba)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::white;

    #[test]
    fn writes_a_readable_png() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.try_set(0, 0, white()).unwrap();

        let path = std::env::temp_dir().join(format!("rusterizer-pngwriter-test-{:p}.png", &fb));
        write(&fb, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
