//! Image output.
//!
//! Plain-text PPM (`P3`) is always available; PNG goes through the `image`
//! crate. [`save_image`] picks the format from the file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ColorType, ImageFormat};

use crate::error::RenderResult;
use crate::ImageBuffer;

/// Write `image` as ASCII PPM: the `P3` header, then one `R G B` triple per
/// line in row-major order, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in &image.pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()
}

pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    Ok(())
}

pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    image::save_buffer_with_format(
        path.as_ref(),
        &image.to_rgb_bytes(),
        image.width,
        image.height,
        ColorType::Rgb8,
        ImageFormat::Png,
    )?;
    Ok(())
}

/// Save as PNG when the extension is `png` (any case), otherwise as PPM.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> RenderResult<()> {
    let path = path.as_ref();
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        save_png(image, path)?;
    } else {
        save_ppm(image, path)?;
    }

    log::info!("Image saved as {}", path.display());
    Ok(())
}
