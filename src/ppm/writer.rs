// src/ppm/writer.rs

//! PPM encoder. The emitted header always declares a max color value of
//! 255 and carries a fixed comment line, independent of the source buffer.

use super::{PixelBuffer, PpmError, Variant, MAX_COLOR_VALUE};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_COMMENT: &str = "# output.ppm";

/// Encodes `image` to `path` in the requested variant.
pub fn encode_file<P: AsRef<Path>>(
    image: &PixelBuffer,
    variant: Variant,
    path: P,
) -> Result<(), PpmError> {
    let file = File::create(path.as_ref())?;
    let mut out = BufWriter::new(file);
    encode(image, variant, &mut out)?;
    out.flush()?;
    debug!(
        "encoded P{} image to {}",
        char::from(variant.code()),
        path.as_ref().display()
    );
    Ok(())
}

/// Writes `image` to `out` in the requested variant.
pub fn encode<W: Write>(
    image: &PixelBuffer,
    variant: Variant,
    out: &mut W,
) -> Result<(), PpmError> {
    write!(
        out,
        "P{}\n{}\n{} {}\n{}\n",
        char::from(variant.code()),
        HEADER_COMMENT,
        image.width(),
        image.height(),
        MAX_COLOR_VALUE
    )?;

    match variant {
        Variant::Binary => out.write_all(image.as_bytes())?,
        Variant::Text => {
            // Decimal triples, one image row per line, every sample
            // followed by a single space.
            for y in 0..image.height() {
                for x in 0..image.width() {
                    let px = image.pixel(x, y);
                    write!(out, "{} {} {} ", px.r, px.g, px.b)?;
                }
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
