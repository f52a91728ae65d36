//! grayscope-io - Image I/O for grayscope
//!
//! Decoders hand back an 8-bit [`PixelBuffer`] whatever the file holds:
//!
//! - Grayscale samples are taken as is (16-bit samples keep the high byte)
//! - Color samples are folded to luma with [`luma`]
//! - Alpha is ignored
//!
//! Encoders always write single-channel 8-bit images.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | yes   | `jpeg` |
//! | PNM    | P2/P3/P5/P6 | P5 | `pnm` |

mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use grayscope_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// Fold an RGB sample to 8-bit luma (ITU-R BT.601 weights in 16.16 fixed point).
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 32768) >> 16) as u8
}

/// Read an image from a file, detecting its format from the header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut header = [0u8; 12];
    let n = file.read(&mut header)?;
    let format = detect_format_from_bytes(&header[..n])?;
    file.rewind()?;
    log::debug!("reading {} as {:?}", path.display(), format);

    let buf = read_image_format(BufReader::new(file), format)?;
    log::debug!("decoded {}x{} from {}", buf.width(), buf.height(), path.display());
    Ok(buf)
}

/// Read an image from an in-memory encoding.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    log::debug!("decoding {} bytes as {:?}", data.len(), format);
    read_image_format(Cursor::new(data), format)
}

/// Read an image of a known format.
pub fn read_image_format<R: std::io::BufRead + Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<PixelBuffer> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => {
            let _ = reader;
            Err(unsupported(other))
        }
    }
}

/// Write an image to a file.
///
/// An [`ImageFormat::Unknown`] format is resolved from the path extension.
pub fn write_image<P: AsRef<Path>>(
    buf: &PixelBuffer,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(path),
        known => known,
    };
    log::debug!(
        "writing {}x{} to {} as {:?}",
        buf.width(),
        buf.height(),
        path.display(),
        format
    );

    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(buf, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(buf: &PixelBuffer, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    write_image_format(buf, &mut bytes, format)?;
    log::debug!("encoded {:?}: {} bytes", format, bytes.len());
    Ok(bytes)
}

/// Write an image in a given format to a writer.
pub fn write_image_format<W: Write>(
    buf: &PixelBuffer,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(buf, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(buf, writer, jpeg::DEFAULT_JPEG_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(buf, writer),
        other => {
            let _ = (buf, writer);
            Err(unsupported(other))
        }
    }
}

fn unsupported(format: ImageFormat) -> IoError {
    match format {
        ImageFormat::Unknown => IoError::UnsupportedFormat("unrecognized image format".to_string()),
        other => IoError::UnsupportedFormat(format!("{other:?} support is not enabled")),
    }
}
