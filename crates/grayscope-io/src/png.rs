//! PNG image format support
//!
//! Reading expands palettes and sub-byte depths to 8 bits, keeps the high
//! byte of 16-bit samples and folds color to luma. Writing always produces
//! an 8-bit grayscale PNG.

use crate::{IoError, IoResult, luma};
use grayscope_core::{PixelBuffer, PixelBufferMut};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let sample_bytes = if output_info.bit_depth == BitDepth::Sixteen {
        2
    } else {
        1
    };
    let channels = match output_info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "unexpanded PNG palette".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut out = PixelBufferMut::new(width, height)?;

    for y in 0..height {
        let src = &data[y as usize * bytes_per_row..];
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            // 16-bit samples are big-endian: the first byte is the high byte
            let base = x * channels * sample_bytes;
            *px = if channels < 3 {
                src[base]
            } else {
                luma(
                    src[base],
                    src[base + sample_bytes],
                    src[base + 2 * sample_bytes],
                )
            };
        }
    }

    Ok(out.into())
}

/// Write an 8-bit grayscale PNG image
pub fn write_png<W: Write>(buf: &PixelBuffer, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, buf.width(), buf.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(buf.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
