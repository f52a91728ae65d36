//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Luminance images are taken as is, RGB images are folded
//! to luma; CMYK is rejected.

use crate::{IoError, IoResult, luma};
use grayscope_core::PixelBuffer;
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelBuffer> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let data = match info.pixel_format {
        PixelFormat::L8 => pixels,
        // big-endian 16-bit luminance, keep the high byte
        PixelFormat::L16 => pixels.chunks_exact(2).map(|s| s[0]).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|s| luma(s[0], s[1], s[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {other:?} is not supported"
            )));
        }
    };

    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Write a grayscale JPEG image.
///
/// # Arguments
/// * `buf` - The image to encode
/// * `writer` - Destination writer
/// * `quality` - Encoder quality, 1..=100
pub fn write_jpeg<W: Write>(buf: &PixelBuffer, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(buf.width())
        .map_err(|_| IoError::EncodeError(format!("JPEG width too large: {}", buf.width())))?;
    let height = u16::try_from(buf.height())
        .map_err(|_| IoError::EncodeError(format!("JPEG height too large: {}", buf.height())))?;

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(buf.data(), width, height, jpeg_encoder::ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_is_close() {
        let buf = PixelBuffer::filled(16, 16, 128).unwrap();

        let mut bytes = Vec::new();
        write_jpeg(&buf, &mut bytes, 95).unwrap();
        let buf2 = read_jpeg(Cursor::new(bytes)).unwrap();

        assert_eq!(buf2.dimensions(), (16, 16));
        // lossy codec: a flat image stays within a couple of levels
        for &v in buf2.data() {
            assert!((v as i32 - 128).abs() <= 2, "got {v}");
        }
    }
}
