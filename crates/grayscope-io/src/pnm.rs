//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary), with
//! any maxval up to 65535; samples are rescaled to 8 bits and PPM color is
//! folded to luma. Writes binary PGM (P5) only.

use crate::{IoError, IoResult, luma};
use grayscope_core::PixelBuffer;
use std::io::{BufRead, Read, Write};

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the magic number
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<PixelBuffer> {
    let magic = read_token(&mut reader)?;
    let (binary, channels) = match magic.as_str() {
        "P2" => (false, 1),
        "P3" => (false, 3),
        "P5" => (true, 1),
        "P6" => (true, 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {other:?} is not supported"
            )));
        }
    };

    let width: u32 = parse_header_value(&mut reader, "width")?;
    let height: u32 = parse_header_value(&mut reader, "height")?;
    let maxval: u32 = parse_header_value(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM maxval out of range: {maxval}")));
    }

    let count = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| IoError::InvalidData(format!("PNM size {width}x{height} is too large")))?;
    let samples: Vec<u32> = if binary {
        let wide = maxval > 255;
        let sample_bytes = if wide { 2 } else { 1 };
        let expected = count
            .checked_mul(sample_bytes)
            .ok_or_else(|| IoError::InvalidData("PNM raster is too large".to_string()))?;
        // only what the stream actually holds is buffered
        let mut raw = Vec::new();
        reader.by_ref().take(expected as u64).read_to_end(&mut raw)?;
        if raw.len() != expected {
            return Err(IoError::InvalidData(format!(
                "truncated PNM raster: expected {expected} bytes, got {}",
                raw.len()
            )));
        }
        if wide {
            raw.chunks_exact(2)
                .map(|s| u32::from(u16::from_be_bytes([s[0], s[1]])))
                .collect()
        } else {
            raw.into_iter().map(u32::from).collect()
        }
    } else {
        let mut samples = Vec::new();
        for _ in 0..count {
            samples.push(parse_header_value(&mut reader, "sample")?);
        }
        samples
    };

    let scale = |v: u32| -> u8 {
        if maxval == 255 {
            v.min(255) as u8
        } else {
            ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
        }
    };

    let data = if channels == 1 {
        samples.into_iter().map(scale).collect()
    } else {
        samples
            .chunks_exact(3)
            .map(|s| luma(scale(s[0]), scale(s[1]), scale(s[2])))
            .collect()
    };

    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Write a buffer as binary PGM (P5) to a writer.
///
/// # Arguments
/// * `buf`    - The image to encode
/// * `writer` - Destination writer
pub fn write_pnm<W: Write>(buf: &PixelBuffer, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", buf.width(), buf.height())?;
    writer.write_all(buf.data())?;
    writer.flush()?;
    Ok(())
}

fn parse_header_value<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {what}: {token:?}")))
}

/// Read one whitespace-delimited token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, so binary raster
/// data that follows the maxval is left untouched.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    loop {
        let Some(byte) = read_byte(reader)? else {
            break;
        };
        if byte == b'#' && token.is_empty() {
            while let Some(b) = read_byte(reader)? {
                if b == b'\n' || b == b'\r' {
                    break;
                }
            }
        } else if byte.is_ascii_whitespace() {
            if !token.is_empty() {
                break;
            }
        } else {
            token.push(byte);
        }
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn read_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let mut byte = [0u8; 1];
    match reader.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}
