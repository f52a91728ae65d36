//! Image I/O regression test
//!
//! Round-trips synthetic buffers through every enabled format, in memory
//! and through files, and checks format detection on the encoded bytes.

use grayscope_io::{
    ImageFormat, IoError, detect_format, detect_format_from_bytes, read_image, read_image_mem,
    write_image, write_image_mem,
};
use grayscope_test::{RegParams, regout_dir, synthetic};
use std::fs;

#[test]
fn io_reg() {
    let mut rp = RegParams::new("io");
    let src = synthetic::diagonal_ramp(37, 23, 5);

    // Lossless formats round-trip exactly
    for format in [ImageFormat::Png, ImageFormat::Pnm] {
        let bytes = write_image_mem(&src, format).expect("encode");
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
        let back = read_image_mem(&bytes).expect("decode");
        rp.compare_buffers(&src, &back);
    }

    // JPEG is lossy: only the shape and the mean survive
    let bytes = write_image_mem(&src, ImageFormat::Jpeg).expect("encode jpeg");
    assert_eq!(
        detect_format_from_bytes(&bytes).unwrap(),
        ImageFormat::Jpeg
    );
    let back = read_image_mem(&bytes).expect("decode jpeg");
    rp.compare_values(37.0, back.width() as f64, 0.0);
    rp.compare_values(23.0, back.height() as f64, 0.0);
    rp.compare_values(
        src.histogram().mean_intensity(),
        back.histogram().mean_intensity(),
        4.0,
    );

    // File round-trip, with the format resolved from the extension
    let outdir = regout_dir();
    fs::create_dir_all(&outdir).expect("create output directory");
    let path = format!("{}/io_roundtrip.pgm", outdir);
    write_image(&src, &path, ImageFormat::Unknown).expect("write pgm");
    assert_eq!(detect_format(&path).unwrap(), ImageFormat::Pnm);
    let back = read_image(&path).expect("read pgm");
    rp.compare_buffers(&src, &back);

    let path = format!("{}/io_roundtrip.png", outdir);
    write_image(&src, &path, ImageFormat::Png).expect("write png");
    let back = read_image(&path).expect("read png");
    rp.compare_buffers(&src, &back);

    // Reading a missing file surfaces the I/O error
    assert!(read_image(format!("{}/does_not_exist.png", outdir)).is_err());

    assert!(rp.cleanup());
}

#[test]
fn io_reg_malformed_pnm() {
    let mut rp = RegParams::new("io_malformed_pnm");

    // header dimensions whose product does not fit in memory
    let huge = b"P6\n4294967295 4294967295\n255\n\x00";
    rp.compare_values(
        1.0,
        matches!(read_image_mem(huge), Err(IoError::InvalidData(_))) as u8 as f64,
        0.0,
    );

    // plausible header, raster far shorter than announced
    let short = b"P5\n60000 60000\n255\n\x01\x02\x03";
    rp.compare_values(
        1.0,
        matches!(read_image_mem(short), Err(IoError::InvalidData(_))) as u8 as f64,
        0.0,
    );

    // 16-bit raster cut in the middle of a sample
    let odd = b"P5\n2 1\n65535\n\x01\x02\x03";
    rp.compare_values(1.0, read_image_mem(odd).is_err() as u8 as f64, 0.0);

    // ASCII raster missing samples
    let ascii = b"P2\n100000 100000\n255\n1 2 3\n";
    rp.compare_values(1.0, read_image_mem(ascii).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "io_malformed_pnm regression test failed");
}
