//! End-to-end regression test
//!
//! Decode, filter and re-encode through the facade re-exports.

use grayscope::filter::{self, GradientPair, NoiseModel, SubtractPolicy};
use grayscope::io::{self, ImageFormat};
use grayscope::{GRAY_LEVELS, PixelBuffer};
use grayscope_test::{RegParams, synthetic};

#[test]
fn pipeline_reg_denoise_and_sharpen() {
    let mut rp = RegParams::new("pipeline_denoise");

    let clean = synthetic::uniform(24, 24, 128);
    let noisy = filter::add_noise(
        &clean,
        NoiseModel::Gaussian {
            mean: 0.0,
            std_dev: 8.0,
        },
        42,
    )
    .unwrap();

    let encoded = io::write_image_mem(&noisy, ImageFormat::Png).unwrap();
    let decoded = io::read_image_mem(&encoded).unwrap();
    rp.compare_buffers(&noisy, &decoded);

    let denoised = filter::median_filter(&decoded, 4).unwrap();
    let err_noisy = mean_abs_diff(&clean, &noisy);
    let err_denoised = mean_abs_diff(&clean, &denoised);
    rp.compare_values(1.0, (err_denoised < err_noisy) as u8 as f64, 0.0);

    let sharp = filter::unsharp_mask(&denoised, 1.0, SubtractPolicy::Plain).unwrap();
    rp.compare_values(24.0, sharp.width() as f64, 0.0);
    rp.display_buffer(&sharp, "sharpened").expect("display");

    assert!(rp.cleanup(), "pipeline_denoise regression test failed");
}

#[test]
fn pipeline_reg_edges_and_histogram() {
    let mut rp = RegParams::new("pipeline_edges");

    let buf = synthetic::centered_square(20, 20, 8, 20, 220);
    let pgm = io::write_image_mem(&buf, ImageFormat::Pnm).unwrap();
    let buf = io::read_image_mem(&pgm).unwrap();

    let edges = filter::gradient_magnitude(&buf, GradientPair::Sobel).unwrap();
    // flat regions have no gradient, the square's border saturates
    rp.compare_values(0.0, edges.get(2, 10).unwrap() as f64, 0.0);
    rp.compare_values(255.0, edges.get(6, 10).unwrap() as f64, 0.0);

    let hist = edges.histogram();
    rp.compare_values(400.0, hist.total() as f64, 0.0);
    rp.compare_values(GRAY_LEVELS as f64, hist.counts().len() as f64, 0.0);

    let equalized = filter::equalize_histogram(&edges);
    rp.compare_values(
        edges.pixel_count() as f64,
        equalized.histogram().total() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pipeline_edges regression test failed");
}

fn mean_abs_diff(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    let sum: u64 = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| (x as i64 - y as i64).unsigned_abs())
        .sum();
    sum as f64 / a.pixel_count() as f64
}
