//! Convolution regression test
//!
//! Smoothing kernels on uniform and tiny buffers, signed kernels under
//! both range policies, and catalog lookups.

use grayscope_core::PixelBuffer;
use grayscope_filter::{
    FilterError, Kernel, KernelSource, RangePolicy, catalog, convolve, convolve_with,
    gaussian_smooth, smooth,
};
use grayscope_test::{RegParams, synthetic};

/// Every catalog smoothing kernel keeps a uniform interior unchanged.
#[test]
fn convolve_reg_uniform_interior() {
    let mut rp = RegParams::new("convolve_uniform");

    let buf = synthetic::uniform(12, 10, 137);
    for kernel in catalog::ALL.iter().filter(|k| k.is_non_negative()) {
        let out = smooth(&buf, *kernel).expect("smooth");
        rp.compare_values(12.0, out.width() as f64, 0.0);
        let (cx, cy) = kernel.center();
        for y in cy..10 - cy {
            for x in cx..12 - cx {
                rp.compare_values(137.0, out.get(x, y).unwrap() as f64, 0.0);
            }
        }
        rp.display_buffer(&out, kernel.name()).expect("display");
    }

    assert!(rp.cleanup(), "convolve_uniform regression test failed");
}

/// The 2x2 example: every 3x3 window covers all four samples.
#[test]
fn convolve_reg_tiny() {
    let mut rp = RegParams::new("convolve_tiny");

    let buf = PixelBuffer::from_rows(&[[0u8, 85], [170, 255]]).unwrap();
    let out = convolve(&buf, &catalog::UNIFORM_3X3).unwrap();
    let expected = PixelBuffer::filled(2, 2, 56).unwrap();
    rp.compare_buffers(&expected, &out);

    // the weighted kernel divides by 16 even though taps were skipped
    let out = convolve(&buf, &catalog::WEIGHTED_3X3).unwrap();
    // (0,0): 4*0 + 2*85 + 2*170 + 1*255 = 765
    rp.compare_values((765 / 16) as f64, out.get(0, 0).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "convolve_tiny regression test failed");
}

/// Signed kernels: clamp vs rescale.
#[test]
fn convolve_reg_policies() {
    let mut rp = RegParams::new("convolve_policies");

    let buf = synthetic::centered_square(11, 11, 3, 20, 120);
    let clamped = convolve_with(&buf, &catalog::LAPLACIAN_1, RangePolicy::Clamp).unwrap();
    let rescaled = convolve_with(&buf, &catalog::LAPLACIAN_1, RangePolicy::Rescale).unwrap();

    // the default policy is clamp
    rp.compare_buffers(&clamped, &convolve(&buf, &catalog::LAPLACIAN_1).unwrap());

    // rescaling never produces a darker level than clamping
    for (c, r) in clamped.data().iter().zip(rescaled.data()) {
        assert!(r >= c);
    }
    // and lifts the most negative response to 0
    rp.compare_values(0.0, *rescaled.data().iter().min().unwrap() as f64, 0.0);

    rp.display_buffer(&clamped, "clamp").expect("display");
    rp.display_buffer(&rescaled, "rescale").expect("display");

    assert!(rp.cleanup(), "convolve_policies regression test failed");
}

/// Owned kernels go through the same engine as catalog kernels.
#[test]
fn convolve_reg_owned_kernels() {
    let mut rp = RegParams::new("convolve_owned");

    let buf = synthetic::checkerboard(16, 16, 4);
    let owned = catalog::GAUSSIAN_5X5.to_kernel().unwrap();
    rp.compare_buffers(
        &convolve(&buf, &catalog::GAUSSIAN_5X5).unwrap(),
        &convolve(&buf, &owned).unwrap(),
    );
    rp.compare_buffers(
        &gaussian_smooth(&buf, 3).unwrap(),
        &convolve(&buf, &catalog::GAUSSIAN_3X3).unwrap(),
    );

    // a 1x1 identity kernel returns the input
    let identity = Kernel::from_columns(1, 1, vec![1]).unwrap();
    rp.compare_buffers(&buf, &convolve(&buf, &identity).unwrap());

    assert!(matches!(
        Kernel::from_grid(&[[1, 2], [3, 4]]),
        Err(FilterError::InvalidKernel(_))
    ));
    assert!(catalog::by_name("sobel1").is_some());

    assert!(rp.cleanup(), "convolve_owned regression test failed");
}
