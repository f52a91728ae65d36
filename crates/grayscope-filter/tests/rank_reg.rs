//! Rank filter regression test
//!
//! Min, max and median on synthetic images, including the window
//! anchoring at the right and bottom borders.

use grayscope_filter::{FilterError, Reducer, max_filter, median_filter, min_filter, rank_filter};
use grayscope_test::{RegParams, synthetic};

#[test]
fn rank_reg_uniform() {
    let mut rp = RegParams::new("rank_uniform");

    let buf = synthetic::uniform(9, 7, 77);
    for size in [2u32, 3, 5, 8] {
        rp.compare_buffers(&buf, &min_filter(&buf, size).unwrap());
        rp.compare_buffers(&buf, &max_filter(&buf, size).unwrap());
        rp.compare_buffers(&buf, &median_filter(&buf, size).unwrap());
    }

    assert!(rp.cleanup(), "rank_uniform regression test failed");
}

#[test]
fn rank_reg_ordering() {
    let mut rp = RegParams::new("rank_ordering");

    let buf = synthetic::diagonal_ramp(20, 15, 7);
    let min = min_filter(&buf, 4).unwrap();
    let med = median_filter(&buf, 4).unwrap();
    let max = max_filter(&buf, 4).unwrap();

    for ((lo, mid), hi) in min.data().iter().zip(med.data()).zip(max.data()) {
        assert!(lo <= mid && mid <= hi);
    }
    // the maximum really is a maximum on a non-flat image
    assert_ne!(min, max);

    // bottom-right pixel only sees itself
    rp.compare_values(
        buf.get(19, 14).unwrap() as f64,
        max.get(19, 14).unwrap() as f64,
        0.0,
    );

    rp.display_buffer(&min, "min").expect("display");
    rp.display_buffer(&max, "max").expect("display");

    assert!(rp.cleanup(), "rank_ordering regression test failed");
}

#[test]
fn rank_reg_gradient() {
    let mut rp = RegParams::new("rank_gradient");

    // on a left-to-right ramp, min keeps the pixel, max looks right
    let buf = synthetic::horizontal_gradient(64, 4);
    let min = rank_filter(&buf, 3, Reducer::Min).unwrap();
    let max = rank_filter(&buf, 3, Reducer::Max).unwrap();
    rp.compare_buffers(&buf, &min);
    rp.compare_values(
        buf.get(11, 0).unwrap() as f64,
        max.get(10, 0).unwrap() as f64,
        0.0,
    );

    assert!(matches!(
        rank_filter(&buf, 1, Reducer::Median),
        Err(FilterError::InvalidWindow(1))
    ));

    assert!(rp.cleanup(), "rank_gradient regression test failed");
}

#[test]
fn rank_reg_oversized_window() {
    let mut rp = RegParams::new("rank_oversized");

    let buf = synthetic::horizontal_gradient(6, 4);
    for size in [70_000u32, u32::MAX] {
        // the window reaches the right and bottom borders from every pixel
        let max = max_filter(&buf, size).unwrap();
        rp.compare_values(255.0, max.get(0, 0).unwrap() as f64, 0.0);
        let min = min_filter(&buf, size).unwrap();
        rp.compare_buffers(&buf, &min);
        let med = rank_filter(&buf, size, Reducer::Median).unwrap();
        rp.compare_values(4.0, med.height() as f64, 0.0);
    }

    assert!(rp.cleanup(), "rank_oversized regression test failed");
}
