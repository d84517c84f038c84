// Host-side tests for pure paint math.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use style::*;

#[test]
fn trail_alpha_rises_toward_the_newest_segment() {
    let segments = 10;
    let depth = 0.8;
    let ceiling = 0.3;
    let mut prev = 0.0;
    for i in 0..segments {
        let a = trail_alpha(i, segments, depth, ceiling);
        assert!(a > prev, "alpha not increasing at segment {i}");
        prev = a;
    }
    // Newest segment peaks at depth × ceiling.
    assert!((prev - depth * ceiling).abs() < 1e-6);
}

#[test]
fn trail_alpha_is_zero_for_no_segments() {
    assert_eq!(trail_alpha(0, 0, 1.0, 0.3), 0.0);
}

#[test]
fn trail_alpha_scales_with_depth() {
    let shallow = trail_alpha(4, 5, 0.3, 0.3);
    let deep = trail_alpha(4, 5, 1.0, 0.3);
    assert!(deep > shallow);
}

#[test]
fn rgba_clamps_alpha_into_unit_range() {
    assert_eq!(rgba([1, 2, 3], 2.0), "rgba(1, 2, 3, 1.000)");
    assert_eq!(rgba([255, 0, 128], -0.5), "rgba(255, 0, 128, 0.000)");
}

#[test]
fn body_alpha_follows_depth() {
    assert_eq!(body_alpha(0.45), 0.45);
    assert_eq!(body_alpha(1.7), 1.0);
}
