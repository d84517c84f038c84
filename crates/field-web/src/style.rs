// Pure paint math, kept free of web-sys so host tests can include it.

/// Stroke alpha for trail segment `segment` of `segments` total: rises
/// linearly from near zero on the oldest segment toward `depth * ceiling`
/// on the newest.
#[inline]
pub fn trail_alpha(segment: usize, segments: usize, depth: f32, ceiling: f32) -> f32 {
    if segments == 0 {
        return 0.0;
    }
    ((segment + 1) as f32 / segments as f32) * depth * ceiling
}

/// Body opacity follows depth directly.
#[inline]
pub fn body_alpha(depth: f32) -> f32 {
    depth.clamp(0.0, 1.0)
}

#[inline]
pub fn rgba(color: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        color[0],
        color[1],
        color[2],
        alpha.clamp(0.0, 1.0)
    )
}
