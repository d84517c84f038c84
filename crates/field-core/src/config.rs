//! Immutable per-layer configuration.
//!
//! One `FieldConfig` is built per canvas layer and passed by reference into
//! the population, the step function, and the painter. Nothing here is
//! mutated after construction.

use crate::constants::*;

/// One depth band of the population-density formula: agents whose depth is
/// drawn inside `[depth_min, depth_max]`, at one agent per
/// `pixels_per_agent` square pixels of canvas.
#[derive(Clone, Copy, Debug)]
pub struct DepthBand {
    pub depth_min: f32,
    pub depth_max: f32,
    pub pixels_per_agent: f32,
}

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub depth_range: (f32, f32),
    pub turn_probability: f32,
    /// Distance past the canvas edge an agent may reach before respawning.
    pub margin: f32,
    pub trail_cap: (usize, usize),
    pub slow_speed: (f32, f32),
    pub fast_speed: (f32, f32),
    /// Share of respawns that draw from the fast speed range.
    pub fast_fraction: f32,
    pub size_range: (f32, f32),
    pub lifetime: (u32, u32),
    pub bands: &'static [DepthBand],
    /// Population clamp applied after the banded density formula.
    pub population: (usize, usize),
    pub body_color: [u8; 3],
    pub trail_color: [u8; 3],
    pub shadow_color: &'static str,
    /// Body shadow blur is this times the agent's depth.
    pub shadow_blur_scale: f32,
    pub trail_alpha_ceiling: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            depth_range: (DEPTH_MIN, DEPTH_MAX),
            turn_probability: TURN_PROBABILITY,
            margin: BOUNDS_MARGIN,
            trail_cap: (TRAIL_CAP_MIN, TRAIL_CAP_MAX),
            slow_speed: SLOW_SPEED,
            fast_speed: FAST_SPEED,
            fast_fraction: FAST_FRACTION,
            size_range: SIZE_RANGE,
            lifetime: LIFETIME_RANGE,
            bands: &NEURON_BANDS,
            population: NEURON_POPULATION,
            body_color: [120, 220, 255],
            trail_color: [120, 220, 255],
            shadow_color: "rgba(64, 196, 255, 0.9)",
            shadow_blur_scale: 6.0,
            trail_alpha_ceiling: TRAIL_ALPHA_CEILING,
        }
    }
}

impl FieldConfig {
    /// Profile for the sparse secondary layer.
    pub fn drift() -> Self {
        Self {
            bands: &DRIFT_BANDS,
            population: DRIFT_POPULATION,
            body_color: [235, 238, 255],
            trail_color: [200, 210, 255],
            shadow_color: "rgba(255, 255, 255, 0.6)",
            shadow_blur_scale: 4.0,
            ..Self::default()
        }
    }
}
