use crate::config::DepthBand;

// Shared tuning constants for the ambient field layers.

// Depth ("fake parallax") weight; fixed per agent at creation.
pub const DEPTH_MIN: f32 = 0.3;
pub const DEPTH_MAX: f32 = 1.0;

// Per-tick chance of a ±90° heading change.
pub const TURN_PROBABILITY: f32 = 0.01;

// Agents may wander this far past the canvas edge before respawning.
pub const BOUNDS_MARGIN: f32 = 50.0;

// Trail history cap, redrawn per respawn.
pub const TRAIL_CAP_MIN: usize = 2;
pub const TRAIL_CAP_MAX: usize = 22;

// Bimodal speed draw: most agents amble, a few dart.
pub const SLOW_SPEED: (f32, f32) = (0.2, 0.9);
pub const FAST_SPEED: (f32, f32) = (1.2, 2.4);
pub const FAST_FRACTION: f32 = 0.2;

// Body radius before depth scaling.
pub const SIZE_RANGE: (f32, f32) = (1.0, 3.0);

// Ticks an agent lives between respawns.
pub const LIFETIME_RANGE: (u32, u32) = (240, 1400);

// Population sizing: one agent per this many square pixels, per depth band.
pub const NEURON_BANDS: [DepthBand; 3] = [
    DepthBand { depth_min: 0.3, depth_max: 0.55, pixels_per_agent: 36_000.0 }, // far
    DepthBand { depth_min: 0.55, depth_max: 0.8, pixels_per_agent: 48_000.0 },
    DepthBand { depth_min: 0.8, depth_max: 1.0, pixels_per_agent: 64_000.0 }, // near
];
pub const NEURON_POPULATION: (usize, usize) = (30, 100);

// The drift layer is a sparser dressing on top of the neuron field.
pub const DRIFT_BANDS: [DepthBand; 2] = [
    DepthBand { depth_min: 0.3, depth_max: 0.6, pixels_per_agent: 90_000.0 },
    DepthBand { depth_min: 0.6, depth_max: 1.0, pixels_per_agent: 140_000.0 },
];
pub const DRIFT_POPULATION: (usize, usize) = (12, 48);

// Trail stroke alpha peaks at depth × this ceiling on the newest segment.
pub const TRAIL_ALPHA_CEILING: f32 = 0.3;

// Render cadence; the vsync callback is gated down to this.
pub const TARGET_FPS: f64 = 30.0;
