//! Agent model and the per-tick step function.

use crate::config::FieldConfig;
use crate::constants::TRAIL_CAP_MAX;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

/// Canvas extent in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

/// One of the four cardinal travel directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    East,
    South,
    West,
    North,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::East, Heading::South, Heading::West, Heading::North];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..4)]
    }

    /// Unit travel vector in canvas space (y grows downward).
    pub fn unit(self) -> Vec2 {
        match self {
            Heading::East => Vec2::new(1.0, 0.0),
            Heading::South => Vec2::new(0.0, 1.0),
            Heading::West => Vec2::new(-1.0, 0.0),
            Heading::North => Vec2::new(0.0, -1.0),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Heading::East => 0,
            Heading::South => 90,
            Heading::West => 180,
            Heading::North => 270,
        }
    }

    pub fn turned_cw(self) -> Self {
        match self {
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
            Heading::North => Heading::East,
        }
    }

    pub fn turned_ccw(self) -> Self {
        match self {
            Heading::East => Heading::North,
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
        }
    }
}

/// One simulated point of the field.
///
/// Created once at population init; "death" is an in-place respawn, not a
/// reallocation, so `id` and `depth` hold for the whole session.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: u32,
    pub pos: Vec2,
    depth: f32,
    pub heading: Heading,
    pub speed: f32,
    pub size: f32,
    pub trail: SmallVec<[Vec2; TRAIL_CAP_MAX]>,
    pub max_trail: usize,
    pub age: u32,
    pub lifetime: u32,
}

impl Agent {
    pub fn spawn<R: Rng>(
        id: u32,
        depth: f32,
        rng: &mut R,
        cfg: &FieldConfig,
        bounds: Bounds,
    ) -> Self {
        let mut agent = Self {
            id,
            pos: Vec2::ZERO,
            depth: depth.clamp(cfg.depth_range.0, cfg.depth_range.1),
            heading: Heading::East,
            speed: 0.0,
            size: 0.0,
            trail: SmallVec::new(),
            max_trail: cfg.trail_cap.0,
            age: 0,
            lifetime: 0,
        };
        agent.respawn(rng, cfg, bounds);
        agent
    }

    /// Depth is fixed at creation; it weights speed, size, and opacity.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Reinitialize in place; `id` and `depth` survive.
    pub fn respawn<R: Rng>(&mut self, rng: &mut R, cfg: &FieldConfig, bounds: Bounds) {
        self.pos = Vec2::new(
            rng.gen_range(0.0..bounds.width.max(1.0)),
            rng.gen_range(0.0..bounds.height.max(1.0)),
        );
        self.heading = Heading::random(rng);
        self.speed = self.depth * draw_speed(rng, cfg);
        self.size = self.depth * rng.gen_range(cfg.size_range.0..=cfg.size_range.1);
        self.max_trail = rng.gen_range(cfg.trail_cap.0..=cfg.trail_cap.1);
        self.trail.clear();
        self.age = 0;
        self.lifetime = rng.gen_range(cfg.lifetime.0..=cfg.lifetime.1);
    }

    /// Advance by exactly one tick. No-op when bounds are degenerate.
    pub fn step<R: Rng>(&mut self, rng: &mut R, cfg: &FieldConfig, bounds: Bounds) {
        if bounds.is_degenerate() {
            return;
        }
        if rng.gen::<f32>() < cfg.turn_probability {
            self.heading = if rng.gen::<bool>() {
                self.heading.turned_cw()
            } else {
                self.heading.turned_ccw()
            };
        }
        self.trail.push(self.pos);
        while self.trail.len() > self.max_trail {
            self.trail.remove(0);
        }
        self.pos += self.heading.unit() * self.speed;
        self.age += 1;
        if self.age > self.lifetime || !bounds.contains_with_margin(self.pos, cfg.margin) {
            self.respawn(rng, cfg, bounds);
        }
    }
}

fn draw_speed<R: Rng>(rng: &mut R, cfg: &FieldConfig) -> f32 {
    let range = if rng.gen::<f32>() < cfg.fast_fraction {
        cfg.fast_speed
    } else {
        cfg.slow_speed
    };
    rng.gen_range(range.0..=range.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cw_turns_cycle_through_all_headings() {
        let mut h = Heading::East;
        for _ in 0..4 {
            h = h.turned_cw();
        }
        assert_eq!(h, Heading::East);
    }

    #[test]
    fn ccw_undoes_cw() {
        for h in Heading::ALL {
            assert_eq!(h.turned_cw().turned_ccw(), h);
        }
    }

    #[test]
    fn units_are_axis_aligned() {
        for h in Heading::ALL {
            let u = h.unit();
            assert_eq!(u.length_squared(), 1.0);
            assert!(u.x == 0.0 || u.y == 0.0);
        }
    }
}
