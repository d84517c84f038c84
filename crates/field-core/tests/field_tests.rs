// Integration tests for the agent population and its step function.

use field_core::{Agent, Bounds, DepthBand, FieldConfig, Heading, NeuronField};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bounds() -> Bounds {
    Bounds::new(800.0, 600.0)
}

fn ten_agent_config() -> FieldConfig {
    FieldConfig {
        population: (10, 10),
        ..FieldConfig::default()
    }
}

fn assert_cardinal(h: Heading) {
    assert!(matches!(h.degrees(), 0 | 90 | 180 | 270));
}

#[test]
fn invariants_hold_across_many_steps() {
    let mut field = NeuronField::new(FieldConfig::default(), bounds(), 7);
    for _ in 0..500 {
        field.step(bounds());
        for a in field.agents() {
            assert!(a.trail.len() <= a.max_trail, "trail exceeded its cap");
            assert!((0.3..=1.0).contains(&a.depth()), "depth left [0.3, 1.0]");
            assert_cardinal(a.heading);
        }
    }
}

#[test]
fn depth_is_fixed_across_resets() {
    // A lifetime of at most two ticks forces constant respawning.
    let cfg = FieldConfig {
        lifetime: (1, 2),
        ..FieldConfig::default()
    };
    let mut field = NeuronField::new(cfg, bounds(), 11);
    let depths: Vec<f32> = field.agents().iter().map(|a| a.depth()).collect();
    for _ in 0..200 {
        field.step(bounds());
    }
    let after: Vec<f32> = field.agents().iter().map(|a| a.depth()).collect();
    assert_eq!(depths, after);
}

#[test]
fn agent_forced_past_margin_resets_on_next_step() {
    let cfg = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut agent = Agent::spawn(0, 0.7, &mut rng, &cfg, bounds());

    // 51 px past the 800 px edge, still travelling outward.
    agent.pos = glam::Vec2::new(851.0, 100.0);
    agent.heading = Heading::East;
    agent.step(&mut rng, &cfg, bounds());
    assert!(agent.pos.x >= 0.0 && agent.pos.x <= 800.0);
    assert!(agent.pos.y >= 0.0 && agent.pos.y <= 600.0);
    assert!(agent.trail.is_empty());
    assert_eq!(agent.age, 0);
}

#[test]
fn agent_forced_past_negative_margin_resets_on_next_step() {
    let cfg = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(4);
    let mut agent = Agent::spawn(0, 0.5, &mut rng, &cfg, bounds());

    agent.pos = glam::Vec2::new(100.0, -51.0);
    agent.heading = Heading::North;
    agent.step(&mut rng, &cfg, bounds());
    assert!(agent.pos.y >= 0.0 && agent.pos.y <= 600.0);
    assert!(agent.trail.is_empty());
}

#[test]
fn agent_resets_when_age_exceeds_lifetime() {
    let cfg = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    let mut agent = Agent::spawn(0, 0.9, &mut rng, &cfg, bounds());

    agent.age = agent.lifetime;
    agent.step(&mut rng, &cfg, bounds());
    assert_eq!(agent.age, 0);
    assert!(agent.trail.is_empty());
}

#[test]
fn step_with_degenerate_bounds_is_a_noop() {
    let cfg = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(6);
    let mut agent = Agent::spawn(0, 0.6, &mut rng, &cfg, bounds());

    let before_pos = agent.pos;
    let before_trail = agent.trail.len();
    agent.step(&mut rng, &cfg, Bounds::new(0.0, 0.0));
    assert_eq!(agent.pos, before_pos);
    assert_eq!(agent.trail.len(), before_trail);
}

#[test]
fn thousand_steps_stay_inside_the_margin() {
    let mut field = NeuronField::new(ten_agent_config(), bounds(), 42);
    assert_eq!(field.len(), 10);
    for _ in 0..1000 {
        field.step(bounds());
        for a in field.agents() {
            assert!(a.trail.len() <= a.max_trail);
            assert!((-50.0..=850.0).contains(&a.pos.x), "x escaped: {}", a.pos.x);
            assert!((-50.0..=650.0).contains(&a.pos.y), "y escaped: {}", a.pos.y);
        }
    }
}

#[test]
fn ids_are_stable_for_the_whole_session() {
    let mut field = NeuronField::new(ten_agent_config(), bounds(), 13);
    let ids: Vec<u32> = field.agents().iter().map(|a| a.id).collect();
    for _ in 0..1000 {
        field.step(bounds());
    }
    let after: Vec<u32> = field.agents().iter().map(|a| a.id).collect();
    assert_eq!(ids, after);
}

#[test]
fn speed_draws_are_bimodal() {
    let cfg = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut fast = 0usize;
    let total = 2000usize;
    for i in 0..total {
        // Depth 1.0 so the raw draw can be read back from the speed.
        let agent = Agent::spawn(i as u32, 1.0, &mut rng, &cfg, bounds());
        assert!(agent.speed > 0.0);
        if agent.speed >= cfg.fast_speed.0 {
            fast += 1;
        } else {
            assert!(agent.speed <= cfg.slow_speed.1);
        }
    }
    let fraction = fast as f32 / total as f32;
    assert!(
        (0.14..=0.26).contains(&fraction),
        "fast fraction drifted: {fraction}"
    );
}

const ONE_BAND: [DepthBand; 1] = [DepthBand {
    depth_min: 0.3,
    depth_max: 1.0,
    pixels_per_agent: 10_000.0,
}];

#[test]
fn population_follows_the_banded_density_formula() {
    let cfg = FieldConfig {
        bands: &ONE_BAND,
        population: (1, 1000),
        ..FieldConfig::default()
    };
    // 800 × 600 = 480k px² at one agent per 10k px².
    let field = NeuronField::new(cfg, bounds(), 8);
    assert_eq!(field.len(), 48);
}

#[test]
fn population_is_clamped_to_the_configured_range() {
    let sparse = FieldConfig {
        bands: &ONE_BAND,
        population: (4, 9),
        ..FieldConfig::default()
    };
    let field = NeuronField::new(sparse, bounds(), 9);
    assert_eq!(field.len(), 9);

    let tiny_canvas = NeuronField::new(
        FieldConfig {
            bands: &ONE_BAND,
            population: (4, 9),
            ..FieldConfig::default()
        },
        Bounds::new(10.0, 10.0),
        9,
    );
    assert_eq!(tiny_canvas.len(), 4);
}
