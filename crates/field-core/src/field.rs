//! The agent population for one canvas layer.

use crate::agent::{Agent, Bounds};
use crate::config::FieldConfig;
use crate::constants::TRAIL_CAP_MAX;
use crate::protocol::{AgentSeed, AgentState, ProtocolError};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Derive a per-layer seed from the session seed, so layers never share a
/// random stream.
pub fn layer_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub struct NeuronField {
    agents: Vec<Agent>,
    rng: StdRng,
    cfg: FieldConfig,
}

impl NeuronField {
    /// Build the population from the depth-banded density formula: each band
    /// contributes `area / pixels_per_agent` agents with depths drawn inside
    /// the band, and the total is clamped to the configured range. Agents are
    /// allocated here once; every later "death" respawns in place.
    pub fn new(cfg: FieldConfig, bounds: Bounds, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let area = bounds.width.max(0.0) * bounds.height.max(0.0);
        let mut agents = Vec::new();
        for band in cfg.bands {
            let count = (area / band.pixels_per_agent) as usize;
            for _ in 0..count {
                let depth = rng.gen_range(band.depth_min..=band.depth_max);
                agents.push(Agent::spawn(agents.len() as u32, depth, &mut rng, &cfg, bounds));
            }
        }
        while agents.len() < cfg.population.0 {
            let depth = rng.gen_range(cfg.depth_range.0..=cfg.depth_range.1);
            agents.push(Agent::spawn(agents.len() as u32, depth, &mut rng, &cfg, bounds));
        }
        agents.truncate(cfg.population.1);
        Self { agents, rng, cfg }
    }

    /// Mirror population for the worker side: identities come from the `init`
    /// payload, everything else is drawn locally.
    pub fn from_seeds(cfg: FieldConfig, bounds: Bounds, seed: u64, seeds: &[AgentSeed]) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let agents = seeds
            .iter()
            .map(|s| Agent::spawn(s.id, s.depth, &mut rng, &cfg, bounds))
            .collect();
        Self { agents, rng, cfg }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    /// Advance every agent by one tick.
    pub fn step(&mut self, bounds: Bounds) {
        for agent in &mut self.agents {
            agent.step(&mut self.rng, &self.cfg, bounds);
        }
    }

    pub fn seeds(&self) -> Vec<AgentSeed> {
        self.agents
            .iter()
            .map(|a| AgentSeed { id: a.id, depth: a.depth() })
            .collect()
    }

    pub fn states(&self) -> Vec<AgentState> {
        self.agents
            .iter()
            .map(|a| AgentState {
                id: a.id,
                x: a.pos.x,
                y: a.pos.y,
                size: a.size,
                depth: a.depth(),
                trail: a.trail.iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect()
    }

    /// Overwrite positions, sizes, and trails from a worker payload.
    ///
    /// The whole payload is validated before any agent is touched, so a
    /// rejected reply leaves the population exactly as it was.
    pub fn apply_states(&mut self, states: &[AgentState]) -> Result<(), ProtocolError> {
        if states.len() != self.agents.len() {
            return Err(ProtocolError::PopulationMismatch {
                expected: self.agents.len(),
                got: states.len(),
            });
        }
        let index: FnvHashMap<u32, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();
        for s in states {
            if !s.is_finite() {
                return Err(ProtocolError::NonFinite { id: s.id });
            }
            if s.trail.len() > TRAIL_CAP_MAX {
                return Err(ProtocolError::TrailOverflow { id: s.id });
            }
            if !index.contains_key(&s.id) {
                return Err(ProtocolError::UnknownAgent { id: s.id });
            }
        }
        for s in states {
            let agent = &mut self.agents[index[&s.id]];
            agent.pos = Vec2::new(s.x, s.y);
            agent.size = s.size;
            agent.trail = s.trail.iter().map(|p| Vec2::new(p[0], p[1])).collect();
        }
        Ok(())
    }
}
