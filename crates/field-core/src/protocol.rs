//! Wire format between the render context and the background worker.
//!
//! Payloads are JSON strings exchanged over `postMessage`; both sides copy,
//! nothing is shared. A reply that fails any shape check here flips the
//! delegation link to local fallback.

use crate::constants::TRAIL_CAP_MAX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Messages sent from the render context to the worker.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerRequest {
    Init {
        width: f32,
        height: f32,
        agents: Vec<AgentSeed>,
    },
    Update {
        width: f32,
        height: f32,
    },
}

/// The identity the worker mirrors; everything else it draws itself.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AgentSeed {
    pub id: u32,
    pub depth: f32,
}

/// One agent as serialized back from the worker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentState {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub depth: f32,
    pub trail: Vec<[f32; 2]>,
}

impl AgentState {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.size.is_finite()
            && self.depth.is_finite()
            && self.trail.iter().all(|p| p[0].is_finite() && p[1].is_finite())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerReply {
    pub agents: Vec<AgentState>,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("population mismatch: expected {expected}, got {got}")]
    PopulationMismatch { expected: usize, got: usize },
    #[error("non-finite field for agent {id}")]
    NonFinite { id: u32 },
    #[error("trail longer than {TRAIL_CAP_MAX} for agent {id}")]
    TrailOverflow { id: u32 },
    #[error("unknown agent id {id}")]
    UnknownAgent { id: u32 },
}

pub fn encode_request(req: &WorkerRequest) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(req)?)
}

pub fn decode_request(text: &str) -> Result<WorkerRequest, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_reply(reply: &WorkerReply) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(reply)?)
}

pub fn decode_reply(text: &str) -> Result<WorkerReply, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}
