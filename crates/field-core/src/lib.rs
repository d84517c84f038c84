//! Platform-free core for the ambient neuron-field background: the agent
//! population and step function, the worker wire protocol, the delegation
//! state machine, and the welcome-text carousel data.

pub mod agent;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod field;
pub mod link;
pub mod protocol;

pub use agent::*;
pub use carousel::*;
pub use config::*;
pub use field::*;
pub use link::*;
pub use protocol::*;
