//! # Orchsim
//!
//! In-memory orchestrator simulator for exercising orchestration logic
//! without a live cluster.
//!
//! ## Architecture
//!
//! ```text
//! Orchestration logic ──► dyn Orchestrator ──► OrchSim (this crate)
//!                                         └──► real backend
//! ```
//!
//! [`OrchSim`] implements [`orchsim_core::Orchestrator`] over a single
//! name → record map behind one reader/writer lock:
//! - Controllers are created running with a synthetic address
//! - Replicas are created stopped, without an address
//! - Start/stop are idempotent; a new address is generated on every
//!   stopped → running transition
//! - Every request must target the simulator's own host
//!
//! [`scenario`] replays scripted lifecycle steps against any orchestrator and
//! backs the `orchsim` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod scenario;
pub mod simulator;

// ============================================================================
// Public exports
// ============================================================================

// Error handling
pub use error::{Result, SimError};

// Configuration
pub use config::{
    SimulatorConfig, DEFAULT_ADDRESS_PREFIX, DEFAULT_ADDRESS_SUFFIX_LEN, DEFAULT_HOST_ID,
};

// Simulator
pub use simulator::OrchSim;

// Scenario replay
pub use scenario::{Operation, Outcome, Scenario, Step, StepOutcome};

// Core contract, re-exported for convenience
pub use orchsim_core::{
    ControllerInfo, ErrorKind, InstanceInfo, InstanceState, Orchestrator, OrchestratorError,
    ReplicaInfo, Request,
};
