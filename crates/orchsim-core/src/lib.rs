//! Orchsim Core - Shared types and traits
//!
//! This crate defines the core abstractions used across:
//! - orchsim (in-memory simulator)
//! - real orchestrator backends implementing the same contract
//! - orchestration logic that drives either of them
//!
//! Key types:
//! - Orchestrator trait (interface every backend implements)
//! - Request and instance info projections
//! - Error types

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
