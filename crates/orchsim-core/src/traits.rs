//! Core traits for orchestrator backends
//!
//! The Orchestrator trait defines the interface ALL backends must implement.
//! Orchestration logic works through this interface ONLY - never concrete types,
//! which is what lets the in-memory simulator stand in for a real backend.

use crate::error::Result;
use crate::types::*;

/// Host-local instance lifecycle management.
///
/// Every call is synchronous and either completes or fails immediately.
pub trait Orchestrator: Send + Sync {
    /// Create a controller instance; controllers start out running
    fn create_controller(&self, request: &Request) -> Result<ControllerInfo>;

    /// Create a replica instance; replicas start out stopped
    fn create_replica(&self, request: &Request) -> Result<ReplicaInfo>;

    /// Start an instance (no-op if already running)
    fn start_instance(&self, request: &Request) -> Result<InstanceInfo>;

    /// Stop an instance (no-op if already stopped)
    fn stop_instance(&self, request: &Request) -> Result<InstanceInfo>;

    /// Remove an instance
    fn remove_instance(&self, request: &Request) -> Result<()>;

    /// Inspect an instance's current state
    fn inspect_instance(&self, request: &Request) -> Result<InstanceInfo>;

    /// Identity of the host this backend manages
    fn get_current_host_id(&self) -> &str;
}
