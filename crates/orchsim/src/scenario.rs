//! Scripted lifecycle scenarios
//!
//! A scenario is an ordered list of lifecycle steps replayed against any
//! [`Orchestrator`]. Steps may declare the error they expect, which lets a
//! scenario file double as an acceptance check for a backend.
//!
//! ```json
//! {
//!   "name": "restart",
//!   "steps": [
//!     { "op": "create_controller", "instance_name": "web1" },
//!     { "op": "stop_instance", "instance_name": "web1" },
//!     { "op": "inspect_instance", "instance_name": "ghost", "expect": "not_found" }
//!   ]
//! }
//! ```

use crate::error::{Result, SimError};
use orchsim_core::{ErrorKind, InstanceInfo, Orchestrator, Request};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Lifecycle operation of a scenario step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// [`Orchestrator::create_controller`]
    CreateController,
    /// [`Orchestrator::create_replica`]
    CreateReplica,
    /// [`Orchestrator::start_instance`]
    StartInstance,
    /// [`Orchestrator::stop_instance`]
    StopInstance,
    /// [`Orchestrator::remove_instance`]
    RemoveInstance,
    /// [`Orchestrator::inspect_instance`]
    InspectInstance,
}

/// One step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Operation to apply
    pub op: Operation,

    /// Target host; defaults to the orchestrator's own host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,

    /// Target instance; missing means empty
    #[serde(default)]
    pub instance_name: String,

    /// Error the step is expected to fail with; `None` expects success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<ErrorKind>,
}

impl Step {
    /// Create a step targeting the orchestrator's own host
    pub fn new(op: Operation, instance_name: impl Into<String>) -> Self {
        Self {
            op,
            host_id: None,
            instance_name: instance_name.into(),
            expect: None,
        }
    }

    /// Target another host
    pub fn on_host(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = Some(host_id.into());
        self
    }

    /// Expect the step to fail with `kind`
    pub fn expecting(mut self, kind: ErrorKind) -> Self {
        self.expect = Some(kind);
        self
    }

    fn request(&self, orchestrator: &dyn Orchestrator) -> Request {
        let host_id = self
            .host_id
            .clone()
            .unwrap_or_else(|| orchestrator.get_current_host_id().to_string());
        Request::new(host_id, self.instance_name.clone())
    }

    /// Apply this step. `Ok(None)` means the operation returns no info.
    fn apply(
        &self,
        orchestrator: &dyn Orchestrator,
    ) -> orchsim_core::Result<Option<InstanceInfo>> {
        let request = self.request(orchestrator);
        let info = match self.op {
            Operation::CreateController => Some(orchestrator.create_controller(&request)?.instance),
            Operation::CreateReplica => Some(orchestrator.create_replica(&request)?.instance),
            Operation::StartInstance => Some(orchestrator.start_instance(&request)?),
            Operation::StopInstance => Some(orchestrator.stop_instance(&request)?),
            Operation::RemoveInstance => {
                orchestrator.remove_instance(&request)?;
                None
            }
            Operation::InspectInstance => Some(orchestrator.inspect_instance(&request)?),
        };
        Ok(info)
    }
}

/// What a step produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Operation succeeded
    Ok {
        /// Returned snapshot; absent for removals
        #[serde(default, skip_serializing_if = "Option::is_none")]
        info: Option<InstanceInfo>,
    },
    /// Operation was rejected
    Error {
        /// Error kind
        kind: ErrorKind,
        /// Rendered error message
        message: String,
    },
}

impl Outcome {
    /// Error kind, if the step failed
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Ok { .. } => None,
            Outcome::Error { kind, .. } => Some(*kind),
        }
    }
}

/// Result of replaying one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Zero-based position in the scenario
    pub index: usize,
    /// Operation applied
    pub op: Operation,
    /// Target instance
    pub instance_name: String,
    /// What the operation produced
    #[serde(flatten)]
    pub outcome: Outcome,
    /// Whether the outcome matched the step's expectation
    pub as_expected: bool,
}

/// An ordered list of lifecycle steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Label used in logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Steps, replayed in order
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading scenario");
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Controller restart walkthrough: create, stop, restart, remove, inspect
    pub fn demo() -> Self {
        let name = "web1";
        Self {
            name: Some("controller-restart".to_string()),
            steps: vec![
                Step::new(Operation::CreateController, name),
                Step::new(Operation::StopInstance, name),
                Step::new(Operation::StartInstance, name),
                Step::new(Operation::RemoveInstance, name),
                Step::new(Operation::InspectInstance, name).expecting(ErrorKind::NotFound),
            ],
        }
    }

    /// Replay every step in order.
    ///
    /// With `fail_fast`, the first step whose outcome does not match its
    /// expectation aborts the run with [`SimError::Aborted`], or with
    /// [`SimError::UnexpectedSuccess`] when a step expected to fail succeeded.
    /// Otherwise every step runs and mismatches are only flagged in the
    /// returned outcomes.
    pub fn run(
        &self,
        orchestrator: &dyn Orchestrator,
        fail_fast: bool,
    ) -> Result<Vec<StepOutcome>> {
        info!(
            scenario = self.name.as_deref().unwrap_or("unnamed"),
            steps = self.steps.len(),
            host_id = %orchestrator.get_current_host_id(),
            "Replaying scenario"
        );

        let mut outcomes = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let (outcome, failure) = match step.apply(orchestrator) {
                Ok(info) => (Outcome::Ok { info }, None),
                Err(e) => (
                    Outcome::Error {
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                    Some(e),
                ),
            };
            let as_expected = outcome.error_kind() == step.expect;

            if !as_expected {
                warn!(
                    index,
                    op = ?step.op,
                    instance_name = %step.instance_name,
                    expected = ?step.expect,
                    actual = ?outcome.error_kind(),
                    "Step outcome differs from expectation"
                );
                if fail_fast {
                    if let Some(source) = failure {
                        return Err(SimError::Aborted { step: index, source });
                    }
                    if let Some(expected) = step.expect {
                        return Err(SimError::UnexpectedSuccess { step: index, expected });
                    }
                }
            }

            outcomes.push(StepOutcome {
                index,
                op: step.op,
                instance_name: step.instance_name.clone(),
                outcome,
                as_expected,
            });
        }
        Ok(outcomes)
    }
}
