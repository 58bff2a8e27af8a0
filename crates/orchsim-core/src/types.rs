//! Core types shared across orchestrator backends

use serde::{Deserialize, Serialize};

/// Instance lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Running,
    Stopped,
}

impl InstanceState {
    /// Check if the instance is running
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceState::Running => write!(f, "running"),
            InstanceState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Lifecycle request addressed to one instance on one host.
///
/// `host_id` and `instance_name` are read by every backend. The remaining
/// fields are backend-specific launch parameters; backends that have no use
/// for them accept and ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Host the request is addressed to
    pub host_id: String,

    /// Logical instance name (lookup key)
    pub instance_name: String,

    /// Container image to launch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Extra process arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Volume the instance serves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,

    /// Replica endpoints a controller attaches to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replica_urls: Vec<String>,
}

impl Request {
    /// Create a request for `instance_name` on `host_id`
    pub fn new(host_id: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            instance_name: instance_name.into(),
            ..Default::default()
        }
    }

    /// Set image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add a process argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set volume name
    pub fn with_volume(mut self, volume_name: impl Into<String>) -> Self {
        self.volume_name = Some(volume_name.into());
        self
    }

    /// Add a replica endpoint
    pub fn with_replica_url(mut self, url: impl Into<String>) -> Self {
        self.replica_urls.push(url.into());
        self
    }
}

/// Snapshot of an instance, detached from backend state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub id: String,
    pub name: String,
    pub host_id: String,
    /// Network address; empty while the instance is not running
    pub address: String,
    pub running: bool,
}

/// Result of creating a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerInfo {
    #[serde(flatten)]
    pub instance: InstanceInfo,
}

/// Result of creating a replica
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaInfo {
    #[serde(flatten)]
    pub instance: InstanceInfo,

    /// Replica mode as reported by the backend
    pub mode: String,

    /// Timestamp at which the replica was marked bad, if ever
    pub bad_timestamp: String,
}
