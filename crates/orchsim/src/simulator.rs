//! In-memory orchestrator simulator
//!
//! Emulates host-local instance lifecycle management without a real backend:
//!
//! ```text
//! Request ── host check ── name check ── lock ── lookup/mutate ── unlock ── projection
//! ```
//!
//! All records live in one map guarded by one reader/writer lock. Creates,
//! starts, stops and removes take the write lock for the whole lookup +
//! mutation; inspects take the read lock. Callers only ever see
//! [`InstanceInfo`] snapshots built from the record while the lock is held.

use crate::config::SimulatorConfig;
use orchsim_core::{
    ControllerInfo, InstanceInfo, InstanceState, Orchestrator, OrchestratorError, ReplicaInfo,
    Request, Result,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Name of the request field every named operation requires
const INSTANCE_NAME_FIELD: &str = "instance_name";

/// A simulated instance, owned by the simulator
#[derive(Debug, Clone)]
struct InstanceRecord {
    id: String,
    name: String,
    state: InstanceState,
    /// Non-empty iff `state` is running
    address: String,
    /// Address held before the last stop; a restart must not reuse it
    previous_address: String,
}

/// Orchestrator backend that keeps every instance in memory
pub struct OrchSim {
    config: SimulatorConfig,
    records: RwLock<HashMap<String, InstanceRecord>>,
}

impl OrchSim {
    /// Create a simulator for `host_id` with default address settings
    pub fn new(host_id: impl Into<String>) -> Self {
        Self::with_config(SimulatorConfig::new(host_id))
    }

    /// Create a simulator from a config
    pub fn with_config(config: SimulatorConfig) -> Self {
        debug!(host_id = %config.host_id, "Creating orchestrator simulator");
        Self {
            config,
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Number of instances currently registered
    pub fn instance_count(&self) -> usize {
        self.records.read().len()
    }

    fn check_host(&self, request: &Request) -> Result<()> {
        if request.host_id != self.config.host_id {
            warn!(
                requested = %request.host_id,
                current = %self.config.host_id,
                "Rejecting request for another host"
            );
            return Err(OrchestratorError::host_mismatch(
                &request.host_id,
                &self.config.host_id,
            ));
        }
        Ok(())
    }

    fn check_name(request: &Request) -> Result<()> {
        if request.instance_name.is_empty() {
            return Err(OrchestratorError::MissingField {
                field: INSTANCE_NAME_FIELD,
            });
        }
        Ok(())
    }

    /// Fresh synthetic address for `name`, e.g. `ip-web1-3f9c1a2b`
    fn generate_address(&self, name: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        // At least one random digit, even for an unvalidated config
        let len = self.config.address_suffix_len.clamp(1, suffix.len());
        format!("{}{}-{}", self.config.address_prefix, name, &suffix[..len])
    }

    /// Fresh address for `name` that differs from `previous`
    fn generate_address_excluding(&self, name: &str, previous: &str) -> String {
        loop {
            let address = self.generate_address(name);
            if address != previous {
                return address;
            }
        }
    }

    fn project(&self, record: &InstanceRecord) -> InstanceInfo {
        InstanceInfo {
            id: record.id.clone(),
            name: record.name.clone(),
            host_id: self.config.host_id.clone(),
            address: record.address.clone(),
            running: record.state.is_running(),
        }
    }

    /// Insert a new record, failing if the name is taken
    fn create_record(&self, name: &str, state: InstanceState) -> Result<InstanceInfo> {
        let address = match state {
            InstanceState::Running => self.generate_address(name),
            InstanceState::Stopped => String::new(),
        };
        let record = InstanceRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            state,
            address,
            previous_address: String::new(),
        };

        let mut records = self.records.write();
        if records.contains_key(name) {
            debug!(instance_name = %name, "Duplicate instance name");
            return Err(OrchestratorError::duplicate(name));
        }
        let info = self.project(&record);
        records.insert(record.name.clone(), record);

        debug!(
            instance_name = %name,
            instance_id = %info.id,
            state = %state,
            "Created instance"
        );
        Ok(info)
    }
}

impl Orchestrator for OrchSim {
    fn create_controller(&self, request: &Request) -> Result<ControllerInfo> {
        self.check_host(request)?;
        Self::check_name(request)?;

        let instance = self.create_record(&request.instance_name, InstanceState::Running)?;
        Ok(ControllerInfo { instance })
    }

    fn create_replica(&self, request: &Request) -> Result<ReplicaInfo> {
        self.check_host(request)?;
        Self::check_name(request)?;

        let instance = self.create_record(&request.instance_name, InstanceState::Stopped)?;
        Ok(ReplicaInfo {
            instance,
            mode: String::new(),
            bad_timestamp: String::new(),
        })
    }

    fn start_instance(&self, request: &Request) -> Result<InstanceInfo> {
        self.check_host(request)?;
        Self::check_name(request)?;

        let name = &request.instance_name;
        let mut records = self.records.write();
        let record = records
            .get_mut(name)
            .ok_or_else(|| OrchestratorError::not_found(name))?;

        if !record.state.is_running() {
            record.address = self.generate_address_excluding(name, &record.previous_address);
            record.state = InstanceState::Running;
            debug!(instance_name = %name, address = %record.address, "Started instance");
        }
        Ok(self.project(record))
    }

    fn stop_instance(&self, request: &Request) -> Result<InstanceInfo> {
        self.check_host(request)?;
        Self::check_name(request)?;

        let name = &request.instance_name;
        let mut records = self.records.write();
        let record = records
            .get_mut(name)
            .ok_or_else(|| OrchestratorError::not_found(name))?;

        if record.state.is_running() {
            record.previous_address = std::mem::take(&mut record.address);
            record.state = InstanceState::Stopped;
            debug!(instance_name = %name, "Stopped instance");
        }
        Ok(self.project(record))
    }

    fn remove_instance(&self, request: &Request) -> Result<()> {
        self.check_host(request)?;

        // An empty name can never be registered, so it falls through to NotFound
        let name = &request.instance_name;
        let removed = self.records.write().remove(name);
        match removed {
            Some(record) => {
                debug!(instance_name = %name, instance_id = %record.id, "Removed instance");
                Ok(())
            }
            None => Err(OrchestratorError::not_found(name)),
        }
    }

    fn inspect_instance(&self, request: &Request) -> Result<InstanceInfo> {
        self.check_host(request)?;
        Self::check_name(request)?;

        let records = self.records.read();
        records
            .get(&request.instance_name)
            .map(|record| self.project(record))
            .ok_or_else(|| OrchestratorError::not_found(&request.instance_name))
    }

    fn get_current_host_id(&self) -> &str {
        &self.config.host_id
    }
}
