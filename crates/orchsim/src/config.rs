//! Simulator configuration

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default host identity when none is configured
pub const DEFAULT_HOST_ID: &str = "localhost";

/// Default prefix of synthetic addresses
pub const DEFAULT_ADDRESS_PREFIX: &str = "ip-";

/// Default number of random hex characters appended to synthetic addresses
pub const DEFAULT_ADDRESS_SUFFIX_LEN: usize = 8;

/// An unhyphenated (simple) UUID has 32 hex digits
const MAX_ADDRESS_SUFFIX_LEN: usize = 32;

/// Configuration for the orchestrator simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Host this simulator claims to be
    pub host_id: String,

    /// Prefix of every synthetic address
    pub address_prefix: String,

    /// Length of the random suffix of synthetic addresses (1..=32)
    pub address_suffix_len: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            host_id: DEFAULT_HOST_ID.to_string(),
            address_prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            address_suffix_len: DEFAULT_ADDRESS_SUFFIX_LEN,
        }
    }
}

impl SimulatorConfig {
    /// Create config for a host with default address settings
    pub fn new(host_id: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            ..Default::default()
        }
    }

    /// Set host id
    pub fn with_host_id(mut self, host_id: impl Into<String>) -> Self {
        self.host_id = host_id.into();
        self
    }

    /// Set address prefix
    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    /// Set address suffix length
    pub fn with_address_suffix_len(mut self, len: usize) -> Self {
        self.address_suffix_len = len;
        self
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading simulator config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse config from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this config and validate the
    /// result. Overrides win over file values when present.
    pub fn with_overrides(mut self, host_id: Option<String>) -> Result<Self> {
        if let Some(host_id) = host_id {
            debug!(host_id = %host_id, "Overriding configured host id");
            self.host_id = host_id;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.host_id.is_empty() {
            return Err(SimError::config("host_id must not be empty"));
        }
        if self.address_suffix_len == 0 || self.address_suffix_len > MAX_ADDRESS_SUFFIX_LEN {
            return Err(SimError::config(format!(
                "address_suffix_len must be in 1..={}, got {}",
                MAX_ADDRESS_SUFFIX_LEN, self.address_suffix_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.host_id, DEFAULT_HOST_ID);
        assert_eq!(config.address_prefix, "ip-");
        assert_eq!(config.address_suffix_len, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulatorConfig::new("host-A")
            .with_host_id("host-C")
            .with_address_prefix("10.0.")
            .with_address_suffix_len(4);

        assert_eq!(config.host_id, "host-C");
        assert_eq!(config.address_prefix, "10.0.");
        assert_eq!(config.address_suffix_len, 4);
    }

    #[test]
    fn test_config_partial_json() {
        let config = SimulatorConfig::from_json(r#"{"host_id":"host-B"}"#).unwrap();
        assert_eq!(config.host_id, "host-B");
        assert_eq!(config.address_prefix, DEFAULT_ADDRESS_PREFIX);
        assert_eq!(config.address_suffix_len, DEFAULT_ADDRESS_SUFFIX_LEN);
    }

    #[test]
    fn test_config_rejects_empty_host() {
        let err = SimulatorConfig::from_json(r#"{"host_id":""}"#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_config_rejects_bad_suffix_len() {
        assert!(SimulatorConfig::new("h").with_address_suffix_len(0).validate().is_err());
        assert!(SimulatorConfig::new("h").with_address_suffix_len(33).validate().is_err());
        assert!(SimulatorConfig::new("h").with_address_suffix_len(32).validate().is_ok());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = SimulatorConfig::from_json(r#"{"host_id":"host-A","address_prefix":"sim-"}"#)
            .unwrap();

        let config = file.clone().with_overrides(Some("host-B".to_string())).unwrap();
        assert_eq!(config.host_id, "host-B");
        assert_eq!(config.address_prefix, "sim-");

        let config = file.with_overrides(None).unwrap();
        assert_eq!(config.host_id, "host-A");
    }

    #[test]
    fn test_empty_host_override_rejected() {
        let file = SimulatorConfig::new("host-A");
        let err = file.with_overrides(Some(String::new())).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_overrides_validate_file_values() {
        let config = SimulatorConfig::new("host-A").with_address_suffix_len(0);
        assert!(config.with_overrides(Some("host-B".to_string())).is_err());
    }

    #[test]
    fn test_config_invalid_json() {
        let err = SimulatorConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }
}
