//! TOML-based configuration for meshlan nodes.

use std::path::Path;

use serde::Deserialize;

use meshlan_core::NetworkPrefix;
use meshlan_routing::{DEFAULT_QUEUE_DEPTH, RoutingPolicy};

use crate::error::NodeError;

/// Top-level node configuration loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub node: NodeSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub routing: RoutingSection,
    #[serde(default)]
    pub ports: Vec<PortEntry>,
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| NodeError::Config(format!("failed to parse config: {e}")))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(format!("failed to parse config: {e}")))
    }
}

/// The `[node]` section.
#[derive(Debug, Deserialize)]
pub struct NodeSection {
    #[serde(default = "default_node_name")]
    pub name: String,
    /// Depth of the inbound frame queue feeding the router task.
    #[serde(default = "default_intake_depth")]
    pub intake_depth: usize,
}

fn default_node_name() -> String {
    "meshlan".to_string()
}

fn default_intake_depth() -> usize {
    1024
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            name: default_node_name(),
            intake_depth: default_intake_depth(),
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// The `[routing]` section.
#[derive(Debug, Default, Deserialize)]
pub struct RoutingSection {
    /// Relay frames between same-group peers through this node.
    #[serde(default)]
    pub client_routing: bool,
}

impl RoutingSection {
    pub fn policy(&self) -> RoutingPolicy {
        RoutingPolicy::new(self.client_routing)
    }
}

/// A `[[ports]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PortEntry {
    pub name: String,
    /// Tenant group this port belongs to.
    pub group: u32,
    /// CIDR prefixes this port accepts traffic for.
    #[serde(default)]
    pub routes: Vec<String>,
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
    /// What the port's pump does with emitted frames.
    #[serde(default = "default_emitter")]
    pub emitter: String,
}

fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

fn default_emitter() -> String {
    "log".to_string()
}

/// Parse a CIDR string from configuration.
pub fn parse_prefix(s: &str) -> Result<NetworkPrefix, NodeError> {
    s.parse().map_err(|e: meshlan_core::PrefixError| NodeError::Config(e.to_string()))
}

/// Parse every advertised route of a port entry.
pub fn parse_routes(routes: &[String]) -> Result<Vec<NetworkPrefix>, NodeError> {
    routes.iter().map(|s| parse_prefix(s)).collect()
}
