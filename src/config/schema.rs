//! Settings schema definitions.
//!
//! This module defines the complete settings structure for mirror routing.
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::routing::types::{MirrorRule, Repository};

/// Root settings for mirror routing.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MirrorSettings {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Resolution behavior.
    pub resolution: ResolutionConfig,

    /// Mirror rules, in declaration order.
    pub mirrors: Vec<MirrorRule>,

    /// Repositories the build contacts.
    pub repositories: Vec<Repository>,

    /// Automatic routing table entries.
    pub routes: Vec<RouteConfig>,
}

/// Automatic route for one repository URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Mirror identifier reported for this route.
    pub id: String,

    /// Repository URL the route applies to.
    pub repository_url: String,

    /// Endpoint requests are routed to.
    pub route_url: String,
}

/// Resolution behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Offer the routing table fallback when no mirror rule applies.
    pub auto_routing: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self { auto_routing: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (trace, debug, info, warn, error or full directives).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint (watch mode).
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
