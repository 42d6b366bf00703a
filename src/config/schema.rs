//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the forwarding proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream NAS endpoint and credentials.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream NAS configuration.
///
/// The credential pair is fixed for the process lifetime; there is no
/// rotation and no secret store.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Hostname or IP address of the NAS.
    pub host: String,

    /// Port the NAS serves HTTP on.
    pub port: u16,

    /// Username for Basic authentication against the NAS.
    pub username: String,

    /// Password for Basic authentication against the NAS.
    pub password: String,

    /// Timeout for the outbound fetch in seconds.
    pub timeout_secs: u64,

    /// Reject target URLs that do not point at the configured host/port.
    ///
    /// Off by default: the proxy forwards to any URL the caller
    /// supplies. Enabling this closes the open-relay surface.
    pub restrict_targets: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: "192.168.31.2".to_string(),
            port: 5005,
            username: "admin".to_string(),
            // WARNING: This is a placeholder! Change this in production.
            password: "CHANGE_ME_IN_PRODUCTION".to_string(),
            timeout_secs: 10,
            restrict_targets: false,
        }
    }
}

impl UpstreamConfig {
    /// Returns true if the target URL points at the configured host and
    /// port. Only consulted when `restrict_targets` is enabled.
    pub fn permits_target(&self, target: &Url) -> bool {
        let host_matches = target
            .host_str()
            .map(|h| h.eq_ignore_ascii_case(&self.host))
            .unwrap_or(false);

        host_matches && target.port_or_known_default() == Some(self.port)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
