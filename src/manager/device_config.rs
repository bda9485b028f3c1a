// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration types for the device registry.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Configuration for one registered device.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::manager::DeviceConfig;
///
/// let config = DeviceConfig::new("192.168.1.40", "token")
///     .with_alias("Kitchen");
/// assert_eq!(config.key(), "kitchen");
///
/// // Without an alias the IP doubles as one
/// assert_eq!(DeviceConfig::new("192.168.1.41", "token").key(), "192.168.1.41");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Address of the device.
    pub ip: String,
    /// Authentication token.
    pub token: String,
    /// Human label; the IP is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// HTTP API port; 16021 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl DeviceConfig {
    /// Creates a configuration without alias or port override.
    #[must_use]
    pub fn new(ip: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            token: token.into(),
            alias: None,
            port: None,
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the HTTP API port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Returns the alias, falling back to the IP.
    #[must_use]
    pub fn alias_or_ip(&self) -> &str {
        self.alias
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.ip)
    }

    /// Returns the registry key, the lowercased alias.
    #[must_use]
    pub fn key(&self) -> String {
        self.alias_or_ip().to_lowercase()
    }

    fn validate(&self) -> Result<(), ValueError> {
        if self.ip.trim().is_empty() {
            return Err(ValueError::InvalidConfiguration(
                "device ip is required".to_string(),
            ));
        }
        if self.token.trim().is_empty() {
            return Err(ValueError::InvalidConfiguration(format!(
                "device '{}' has no token",
                self.alias_or_ip()
            )));
        }
        Ok(())
    }
}

/// Configuration for a set of devices.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::manager::GatewayConfig;
///
/// let config = GatewayConfig::from_json(r#"{
///     "devices": [
///         {"ip": "192.168.1.40", "token": "abc", "alias": "kitchen"},
///         {"ip": "192.168.1.41", "token": "def"}
///     ],
///     "timeout_ms": 3000
/// }"#).unwrap();
///
/// assert_eq!(config.devices.len(), 2);
/// assert_eq!(config.timeout().as_millis(), 3000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Devices to register.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
    /// Per-request HTTP timeout in milliseconds; 10 seconds when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl GatewayConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidConfiguration` if the JSON is malformed, a
    /// device lacks an ip or token, or two devices share an alias.
    pub fn from_json(json: &str) -> Result<Self, ValueError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ValueError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout_ms
            .map_or(crate::protocol::HttpConfig::DEFAULT_TIMEOUT, Duration::from_millis)
    }

    /// Checks every device and rejects duplicate aliases.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidConfiguration` describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ValueError> {
        let mut seen = HashSet::new();
        for device in &self.devices {
            device.validate()?;
            if !seen.insert(device.key()) {
                return Err(ValueError::InvalidConfiguration(format!(
                    "duplicate alias '{}'",
                    device.alias_or_ip()
                )));
            }
        }
        Ok(())
    }
}
