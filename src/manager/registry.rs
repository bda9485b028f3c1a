// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of configured devices keyed by alias.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinSet;

use crate::device::Device;
use crate::error::{Error, Result};
use crate::protocol::{HttpConfig, StreamConfig};

use super::device_config::{DeviceConfig, GatewayConfig};

/// A device entry in the registry.
///
/// Cloning is cheap; all clones share the same [`Device`] connection.
#[derive(Debug, Clone)]
pub struct RegisteredDevice {
    alias: String,
    ip: String,
    token: String,
    name: Option<String>,
    model: Option<String>,
    device: Arc<Device>,
}

impl RegisteredDevice {
    /// Returns the alias as registered (original case).
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the device address.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Returns the authentication token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the hardware name learned by
    /// [`refresh_names`](DeviceRegistry::refresh_names), if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the hardware model learned by
    /// [`refresh_names`](DeviceRegistry::refresh_names), if any.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the live connection.
    #[must_use]
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }

    /// Returns `true` if the alias is still the IP address.
    #[must_use]
    pub fn has_ip_alias(&self) -> bool {
        self.alias == self.ip
    }
}

/// Reachability of a device as seen by [`DeviceRegistry::list_with_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// The device answered.
    Online {
        /// Power flag.
        on: bool,
        /// Brightness in percent.
        brightness: i32,
    },
    /// The device could not be queried.
    Unknown,
}

/// One row of [`DeviceRegistry::list_with_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    /// Alias as registered.
    pub alias: String,
    /// Device address.
    pub ip: String,
    /// Hardware name, if known.
    pub name: Option<String>,
    /// Hardware model, if known.
    pub model: Option<String>,
    /// Current power and brightness, if the device answered.
    pub status: DeviceStatus,
}

/// Devices known to the gateway, resolvable by alias or IP.
///
/// Keys are lowercased aliases, so lookups are case-insensitive. Several
/// aliases may point at the same IP. The registry is an owned value; wrap it
/// in an `Arc` to share it between tasks.
///
/// # Examples
///
/// ```no_run
/// use nanoleaf_gateway::manager::DeviceRegistry;
///
/// # async fn example() -> nanoleaf_gateway::Result<()> {
/// let registry = DeviceRegistry::new();
/// registry.register("192.168.1.40", "token-a", Some("Kitchen")).await?;
/// registry.register("192.168.1.41", "token-b", None).await?;
///
/// // Replace IP aliases with hardware names where possible
/// registry.refresh_names().await;
///
/// let kitchen = registry.resolve(Some("kitchen")).await?;
/// kitchen.device().turn_on().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceRegistry {
    devices: RwLock<HashMap<String, RegisteredDevice>>,
    timeout: Duration,
    stream_config: StreamConfig,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
            timeout: HttpConfig::DEFAULT_TIMEOUT,
            stream_config: StreamConfig::default(),
        }
    }

    /// Sets the per-request timeout for devices registered afterwards.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the streaming ports for devices registered afterwards.
    #[must_use]
    pub fn with_stream_config(mut self, stream_config: StreamConfig) -> Self {
        self.stream_config = stream_config;
        self
    }

    /// Creates a registry holding every device of a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the configuration does not validate
    /// and [`Error::Connectivity`] if an HTTP client cannot be created.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let registry = Self::new().with_timeout(config.timeout());

        let mut devices = HashMap::with_capacity(config.devices.len());
        for device_config in &config.devices {
            let entry = registry.build_entry(device_config)?;
            devices.insert(device_config.key(), entry);
        }
        tracing::info!(count = devices.len(), "Loaded device registry");

        Ok(Self {
            devices: RwLock::new(devices),
            ..registry
        })
    }

    // ========== Registration ==========

    /// Registers a device under `alias`, or under its IP when no alias is
    /// given.
    ///
    /// An existing entry with the same alias (case-insensitive) is replaced.
    /// The device is not contacted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the IP or token is empty.
    pub async fn register(
        &self,
        ip: &str,
        token: &str,
        alias: Option<&str>,
    ) -> Result<RegisteredDevice> {
        let mut config = DeviceConfig::new(ip, token);
        config.alias = alias.map(str::to_string);
        self.register_config(&config).await
    }

    /// Registers a device from its configuration.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub async fn register_config(&self, config: &DeviceConfig) -> Result<RegisteredDevice> {
        let entry = self.build_entry(config)?;
        let key = config.key();

        let mut devices = self.devices.write().await;
        if devices.values().any(|d| d.ip == entry.ip && d.alias.to_lowercase() != key) {
            tracing::debug!(ip = %entry.ip, "IP already registered under another alias");
        }
        if devices.insert(key, entry.clone()).is_some() {
            tracing::info!(alias = %entry.alias, ip = %entry.ip, "Replaced registered device");
        } else {
            tracing::info!(alias = %entry.alias, ip = %entry.ip, "Registered device");
        }

        Ok(entry)
    }

    /// Removes a device by alias (case-insensitive).
    ///
    /// Returns `true` if an entry was removed.
    pub async fn remove(&self, alias: &str) -> bool {
        let removed = self.devices.write().await.remove(&alias.to_lowercase());
        if let Some(entry) = &removed {
            tracing::info!(alias = %entry.alias, "Removed device");
        }
        removed.is_some()
    }

    // ========== Lookup ==========

    /// Finds the device an operation should target.
    ///
    /// Without an identifier, the only registered device is the default.
    /// Otherwise the identifier is matched against aliases
    /// (case-insensitive) and then against IP addresses (exact).
    ///
    /// # Errors
    ///
    /// - [`Error::NotConfigured`] if the registry is empty.
    /// - [`Error::AmbiguousSelection`] if no identifier is given and several
    ///   devices are registered.
    /// - [`Error::NotFound`] if nothing matches the identifier.
    pub async fn resolve(&self, identifier: Option<&str>) -> Result<RegisteredDevice> {
        let devices = self.devices.read().await;
        if devices.is_empty() {
            return Err(Error::NotConfigured);
        }

        let Some(identifier) = identifier.filter(|id| !id.is_empty()) else {
            return match single(&devices) {
                Some(entry) => Ok(entry.clone()),
                None => Err(Error::AmbiguousSelection {
                    aliases: sorted_aliases(&devices),
                }),
            };
        };

        if let Some(entry) = devices.get(&identifier.to_lowercase()) {
            return Ok(entry.clone());
        }

        // Several aliases may share an IP; pick the first alias in order.
        let by_ip = devices
            .iter()
            .filter(|(_, entry)| entry.ip == identifier)
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, entry)| entry.clone());

        by_ip.ok_or_else(|| Error::NotFound {
            identifier: identifier.to_string(),
            aliases: sorted_aliases(&devices),
        })
    }

    /// Returns every entry, sorted by alias.
    pub async fn list(&self) -> Vec<RegisteredDevice> {
        let mut entries: Vec<RegisteredDevice> =
            self.devices.read().await.values().cloned().collect();
        entries.sort_by(|a, b| a.alias.to_lowercase().cmp(&b.alias.to_lowercase()));
        entries
    }

    /// Returns every alias, sorted.
    pub async fn aliases(&self) -> Vec<String> {
        sorted_aliases(&*self.devices.read().await)
    }

    /// Returns the number of registered devices.
    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns `true` if no device is registered.
    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    // ========== Best-effort queries ==========

    /// Learns hardware names and upgrades IP aliases to them.
    ///
    /// Every device is queried concurrently. An entry whose alias is still
    /// its IP is re-keyed to the reported name, unless that name is empty or
    /// already used as an alias. Devices that do not answer are skipped and
    /// logged.
    pub async fn refresh_names(&self) {
        let mut queries = JoinSet::new();
        for (key, entry) in self.devices.read().await.iter() {
            let key = key.clone();
            let device = Arc::clone(&entry.device);
            queries.spawn(async move {
                let info = device.get_info().await;
                (key, device, info)
            });
        }

        while let Some(joined) = queries.join_next().await {
            match joined {
                Ok((key, device, Ok(info))) => {
                    self.apply_hardware_identity(&key, &device, &info.name, info.model)
                        .await;
                }
                Ok((key, _, Err(e))) => {
                    tracing::warn!(alias = %key, error = %e, "Failed to refresh device name");
                }
                Err(e) => tracing::warn!(error = %e, "Name refresh task failed"),
            }
        }
    }

    /// Lists every device with its current power and brightness.
    ///
    /// Devices that do not answer are reported as [`DeviceStatus::Unknown`].
    /// Rows are sorted by alias.
    pub async fn list_with_status(&self) -> Vec<DeviceSummary> {
        let mut queries = JoinSet::new();
        for entry in self.list().await {
            queries.spawn(async move {
                let status = match entry.device.get_state().await {
                    Ok(state) => DeviceStatus::Online {
                        on: state.on,
                        brightness: state.brightness.value,
                    },
                    Err(e) => {
                        tracing::warn!(alias = %entry.alias, error = %e, "Failed to query device status");
                        DeviceStatus::Unknown
                    }
                };
                DeviceSummary {
                    alias: entry.alias,
                    ip: entry.ip,
                    name: entry.name,
                    model: entry.model,
                    status,
                }
            });
        }

        let mut summaries = Vec::with_capacity(queries.len());
        while let Some(joined) = queries.join_next().await {
            match joined {
                Ok(summary) => summaries.push(summary),
                Err(e) => tracing::warn!(error = %e, "Status query task failed"),
            }
        }
        summaries.sort_by(|a, b| a.alias.to_lowercase().cmp(&b.alias.to_lowercase()));
        summaries
    }

    // ========== Helpers ==========

    fn build_entry(&self, config: &DeviceConfig) -> Result<RegisteredDevice> {
        let mut builder = Device::builder(config.ip.as_str(), config.token.as_str())
            .with_timeout(self.timeout)
            .with_stream_config(self.stream_config);
        if let Some(port) = config.port {
            builder = builder.with_http_port(port);
        }

        Ok(RegisteredDevice {
            alias: config.alias_or_ip().to_string(),
            ip: config.ip.clone(),
            token: config.token.clone(),
            name: None,
            model: None,
            device: Arc::new(builder.build()?),
        })
    }

    async fn apply_hardware_identity(
        &self,
        key: &str,
        queried: &Arc<Device>,
        name: &str,
        model: String,
    ) {
        let mut devices = self.devices.write().await;
        // Removed or replaced while the query was in flight.
        let Some(entry) = devices
            .get_mut(key)
            .filter(|entry| Arc::ptr_eq(&entry.device, queried))
        else {
            return;
        };

        let name = name.trim().to_string();
        if !model.is_empty() {
            entry.model = Some(model);
        }
        if name.is_empty() {
            return;
        }
        entry.name = Some(name.clone());

        if !entry.has_ip_alias() {
            return;
        }
        let new_key = name.to_lowercase();
        if devices.contains_key(&new_key) {
            tracing::debug!(ip = key, name = %name, "Hardware name already used as an alias");
            return;
        }

        if let Some(mut entry) = devices.remove(key) {
            tracing::info!(ip = %entry.ip, alias = %name, "Upgraded IP alias to hardware name");
            entry.alias = name;
            devices.insert(new_key, entry);
        }
    }
}

fn single(devices: &HashMap<String, RegisteredDevice>) -> Option<&RegisteredDevice> {
    if devices.len() == 1 {
        devices.values().next()
    } else {
        None
    }
}

fn sorted_aliases(devices: &HashMap<String, RegisteredDevice>) -> Vec<String> {
    let mut aliases: Vec<String> = devices.values().map(|d| d.alias.clone()).collect();
    aliases.sort_by_key(|a| a.to_lowercase());
    aliases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_uses_ip_without_alias() {
        let registry = DeviceRegistry::new();
        let entry = registry.register("10.0.0.5", "t", None).await.unwrap();
        assert_eq!(entry.alias(), "10.0.0.5");
        assert!(entry.has_ip_alias());
        assert_eq!(registry.aliases().await, vec!["10.0.0.5".to_string()]);
    }

    #[tokio::test]
    async fn register_replaces_same_alias() {
        let registry = DeviceRegistry::new();
        registry.register("10.0.0.5", "t", Some("Desk")).await.unwrap();
        registry.register("10.0.0.6", "t", Some("desk")).await.unwrap();
        assert_eq!(registry.len().await, 1);
        let entry = registry.resolve(Some("DESK")).await.unwrap();
        assert_eq!(entry.ip(), "10.0.0.6");
    }

    #[tokio::test]
    async fn register_rejects_empty_token() {
        let registry = DeviceRegistry::new();
        let err = registry.register("10.0.0.5", "", Some("desk")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn empty_identifier_means_default() {
        let registry = DeviceRegistry::new();
        registry.register("10.0.0.5", "t", Some("only")).await.unwrap();
        let entry = registry.resolve(Some("")).await.unwrap();
        assert_eq!(entry.alias(), "only");
    }

    #[tokio::test]
    async fn duplicate_ip_resolves_to_first_alias() {
        let registry = DeviceRegistry::new();
        registry.register("10.0.0.5", "t", Some("zeta")).await.unwrap();
        registry.register("10.0.0.5", "t", Some("alpha")).await.unwrap();
        let entry = registry.resolve(Some("10.0.0.5")).await.unwrap();
        assert_eq!(entry.alias(), "alpha");
    }

    #[test]
    fn from_config_rejects_duplicates() {
        let config = GatewayConfig {
            devices: vec![
                DeviceConfig::new("10.0.0.5", "t").with_alias("a"),
                DeviceConfig::new("10.0.0.6", "t").with_alias("A"),
            ],
            timeout_ms: None,
        };
        let err = DeviceRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
