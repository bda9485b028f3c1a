// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device builder.

use std::time::Duration;

use crate::device::Device;
use crate::error::{Result, ValueError};
use crate::protocol::{HttpConfig, StreamConfig, StreamProtocol};
use crate::state::DeviceInfo;

/// Builder for [`Device`] connections.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use nanoleaf_gateway::Device;
///
/// # async fn example() -> nanoleaf_gateway::Result<()> {
/// // No network access until the first operation
/// let device = Device::builder("192.168.1.40", "token").build()?;
///
/// // Verify the device answers and fetch its description up front
/// let (device, info) = Device::builder("192.168.1.41", "token")
///     .with_timeout(Duration::from_secs(3))
///     .connect()
///     .await?;
/// println!("{} ({})", info.name, info.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceBuilder {
    config: HttpConfig,
    stream_config: StreamConfig,
}

impl DeviceBuilder {
    pub(crate) fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            config: HttpConfig::new(host).with_token(token),
            stream_config: StreamConfig::default(),
        }
    }

    /// Sets the HTTP API port (default 16021).
    #[must_use]
    pub fn with_http_port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Sets the per-request timeout (default 10 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Overrides the UDP destination port for one streaming protocol.
    #[must_use]
    pub fn with_stream_port(mut self, protocol: StreamProtocol, port: u16) -> Self {
        self.stream_config = self.stream_config.with_port(protocol, port);
        self
    }

    /// Replaces the streaming port configuration.
    #[must_use]
    pub fn with_stream_config(mut self, stream_config: StreamConfig) -> Self {
        self.stream_config = stream_config;
        self
    }

    /// Builds the device without contacting it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// host or token is empty, and
    /// [`Error::Connectivity`](crate::Error::Connectivity) if the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<Device> {
        if self.config.host().trim().is_empty() {
            return Err(
                ValueError::InvalidConfiguration("device host is required".to_string()).into(),
            );
        }
        if self.config.token().is_none_or(|t| t.trim().is_empty()) {
            return Err(ValueError::InvalidConfiguration(format!(
                "device '{}' has no token",
                self.config.host()
            ))
            .into());
        }

        let host = self.config.host().to_string();
        let http = self.config.into_client()?;
        Ok(Device::new(host, http, self.stream_config))
    }

    /// Builds the device and fetches its description.
    ///
    /// Fails if the device is unreachable or rejects the token, so a bad
    /// configuration is caught before the first real operation.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build), plus any error of
    /// [`Device::get_info`].
    pub async fn connect(self) -> Result<(Device, DeviceInfo)> {
        let device = self.build()?;
        let info = device.get_info().await?;
        tracing::info!(host = device.host(), name = %info.name, model = %info.model, "Connected to device");
        Ok((device, info))
    }
}
