// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the panel control API.

use std::time::Duration;

use reqwest::{Client, Method};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::protocol::CommandResponse;

// ============================================================================
// HttpConfig - Connection parameters for one device
// ============================================================================

/// Configuration for the HTTP side of a device connection.
///
/// The control API lives under `/api/v1/<token>` on port 16021. Every
/// request issued with this configuration is bounded by its timeout.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.40")
///     .with_token("abc123")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://192.168.1.40:16021/api/v1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    token: Option<String>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default API port.
    pub const DEFAULT_PORT: u16 = 16021;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-device authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the token if set.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the unauthenticated API root, `http://<host>:<port>/api/v1`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("http://{host}:{}/api/v1", self.port)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if no token is set, the host is empty, or the HTTP
    /// client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProtocolError::InvalidAddress("token is required".to_string()))?;

        let base_url = format!("{}/{}", self.base_url(), urlencoding::encode(token));
        let client = build_client(self.timeout)?;

        Ok(HttpClient { base_url, client })
    }
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client, ProtocolError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ProtocolError::Http)
}

// ============================================================================
// HttpClient - Token-scoped request executor
// ============================================================================

/// HTTP client bound to one device and one token.
///
/// Paths passed to this client are relative to `/api/v1/<token>`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Issues a `GET` for a path relative to the token root.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout or a non-2xx
    /// status.
    pub async fn get(&self, path: &str) -> Result<CommandResponse, ProtocolError> {
        self.execute(Method::GET, path, None).await
    }

    /// Sends a command to the device as a `PUT`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout or a non-2xx
    /// status.
    pub async fn send_command<C: Command + ?Sized>(
        &self,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError> {
        self.execute(Method::PUT, command.path(), command.body())
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<CommandResponse, ProtocolError> {
        let url = format!("{}{path}", self.base_url);

        // The token is part of the URL, so only the relative path is logged.
        tracing::debug!(%method, path, "Sending HTTP request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), path, "HTTP request rejected");
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Received HTTP response");

        Ok(CommandResponse::new(body))
    }
}
