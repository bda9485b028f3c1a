// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication token issuance.
//!
//! A token is only handed out while the device is in pairing mode, which the
//! user enters by holding the power button for a few seconds. Outside that
//! window the device answers `403 Forbidden`.

use reqwest::StatusCode;

use crate::error::{Error, ParseError, ProtocolError};
use crate::protocol::HttpConfig;
use crate::protocol::http::build_client;
use crate::response::TokenResponse;

/// Requests a new authentication token from a device.
///
/// Any token already set on `config` is ignored.
///
/// # Errors
///
/// Returns [`Error::PairingNotActive`] if the device is not in pairing mode,
/// [`Error::Connectivity`] on transport failure or any other non-2xx
/// status, and [`Error::Parse`] if the body carries no token.
///
/// # Examples
///
/// ```no_run
/// use nanoleaf_gateway::protocol::{HttpConfig, request_token};
///
/// # async fn example() -> nanoleaf_gateway::Result<()> {
/// let token = request_token(&HttpConfig::new("192.168.1.40")).await?;
/// println!("paired: {token}");
/// # Ok(())
/// # }
/// ```
pub async fn request_token(config: &HttpConfig) -> Result<String, Error> {
    let url = format!("{}/new", config.base_url());
    let client = build_client(config.timeout())?;

    tracing::debug!(host = config.host(), "Requesting auth token");

    let response = client
        .post(&url)
        .send()
        .await
        .map_err(ProtocolError::Http)?;

    let status = response.status();
    if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
        tracing::info!(host = config.host(), "Device is not in pairing mode");
        return Err(Error::PairingNotActive);
    }
    if !status.is_success() {
        return Err(ProtocolError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
        .into());
    }

    let body = response.text().await.map_err(ProtocolError::Http)?;
    let token: TokenResponse = serde_json::from_str(&body).map_err(ParseError::Json)?;
    if token.auth_token.is_empty() {
        return Err(ParseError::MissingField("auth_token".to_string()).into());
    }

    tracing::info!(host = config.host(), "Paired with device");
    Ok(token.auth_token)
}
