// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transports for talking to light panels.
//!
//! # Channels
//!
//! - [`HttpClient`]: the token-scoped REST control API
//! - [`StreamChannel`]: the UDP side channel used in external-control mode,
//!   carrying frames produced by [`encode_frame`]
//! - [`request_token`]: pairing, against the unauthenticated API root

mod frame;
mod http;
mod pairing;
mod udp;

pub use frame::{LEGACY_MODEL, StreamProtocol, encode_frame, frame_panel_count};
pub use http::{HttpClient, HttpConfig};
pub use pairing::request_token;
pub use udp::{StreamChannel, StreamConfig};

/// Raw body returned by a successful HTTP request.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    body: String,
}

impl CommandResponse {
    /// Creates a new command response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, crate::error::ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}
