// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the gateway library.
//!
//! The taxonomy is closed: callers match on [`Error`] variants instead of
//! inspecting transport details. Front-ends typically map
//! [`Error::PairingNotActive`] to pairing instructions and the registry
//! variants to a message listing the known aliases.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The device could not be reached or answered with a non-2xx status.
    #[error("connectivity error: {0}")]
    Connectivity(#[from] ProtocolError),

    /// The device answered with a body that could not be understood.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A caller-supplied value was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValueError),

    /// No device has been registered.
    #[error("no devices configured")]
    NotConfigured,

    /// No identifier was given and several devices are registered.
    #[error("multiple devices configured, specify one of: {}", .aliases.join(", "))]
    AmbiguousSelection {
        /// Aliases of every registered device, sorted.
        aliases: Vec<String>,
    },

    /// The identifier matched neither an alias nor an IP address.
    #[error("device '{identifier}' not found, known devices: {}", .aliases.join(", "))]
    NotFound {
        /// The identifier that was looked up.
        identifier: String,
        /// Aliases of every registered device, sorted.
        aliases: Vec<String>,
    },

    /// Token creation was attempted while the device was not in pairing mode.
    #[error(
        "device is not in pairing mode: hold the power button for 5-7 seconds until the LED flashes, then retry within 30 seconds"
    )]
    PairingNotActive,
}

impl Error {
    /// Returns `true` if this error came from talking to the device.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// Returns `true` if this error asks the user to trigger pairing mode.
    #[must_use]
    pub fn is_pairing_not_active(&self) -> bool {
        matches!(self, Self::PairingNotActive)
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A panel id does not fit the width of the selected stream protocol.
    #[error("panel id {id} exceeds the maximum of {max} for this protocol")]
    PanelIdOutOfRange {
        /// The offending panel id.
        id: u16,
        /// Largest id the protocol can carry.
        max: u16,
    },

    /// More panels were addressed than the frame header can count.
    #[error("{count} panels exceed the maximum of {max} per frame")]
    TooManyPanels {
        /// Number of entries supplied.
        count: usize,
        /// Largest count the protocol can carry.
        max: usize,
    },

    /// A configuration document was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors related to transport communication (HTTP/UDP).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed (connection refused, timeout, DNS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Socket-level failure on the streaming channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing device responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::PanelIdOutOfRange { id: 300, max: 255 };
        assert_eq!(
            err.to_string(),
            "panel id 300 exceeds the maximum of 255 for this protocol"
        );
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidHexColor("zz".to_string()).into();
        assert!(matches!(err, Error::InvalidInput(ValueError::InvalidHexColor(_))));
    }

    #[test]
    fn ambiguous_selection_lists_aliases() {
        let err = Error::AmbiguousSelection {
            aliases: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "multiple devices configured, specify one of: a, b"
        );
    }

    #[test]
    fn not_found_lists_aliases() {
        let err = Error::NotFound {
            identifier: "den".to_string(),
            aliases: vec!["kitchen".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "device 'den' not found, known devices: kitchen"
        );
    }

    #[test]
    fn status_error_is_connectivity() {
        let err: Error = ProtocolError::Status {
            status: 500,
            reason: "Internal Server Error".to_string(),
        }
        .into();
        assert!(err.is_connectivity());
        assert!(!err.is_pairing_not_active());
        assert_eq!(
            err.to_string(),
            "connectivity error: HTTP 500 - Internal Server Error"
        );
    }
}
