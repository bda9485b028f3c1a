// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound UDP channel for streaming frames.
//!
//! Datagrams are fire-and-forget: the device never acknowledges them and
//! nothing is retried.

use std::net::SocketAddr;

use tokio::net::UdpSocket;

use crate::error::ProtocolError;

use super::StreamProtocol;

/// Destination ports for the streaming channel.
///
/// Defaults to the fixed ports the device listens on. Overriding a port is
/// mainly useful to point the channel at a local socket in tests.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::protocol::{StreamConfig, StreamProtocol};
///
/// let config = StreamConfig::default().with_port(StreamProtocol::V2, 9000);
/// assert_eq!(config.port(StreamProtocol::V1), 60221);
/// assert_eq!(config.port(StreamProtocol::V2), 9000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    v1_port: u16,
    v2_port: u16,
}

impl StreamConfig {
    /// Overrides the destination port for one protocol version.
    #[must_use]
    pub fn with_port(mut self, protocol: StreamProtocol, port: u16) -> Self {
        match protocol {
            StreamProtocol::V1 => self.v1_port = port,
            StreamProtocol::V2 => self.v2_port = port,
        }
        self
    }

    /// Returns the destination port for a protocol version.
    #[must_use]
    pub fn port(&self, protocol: StreamProtocol) -> u16 {
        match protocol {
            StreamProtocol::V1 => self.v1_port,
            StreamProtocol::V2 => self.v2_port,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            v1_port: StreamProtocol::V1.default_port(),
            v2_port: StreamProtocol::V2.default_port(),
        }
    }
}

/// A connected UDP socket carrying frames to one device.
#[derive(Debug)]
pub struct StreamChannel {
    socket: UdpSocket,
    target: SocketAddr,
}

impl StreamChannel {
    /// Opens a channel to `host:port`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Io` if the socket cannot be bound or the host
    /// cannot be resolved.
    pub async fn open(host: &str, port: u16) -> Result<Self, ProtocolError> {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let target = tokio::net::lookup_host((host, port))
            .await?
            .next()
            .ok_or_else(|| ProtocolError::InvalidAddress(format!("{host}:{port}")))?;

        let bind_addr: SocketAddr = if target.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.connect(target).await?;

        tracing::debug!(%target, "Opened streaming channel");
        Ok(Self { socket, target })
    }

    /// Returns the destination address.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Sends one frame as a single datagram.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Io` if the datagram cannot be handed to the
    /// network stack.
    pub async fn send(&self, frame: &[u8]) -> Result<(), ProtocolError> {
        let sent = self.socket.send(frame).await?;
        tracing::debug!(target = %self.target, bytes = sent, "Sent stream frame");
        Ok(())
    }
}
