// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Low-latency UDP streaming.
//!
//! Streaming switches the device into external-control mode and then sends
//! color frames as UDP datagrams. The HTTP session keeps working alongside
//! it. Frames are fire-and-forget.

use crate::command::EffectCommand;
use crate::error::Result;
use crate::protocol::{StreamChannel, StreamProtocol, encode_frame};
use crate::types::RgbColor;

use super::Device;

/// An open streaming channel and what was learned while opening it.
#[derive(Debug)]
pub(crate) struct StreamSession {
    protocol: StreamProtocol,
    channel: StreamChannel,
    panel_ids: Vec<u16>,
}

impl StreamSession {
    async fn send(&self, colors: &[(u16, RgbColor)]) -> Result<()> {
        let frame = encode_frame(self.protocol, colors)?;
        self.channel.send(&frame).await?;
        Ok(())
    }
}

impl Device {
    /// Switches the device into external-control mode and opens the channel.
    ///
    /// The protocol version follows the hardware model. Calling this while a
    /// session is active replaces it, which also re-enters external control
    /// if the device left it in the meantime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the
    /// device cannot be reached or the socket cannot be opened. No session is
    /// kept in that case.
    pub async fn initialize_streaming(&self) -> Result<StreamProtocol> {
        let mut session = self.stream.lock().await;
        *session = None;
        let opened = self.open_stream_session().await?;
        let protocol = opened.protocol;
        *session = Some(opened);
        Ok(protocol)
    }

    /// Streams per-panel colors as one frame.
    ///
    /// Opens the session first if none is active. Concurrent callers share a
    /// single initialization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if a
    /// panel id or the panel count does not fit the protocol, and
    /// [`Error::Connectivity`](crate::Error::Connectivity) if the session
    /// cannot be opened or the datagram cannot be sent.
    pub async fn stream_colors<I>(&self, colors: I) -> Result<()>
    where
        I: IntoIterator<Item = (u16, RgbColor)>,
    {
        let colors: Vec<(u16, RgbColor)> = colors.into_iter().collect();
        let mut session = self.stream.lock().await;
        if session.is_none() {
            *session = Some(self.open_stream_session().await?);
        }
        if let Some(active) = session.as_ref() {
            active.send(&colors).await?;
        }
        Ok(())
    }

    /// Streams one color to every panel known when the session was opened.
    ///
    /// # Errors
    ///
    /// Same as [`stream_colors`](Self::stream_colors).
    pub async fn stream_solid_color(&self, color: RgbColor) -> Result<()> {
        let mut session = self.stream.lock().await;
        if session.is_none() {
            *session = Some(self.open_stream_session().await?);
        }
        if let Some(active) = session.as_ref() {
            let colors: Vec<(u16, RgbColor)> =
                active.panel_ids.iter().map(|&id| (id, color)).collect();
            active.send(&colors).await?;
        }
        Ok(())
    }

    /// Closes the streaming channel.
    ///
    /// Returns `true` if a session was active. The device stays in
    /// external-control mode until another effect is selected.
    pub async fn stop_streaming(&self) -> bool {
        let closed = self.stream.lock().await.take().is_some();
        if closed {
            tracing::info!(host = %self.host, "Streaming stopped");
        }
        closed
    }

    /// Returns `true` while a streaming session is active.
    pub async fn is_streaming(&self) -> bool {
        self.stream.lock().await.is_some()
    }

    /// Returns the protocol of the active session, if any.
    pub async fn stream_protocol(&self) -> Option<StreamProtocol> {
        self.stream.lock().await.as_ref().map(|s| s.protocol)
    }

    async fn open_stream_session(&self) -> Result<StreamSession> {
        let info = self.get_info().await?;
        let protocol = StreamProtocol::for_model(&info.model);
        let panel_ids = info.layout.panel_ids();

        self.http
            .send_command(&EffectCommand::ExternalControl(protocol))
            .await?;

        let port = self.stream_config.port(protocol);
        let channel = StreamChannel::open(&self.host, port).await?;

        tracing::info!(
            host = %self.host,
            model = %info.model,
            %protocol,
            port,
            panels = panel_ids.len(),
            "Streaming initialized"
        );

        Ok(StreamSession {
            protocol,
            channel,
            panel_ids,
        })
    }
}
