// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection to one light-panel device.
//!
//! A [`Device`] owns the token-scoped HTTP session, the streaming session and
//! a memo of which panels emit light. All operations talk to the device
//! directly; failures surface as
//! [`Error::Connectivity`](crate::Error::Connectivity) and are never retried
//! here.
//!
//! # Static mode
//!
//! The firmware ignores brightness, hue, saturation and color-temperature
//! writes while an animated effect is selected. Before such a write the
//! device is checked, and an animated look is first frozen into a static
//! per-panel write of the current color so the change becomes visible.
//!
//! ```no_run
//! use nanoleaf_gateway::Device;
//!
//! # async fn example() -> nanoleaf_gateway::Result<()> {
//! let device = Device::builder("192.168.1.40", "token").build()?;
//!
//! device.turn_on().await?;
//! device.set_brightness(40).await?;
//! device.set_effect("Northern Lights").await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod reconcile;
mod streaming;

pub use builder::DeviceBuilder;

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::command::{EffectCommand, IdentifyCommand, StateCommand, StaticAnimation};
use crate::error::Result;
use crate::layout::PanelLayout;
use crate::protocol::{HttpClient, StreamConfig};
use crate::response::InfoResponse;
use crate::state::{DeviceInfo, DeviceState};
use crate::types::{Brightness, ColorTemperature, Hue, RgbColor, Saturation};

use streaming::StreamSession;

/// An authenticated connection to one device.
///
/// Writes issued through the same `Device` are serialized, so a static-mode
/// check and the write that follows it are not interleaved with another
/// write from this process. Changes made on the device itself (app, buttons)
/// can still land in between.
#[derive(Debug)]
pub struct Device {
    host: String,
    http: HttpClient,
    stream_config: StreamConfig,
    light_panel_ids: RwLock<Option<Arc<[u16]>>>,
    write_lock: Mutex<()>,
    stream: Mutex<Option<StreamSession>>,
}

impl Device {
    /// Creates a builder for a device at `host` using `token`.
    #[must_use]
    pub fn builder(host: impl Into<String>, token: impl Into<String>) -> DeviceBuilder {
        DeviceBuilder::new(host, token)
    }

    pub(crate) fn new(host: String, http: HttpClient, stream_config: StreamConfig) -> Self {
        Self {
            host,
            http,
            stream_config,
            light_panel_ids: RwLock::new(None),
            write_lock: Mutex::new(()),
            stream: Mutex::new(None),
        }
    }

    /// Returns the host this device is reached at.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    // ========== Queries ==========

    /// Fetches the full device description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails and
    /// [`Error::Parse`](crate::Error::Parse) if the body is not a device description.
    pub async fn get_info(&self) -> Result<DeviceInfo> {
        let response = self.http.get("/").await?;
        let info: InfoResponse = response.parse()?;
        Ok(info.into())
    }

    /// Fetches the current state fields and selected effect.
    ///
    /// # Errors
    ///
    /// Same as [`get_info`](Self::get_info).
    pub async fn get_state(&self) -> Result<DeviceState> {
        Ok(self.get_info().await?.state)
    }

    /// Fetches the panel arrangement.
    ///
    /// # Errors
    ///
    /// Same as [`get_info`](Self::get_info).
    pub async fn get_panel_layout(&self) -> Result<PanelLayout> {
        Ok(self.get_info().await?.layout)
    }

    // ========== Power ==========

    /// Turns the panels on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails.
    pub async fn turn_on(&self) -> Result<()> {
        self.set_state(StateCommand::new().on(true)).await
    }

    /// Turns the panels off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.set_state(StateCommand::new().on(false)).await
    }

    // ========== State fields ==========

    /// Sets the brightness, clamped to 0-100.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_brightness(&self, brightness: i32) -> Result<()> {
        self.set_state(StateCommand::new().brightness(Brightness::clamped(brightness)))
            .await
    }

    /// Sets the hue, clamped to 0-360.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_hue(&self, hue: i32) -> Result<()> {
        self.set_state(StateCommand::new().hue(Hue::clamped(hue))).await
    }

    /// Sets the saturation, clamped to 0-100.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_saturation(&self, saturation: i32) -> Result<()> {
        self.set_state(StateCommand::new().saturation(Saturation::clamped(saturation)))
            .await
    }

    /// Sets the color temperature, clamped to 1200-6500 K.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_color_temperature(&self, kelvin: i32) -> Result<()> {
        self.set_state(
            StateCommand::new().color_temperature(ColorTemperature::clamped(kelvin)),
        )
        .await
    }

    /// Writes any combination of state fields in one request.
    ///
    /// An empty update is a no-op. Updates that touch a color field go
    /// through the static-mode check first; a power-only update does not.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_state(&self, update: StateCommand) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        if update.touches_color() {
            self.ensure_static().await?;
        }
        self.http.send_command(&update).await?;
        Ok(())
    }

    // ========== Per-panel color ==========

    /// Paints every light-emitting panel one color.
    ///
    /// Controller units are skipped. The set of light panels is fetched on
    /// first use and remembered for the lifetime of this connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if any request fails.
    pub async fn set_color(&self, color: RgbColor) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let ids = self.light_panel_ids().await?;
        self.display(StaticAnimation::solid(&ids, color)).await
    }

    /// Paints the given panels, leaving the others as they are.
    ///
    /// Panels are written in iteration order. An empty set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails.
    pub async fn set_panel_colors<I>(&self, colors: I) -> Result<()>
    where
        I: IntoIterator<Item = (u16, RgbColor)>,
    {
        let animation = StaticAnimation::new(colors.into_iter().collect());
        if animation.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        self.display(animation).await
    }

    /// Forgets the remembered set of light-emitting panels.
    ///
    /// The next whole-device color write fetches the layout again. Use this
    /// after panels were added or removed.
    pub fn clear_panel_cache(&self) {
        *self.light_panel_ids.write() = None;
    }

    // ========== Effects ==========

    /// Lists the effects stored on the device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails and
    /// [`Error::Parse`](crate::Error::Parse) if the body is not a list of names.
    pub async fn list_effects(&self) -> Result<Vec<String>> {
        let response = self.http.get("/effects/effectsList").await?;
        Ok(response.parse()?)
    }

    /// Returns the name of the selected effect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails and
    /// [`Error::Parse`](crate::Error::Parse) if the body is not a name.
    pub async fn get_current_effect(&self) -> Result<String> {
        let response = self.http.get("/effects/select").await?;
        Ok(response.parse()?)
    }

    /// Selects a stored effect by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails, including when
    /// the device does not know the effect.
    pub async fn set_effect(&self, name: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.http
            .send_command(&EffectCommand::Select(name.to_string()))
            .await?;
        Ok(())
    }

    /// Flashes the panels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connectivity`](crate::Error::Connectivity) if the request fails.
    pub async fn identify(&self) -> Result<()> {
        self.http.send_command(&IdentifyCommand).await?;
        Ok(())
    }

    // ========== Helpers ==========

    async fn display(&self, animation: StaticAnimation) -> Result<()> {
        tracing::debug!(host = %self.host, panels = animation.len(), "Writing static panel colors");
        self.http
            .send_command(&EffectCommand::Display(animation))
            .await?;
        Ok(())
    }

    async fn light_panel_ids(&self) -> Result<Arc<[u16]>> {
        let cached = self.light_panel_ids.read().clone();
        if let Some(ids) = cached {
            return Ok(ids);
        }
        let layout = self.get_panel_layout().await?;
        Ok(self.remember_light_panels(&layout))
    }

    fn remember_light_panels(&self, layout: &PanelLayout) -> Arc<[u16]> {
        let mut cache = self.light_panel_ids.write();
        Arc::clone(cache.get_or_insert_with(|| layout.light_panel_ids().into()))
    }
}
