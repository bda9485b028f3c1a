// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multi-device registry for front-ends.
//!
//! Front-ends (tool servers, HTTP bridges) address devices by a human alias
//! or an IP address. The [`DeviceRegistry`] maps both to a live
//! [`Device`](crate::Device) connection and applies the default-device rules:
//!
//! - no devices registered: [`Error::NotConfigured`](crate::Error::NotConfigured)
//! - no identifier and exactly one device: that device
//! - no identifier and several devices:
//!   [`Error::AmbiguousSelection`](crate::Error::AmbiguousSelection)
//!
//! # Examples
//!
//! ```no_run
//! use nanoleaf_gateway::manager::{DeviceRegistry, GatewayConfig, spawn_detached};
//!
//! # async fn example(json: &str) -> nanoleaf_gateway::Result<()> {
//! let registry = DeviceRegistry::from_config(&GatewayConfig::from_json(json)?)?;
//! registry.refresh_names().await;
//!
//! for summary in registry.list_with_status().await {
//!     println!("{}: {:?}", summary.alias, summary.status);
//! }
//!
//! let target = registry.resolve(Some("kitchen")).await?;
//! let device = target.device().clone();
//! spawn_detached("turn_on", async move { device.turn_on().await });
//! # Ok(())
//! # }
//! ```

mod device_config;
mod dispatch;
mod registry;

pub use device_config::{DeviceConfig, GatewayConfig};
pub use dispatch::spawn_detached;
pub use registry::{DeviceRegistry, DeviceStatus, DeviceSummary, RegisteredDevice};
