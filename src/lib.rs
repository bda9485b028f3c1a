// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nanoleaf Gateway - A Rust library to control Nanoleaf light panels.
//!
//! This library provides async APIs to drive Nanoleaf panel systems through
//! their local HTTP control API and their low-latency UDP streaming channel,
//! plus a registry that lets front-ends address several devices by alias.
//!
//! # Supported Features
//!
//! - **Power and state**: On/off, brightness, hue, saturation, color temperature
//! - **Per-panel color**: Static writes to any subset of panels
//! - **Effects**: List, query and select stored effects
//! - **Streaming**: Frame-by-frame colors over UDP (protocol v1 and v2)
//! - **Pairing**: Request an authentication token from a device in pairing mode
//!
//! State writes are made visible even when an animated effect is running: the
//! current look is first frozen into a static per-panel write.
//!
//! # Quick Start
//!
//! ## Single Device
//!
//! ```no_run
//! use nanoleaf_gateway::{Device, RgbColor};
//!
//! #[tokio::main]
//! async fn main() -> nanoleaf_gateway::Result<()> {
//!     // Returns (device, info) tuple
//!     let (device, info) = Device::builder("192.168.1.40", "auth-token")
//!         .connect()
//!         .await?;
//!     println!("{} has {} panels", info.name, info.layout.len());
//!
//!     device.turn_on().await?;
//!     device.set_hue(200).await?;
//!     device.set_color(RgbColor::from_hex("#FF8800")?).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```no_run
//! use nanoleaf_gateway::{Device, RgbColor};
//!
//! #[tokio::main]
//! async fn main() -> nanoleaf_gateway::Result<()> {
//!     let device = Device::builder("192.168.1.40", "auth-token").build()?;
//!
//!     let protocol = device.initialize_streaming().await?;
//!     println!("streaming with protocol {protocol}");
//!
//!     device.stream_colors([(11, RgbColor::new(255, 0, 0)), (12, RgbColor::new(0, 0, 255))]).await?;
//!     device.stream_solid_color(RgbColor::white()).await?;
//!     device.stop_streaming().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Several Devices
//!
//! ```no_run
//! use nanoleaf_gateway::manager::DeviceRegistry;
//!
//! #[tokio::main]
//! async fn main() -> nanoleaf_gateway::Result<()> {
//!     let registry = DeviceRegistry::new();
//!     registry.register("192.168.1.40", "token-a", Some("kitchen")).await?;
//!     registry.register("192.168.1.41", "token-b", None).await?;
//!     registry.refresh_names().await;
//!
//!     registry.resolve(Some("kitchen")).await?.device().turn_off().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pairing
//!
//! ```no_run
//! use nanoleaf_gateway::protocol::{HttpConfig, request_token};
//!
//! #[tokio::main]
//! async fn main() {
//!     match request_token(&HttpConfig::new("192.168.1.40")).await {
//!         Ok(token) => println!("token: {token}"),
//!         Err(e) if e.is_pairing_not_active() => {
//!             println!("hold the power button for 5-7 seconds, then retry");
//!         }
//!         Err(e) => eprintln!("pairing failed: {e}"),
//!     }
//! }
//! ```

pub mod command;
mod device;
pub mod error;
pub mod layout;
pub mod manager;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use command::{Command, EffectCommand, IdentifyCommand, StateCommand, StaticAnimation};
pub use device::{Device, DeviceBuilder};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use layout::{BoundingBox, PanelLayout, PanelPosition};
pub use manager::{DeviceRegistry, RegisteredDevice};
pub use protocol::{HttpConfig, StreamConfig, StreamProtocol};
pub use state::{DeviceInfo, DeviceState, EffectMode};
pub use types::{Brightness, ColorTemperature, HsbColor, Hue, RgbColor, Saturation};
