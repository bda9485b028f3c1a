// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device state.
//!
//! State is authoritative on the device and polled on demand. Nothing here
//! is cached between operations.
//!
//! # Examples
//!
//! ```
//! use nanoleaf_gateway::response::InfoResponse;
//! use nanoleaf_gateway::state::{DeviceInfo, EffectMode};
//!
//! let json = r#"{"effects": {"select": "*Static*"}}"#;
//! let info = DeviceInfo::from(serde_json::from_str::<InfoResponse>(json).unwrap());
//! assert_eq!(info.state.effect_mode(), EffectMode::Static);
//! ```

mod device_info;
mod device_state;

pub use device_info::DeviceInfo;
pub use device_state::{
    ColorMode, DeviceState, EffectMode, STATIC_EFFECT_MARKERS, StateRange,
};
