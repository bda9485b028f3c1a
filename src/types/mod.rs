// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for panel control.
//!
//! # Types
//!
//! - [`RgbColor`] - 8-bit RGB color, the unit of per-panel writes
//! - [`HsbColor`] - Hue/saturation/brightness, the unit of device state
//! - [`Brightness`], [`Hue`], [`Saturation`] - Clamped state-field values
//! - [`ColorTemperature`] - White point in Kelvin (1200-6500)

mod color;
mod level;
mod rgb_color;

pub use color::{ColorTemperature, HsbColor};
pub use level::{Brightness, Hue, Saturation};
pub use rgb_color::{RgbColor, hsb_to_rgb, rgb_to_hsb};
