// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state as read from the device.

use std::fmt;

use crate::response::{RangeValue, StateResponse};
use crate::types::{HsbColor, RgbColor};

/// Effect names the firmware uses for a plain, non-animated look.
pub const STATIC_EFFECT_MARKERS: [&str; 2] = ["*Static*", "*Solid*"];

/// Whether the selected effect lets state-field writes show.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::state::EffectMode;
///
/// assert_eq!(EffectMode::classify("*Solid*"), EffectMode::Static);
/// assert_eq!(EffectMode::classify("*Dynamic*"), EffectMode::Animated);
/// assert_eq!(EffectMode::classify("Northern Lights"), EffectMode::Animated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectMode {
    /// The panels show the state fields directly.
    Static,
    /// An effect drives the panels and hides state-field writes.
    Animated,
}

impl EffectMode {
    /// Classifies an effect name.
    #[must_use]
    pub fn classify(selected_effect: &str) -> Self {
        if STATIC_EFFECT_MARKERS.contains(&selected_effect) {
            Self::Static
        } else {
            Self::Animated
        }
    }
}

/// Which input currently drives the panel colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// An effect.
    Effect,
    /// Hue and saturation.
    HueSaturation,
    /// Color temperature.
    ColorTemperature,
    /// A mode this library does not know.
    Other(String),
}

impl From<&str> for ColorMode {
    fn from(value: &str) -> Self {
        match value {
            "effect" => Self::Effect,
            "hs" => Self::HueSaturation,
            "ct" => Self::ColorTemperature,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect => f.write_str("effect"),
            Self::HueSaturation => f.write_str("hs"),
            Self::ColorTemperature => f.write_str("ct"),
            Self::Other(mode) => f.write_str(mode),
        }
    }
}

/// A numeric state field with the bounds the device reports for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateRange {
    /// Current value.
    pub value: i32,
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
}

impl From<RangeValue> for StateRange {
    fn from(range: RangeValue) -> Self {
        Self {
            value: range.value,
            min: range.min,
            max: range.max,
        }
    }
}

/// Snapshot of the device state.
///
/// Always read fresh from the device; a snapshot is only meant to be used
/// within the operation that fetched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    /// Power flag.
    pub on: bool,
    /// Brightness in percent.
    pub brightness: StateRange,
    /// Hue in degrees.
    pub hue: StateRange,
    /// Saturation in percent.
    pub saturation: StateRange,
    /// Color temperature in Kelvin.
    pub color_temperature: StateRange,
    /// Name of the selected effect.
    pub selected_effect: String,
    /// Which input drives the panels.
    pub color_mode: ColorMode,
}

impl DeviceState {
    /// Builds a snapshot from the wire model and the selected effect name.
    #[must_use]
    pub fn from_response(state: &StateResponse, selected_effect: &str) -> Self {
        Self {
            on: state.on.value,
            brightness: state.brightness.into(),
            hue: state.hue.into(),
            saturation: state.sat.into(),
            color_temperature: state.ct.into(),
            selected_effect: selected_effect.to_string(),
            color_mode: ColorMode::from(state.color_mode.as_str()),
        }
    }

    /// Classifies the selected effect.
    #[must_use]
    pub fn effect_mode(&self) -> EffectMode {
        EffectMode::classify(&self.selected_effect)
    }

    /// Returns the current hue, saturation and brightness as one color.
    #[must_use]
    pub fn hsb(&self) -> HsbColor {
        HsbColor::new(
            f64::from(self.hue.value),
            f64::from(self.saturation.value),
            f64::from(self.brightness.value),
        )
    }

    /// Returns the current hue, saturation and brightness converted to RGB.
    #[must_use]
    pub fn rgb(&self) -> RgbColor {
        RgbColor::from_hsb(&self.hsb())
    }
}
