// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sparse state writes (`PUT /state`).

use serde_json::{Map, Value, json};

use super::Command;
use crate::types::{Brightness, ColorTemperature, Hue, Saturation};

/// A partial update of the device state fields.
///
/// Only the fields that were set are written; each value is wrapped as
/// `{"value": x}` under its wire key (`on`, `brightness`, `hue`, `sat`,
/// `ct`).
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::command::{Command, StateCommand};
/// use nanoleaf_gateway::types::{Hue, Saturation};
///
/// let cmd = StateCommand::new()
///     .on(true)
///     .hue(Hue::clamped(400))
///     .saturation(Saturation::clamped(80));
///
/// assert_eq!(
///     cmd.body().unwrap(),
///     serde_json::json!({
///         "on": {"value": true},
///         "hue": {"value": 360},
///         "sat": {"value": 80}
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCommand {
    on: Option<bool>,
    brightness: Option<Brightness>,
    hue: Option<Hue>,
    saturation: Option<Saturation>,
    color_temperature: Option<ColorTemperature>,
}

impl StateCommand {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the power flag.
    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Sets the brightness.
    #[must_use]
    pub fn brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Sets the hue.
    #[must_use]
    pub fn hue(mut self, hue: Hue) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Sets the saturation.
    #[must_use]
    pub fn saturation(mut self, saturation: Saturation) -> Self {
        self.saturation = Some(saturation);
        self
    }

    /// Sets the color temperature.
    #[must_use]
    pub fn color_temperature(mut self, color_temperature: ColorTemperature) -> Self {
        self.color_temperature = Some(color_temperature);
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on.is_none() && !self.touches_color()
    }

    /// Returns `true` if any field other than the power flag is set.
    ///
    /// Those are the writes that stay invisible while an animated effect
    /// runs.
    #[must_use]
    pub fn touches_color(&self) -> bool {
        self.brightness.is_some()
            || self.hue.is_some()
            || self.saturation.is_some()
            || self.color_temperature.is_some()
    }
}

impl Command for StateCommand {
    fn path(&self) -> &'static str {
        "/state"
    }

    fn body(&self) -> Option<Value> {
        let mut fields = Map::new();
        if let Some(on) = self.on {
            fields.insert("on".to_string(), json!({ "value": on }));
        }
        if let Some(brightness) = self.brightness {
            fields.insert("brightness".to_string(), json!({ "value": brightness.value() }));
        }
        if let Some(hue) = self.hue {
            fields.insert("hue".to_string(), json!({ "value": hue.value() }));
        }
        if let Some(saturation) = self.saturation {
            fields.insert("sat".to_string(), json!({ "value": saturation.value() }));
        }
        if let Some(ct) = self.color_temperature {
            fields.insert("ct".to_string(), json!({ "value": ct.kelvin() }));
        }
        Some(Value::Object(fields))
    }
}
