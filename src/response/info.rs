// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full device description returned by `GET /`.

use serde::Deserialize;

/// Response body of `GET /api/v1/<token>/`.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::response::InfoResponse;
///
/// let json = r#"{
///     "name": "Shapes 4F2A",
///     "model": "NL42",
///     "state": {"on": {"value": true}, "brightness": {"value": 60, "min": 0, "max": 100}},
///     "effects": {"select": "*Solid*", "effectsList": ["Aurora"]}
/// }"#;
/// let info: InfoResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(info.model, "NL42");
/// assert!(info.state.on.value);
/// assert_eq!(info.state.brightness.value, 60);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoResponse {
    /// Hardware name.
    pub name: String,
    /// Serial number.
    pub serial_no: String,
    /// Manufacturer string.
    pub manufacturer: String,
    /// Firmware version.
    pub firmware_version: String,
    /// Hardware model identifier.
    pub model: String,
    /// Current state fields.
    pub state: StateResponse,
    /// Effect selection and catalog.
    pub effects: EffectsResponse,
    /// Physical panel arrangement.
    pub panel_layout: PanelLayoutResponse,
}

/// The `state` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateResponse {
    /// Power flag.
    pub on: ValueField<bool>,
    /// Brightness in percent.
    pub brightness: RangeValue,
    /// Hue in degrees.
    pub hue: RangeValue,
    /// Saturation in percent.
    pub sat: RangeValue,
    /// Color temperature in Kelvin.
    pub ct: RangeValue,
    /// Which input drives the panels (`effect`, `hs`, `ct`).
    pub color_mode: String,
}

/// A `{"value": x}` wrapper.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValueField<T: Default> {
    /// The wrapped value.
    pub value: T,
}

/// A `{"value": x, "min": a, "max": b}` numeric field.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RangeValue {
    /// Current value.
    pub value: i32,
    /// Lower bound.
    pub min: i32,
    /// Upper bound.
    pub max: i32,
}

/// The `effects` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsResponse {
    /// Name of the selected effect.
    pub select: String,
    /// Names of the stored effects.
    pub effects_list: Vec<String>,
}

/// The `panelLayout` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelLayoutResponse {
    /// Panel positions.
    pub layout: LayoutResponse,
    /// Whole-layout rotation.
    pub global_orientation: RangeValue,
}

/// The `panelLayout.layout` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutResponse {
    /// Panel count as reported by the device.
    pub num_panels: u32,
    /// Edge length of one panel in layout units.
    pub side_length: u32,
    /// One entry per panel, controllers included.
    pub position_data: Vec<PositionResponse>,
}

/// One entry of `positionData`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionResponse {
    /// Vendor-assigned panel id.
    pub panel_id: u16,
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// Rotation in degrees.
    pub o: i32,
    /// Shape-type code.
    pub shape_type: u16,
}

/// Response body of `POST /api/v1/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The issued token.
    pub auth_token: String,
}
