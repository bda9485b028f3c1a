// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed view of the full device description.

use crate::layout::PanelLayout;
use crate::response::InfoResponse;

use super::DeviceState;

/// Everything `GET /` reports about a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Hardware name, e.g. `Shapes 4F2A`.
    pub name: String,
    /// Hardware model identifier, e.g. `NL42`.
    pub model: String,
    /// Serial number.
    pub serial_no: String,
    /// Manufacturer string.
    pub manufacturer: String,
    /// Firmware version.
    pub firmware_version: String,
    /// Current state fields and selected effect.
    pub state: DeviceState,
    /// Names of the stored effects.
    pub effects: Vec<String>,
    /// Physical panel arrangement.
    pub layout: PanelLayout,
}

impl From<InfoResponse> for DeviceInfo {
    fn from(info: InfoResponse) -> Self {
        let state = DeviceState::from_response(&info.state, &info.effects.select);
        let layout = PanelLayout::from(&info.panel_layout.layout);
        Self {
            name: info.name,
            model: info.model,
            serial_no: info.serial_no,
            manufacturer: info.manufacturer,
            firmware_version: info.firmware_version,
            state,
            effects: info.effects.effects_list,
            layout,
        }
    }
}
