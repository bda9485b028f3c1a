// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Effect writes (`PUT /effects`).

use std::fmt::Write as _;

use serde_json::{Value, json};

use super::Command;
use crate::protocol::StreamProtocol;
use crate::types::RgbColor;

/// A one-shot static animation addressing individual panels.
///
/// Serializes to the decimal-text `animData` descriptor: the panel count,
/// then per panel `id frames r g b w transition` with one frame, white 0 and
/// a transition of one decisecond.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::command::StaticAnimation;
/// use nanoleaf_gateway::types::RgbColor;
///
/// let anim = StaticAnimation::new(vec![
///     (12, RgbColor::new(255, 0, 0)),
///     (34, RgbColor::new(0, 0, 255)),
/// ]);
/// assert_eq!(anim.anim_data(), "2 12 1 255 0 0 0 1 34 1 0 0 255 0 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticAnimation {
    panels: Vec<(u16, RgbColor)>,
}

impl StaticAnimation {
    /// Creates an animation from `(panel id, color)` pairs, in write order.
    #[must_use]
    pub fn new(panels: Vec<(u16, RgbColor)>) -> Self {
        Self { panels }
    }

    /// Creates an animation painting every listed panel the same color.
    #[must_use]
    pub fn solid(panel_ids: &[u16], color: RgbColor) -> Self {
        Self::new(panel_ids.iter().map(|&id| (id, color)).collect())
    }

    /// Returns the addressed panels.
    #[must_use]
    pub fn panels(&self) -> &[(u16, RgbColor)] {
        &self.panels
    }

    /// Returns the number of addressed panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if no panel is addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Renders the `animData` descriptor.
    #[must_use]
    pub fn anim_data(&self) -> String {
        let mut data = self.panels.len().to_string();
        for (id, color) in &self.panels {
            // Writing into a String cannot fail.
            let _ = write!(
                data,
                " {id} 1 {} {} {} 0 1",
                color.red(),
                color.green(),
                color.blue()
            );
        }
        data
    }
}

/// Effect selection and custom effect writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectCommand {
    /// Switches to a named effect stored on the device.
    Select(String),
    /// Displays a static per-panel animation without storing it.
    Display(StaticAnimation),
    /// Enters external-control (streaming) mode.
    ExternalControl(StreamProtocol),
}

impl Command for EffectCommand {
    fn path(&self) -> &'static str {
        "/effects"
    }

    fn body(&self) -> Option<Value> {
        let body = match self {
            Self::Select(name) => json!({ "select": name }),
            Self::Display(animation) => json!({
                "write": {
                    "command": "display",
                    "animType": "static",
                    "animData": animation.anim_data(),
                    "loop": false,
                    "palette": [],
                }
            }),
            Self::ExternalControl(protocol) => json!({
                "write": {
                    "command": "display",
                    "animType": "extControl",
                    "extControlVersion": protocol.as_str(),
                }
            }),
        };
        Some(body)
    }
}
