// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static-mode reconciliation.

use crate::command::StaticAnimation;
use crate::error::Result;
use crate::state::EffectMode;

use super::Device;

impl Device {
    /// Makes sure the device is showing a static look.
    ///
    /// If an animated effect is selected, the current hue, saturation and
    /// brightness are converted to RGB and written to every light panel as a
    /// static effect. Returns the mode found before any change.
    ///
    /// Must be called with the write lock held.
    pub(super) async fn ensure_static(&self) -> Result<EffectMode> {
        let info = self.get_info().await?;
        let mode = info.state.effect_mode();
        if mode == EffectMode::Static {
            return Ok(mode);
        }

        let color = info.state.rgb();
        tracing::debug!(
            host = %self.host,
            effect = %info.state.selected_effect,
            %color,
            "Freezing animated effect into static colors"
        );

        let ids = self.remember_light_panels(&info.layout);
        self.display(StaticAnimation::solid(&ids, color)).await?;
        Ok(mode)
    }
}
