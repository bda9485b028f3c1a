// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire models for device responses.
//!
//! These mirror the JSON the device returns and are deliberately lenient:
//! missing objects fall back to defaults so that firmware differences do not
//! break parsing. Typed views live in [`crate::state`] and [`crate::layout`].

mod info;

pub use info::{
    EffectsResponse, InfoResponse, LayoutResponse, PanelLayoutResponse, PositionResponse,
    RangeValue, StateResponse, TokenResponse, ValueField,
};
