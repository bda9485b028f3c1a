// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write commands for the panel control API.
//!
//! # Available Commands
//!
//! | Command Type | Request | Example |
//! |-------------|---------|---------|
//! | [`StateCommand`] | `PUT /state` | `{"brightness": {"value": 40}}` |
//! | [`EffectCommand`] | `PUT /effects` | `{"select": "Aurora"}` |
//! | [`IdentifyCommand`] | `PUT /identify` | empty body |
//!
//! # Examples
//!
//! ```
//! use nanoleaf_gateway::command::{Command, StateCommand};
//! use nanoleaf_gateway::types::Brightness;
//!
//! let cmd = StateCommand::new().brightness(Brightness::clamped(40));
//! assert_eq!(cmd.path(), "/state");
//! assert_eq!(
//!     cmd.body().unwrap(),
//!     serde_json::json!({"brightness": {"value": 40}})
//! );
//! ```

mod effect;
mod state;

pub use effect::{EffectCommand, StaticAnimation};
pub use state::StateCommand;

/// A write that can be sent to a device.
///
/// Every control API write is a `PUT` against [`path`](Command::path).
pub trait Command {
    /// Returns the path relative to the token root, starting with `/`.
    fn path(&self) -> &'static str;

    /// Returns the JSON body, or `None` for an empty body.
    fn body(&self) -> Option<serde_json::Value>;
}

/// Flashes the panels so the user can tell which device this is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifyCommand;

impl Command for IdentifyCommand {
    fn path(&self) -> &'static str {
        "/identify"
    }

    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}
