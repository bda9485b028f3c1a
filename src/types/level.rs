// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clamped state-field values: brightness, hue and saturation.
//!
//! Device writes never fail on out-of-range numbers. Values are clamped
//! into their domain before they are put on the wire.

use std::fmt;

/// Brightness level (0-100%).
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::types::Brightness;
///
/// assert_eq!(Brightness::clamped(-5).value(), 0);
/// assert_eq!(Brightness::clamped(40).value(), 40);
/// assert_eq!(Brightness::clamped(250).value(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u8);

impl Brightness {
    /// Maximum brightness.
    pub const MAX: u8 = 100;

    /// Creates a brightness, clamping to `[0, 100]`.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        Self(clamp_to_u8(value, Self::MAX))
    }

    /// Returns the brightness in percent.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Hue in degrees (0-360).
///
/// 360 is accepted as written by the device API, even though it denotes the
/// same angle as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hue(u16);

impl Hue {
    /// Maximum hue.
    pub const MAX: u16 = 360;

    /// Creates a hue, clamping to `[0, 360]`.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        let value = value.clamp(0, i32::from(Self::MAX));
        Self(u16::try_from(value).unwrap_or(Self::MAX))
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Saturation level (0-100%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Saturation(u8);

impl Saturation {
    /// Maximum saturation.
    pub const MAX: u8 = 100;

    /// Creates a saturation, clamping to `[0, 100]`.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        Self(clamp_to_u8(value, Self::MAX))
    }

    /// Returns the saturation in percent.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

fn clamp_to_u8(value: i32, max: u8) -> u8 {
    let value = value.clamp(0, i32::from(max));
    u8::try_from(value).unwrap_or(max)
}
