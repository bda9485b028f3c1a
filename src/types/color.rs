// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSB color and color temperature types.

use std::fmt;

/// Color temperature in Kelvin (1200-6500).
///
/// Panels accept white points between a warm 1200 K and a cool 6500 K.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::types::ColorTemperature;
///
/// let ct = ColorTemperature::clamped(100);
/// assert_eq!(ct.kelvin(), 1200);
///
/// let ct = ColorTemperature::clamped(9000);
/// assert_eq!(ct, ColorTemperature::COOL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorTemperature(u16);

impl ColorTemperature {
    /// Minimum color temperature (warmest).
    pub const MIN: u16 = 1200;

    /// Maximum color temperature (coolest).
    pub const MAX: u16 = 6500;

    /// Candlelight.
    pub const WARM: Self = Self(Self::MIN);

    /// Neutral white.
    pub const NEUTRAL: Self = Self(4000);

    /// Cool daylight.
    pub const COOL: Self = Self(Self::MAX);

    /// Creates a color temperature, clamping to the valid range.
    #[must_use]
    pub fn clamped(kelvin: i32) -> Self {
        let kelvin = kelvin.clamp(i32::from(Self::MIN), i32::from(Self::MAX));
        // The clamp above guarantees the value fits in u16.
        Self(u16::try_from(kelvin).unwrap_or(Self::MAX))
    }

    /// Returns the color temperature in Kelvin.
    #[must_use]
    pub const fn kelvin(&self) -> u16 {
        self.0
    }
}

impl Default for ColorTemperature {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

/// HSB color representation (Hue, Saturation, Brightness).
///
/// Components are kept with fractional precision so that converting an
/// [`RgbColor`](super::RgbColor) to HSB and back reproduces it. The integer
/// accessors round to the nearest value in each domain, which is what the
/// device API expects.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::types::HsbColor;
///
/// let teal = HsbColor::new(200.0, 80.0, 60.0);
/// assert_eq!(teal.hue_degrees(), 200);
/// assert_eq!(teal.saturation_percent(), 80);
/// assert_eq!(teal.brightness_percent(), 60);
///
/// // Out-of-range components are brought back into their domain
/// let wrapped = HsbColor::new(360.0, 120.0, -4.0);
/// assert_eq!(wrapped.hue_degrees(), 0);
/// assert_eq!(wrapped.saturation_percent(), 100);
/// assert_eq!(wrapped.brightness_percent(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsbColor {
    hue: f64,
    saturation: f64,
    brightness: f64,
}

impl HsbColor {
    /// Hue wraps at this value.
    pub const HUE_PERIOD: f64 = 360.0;

    /// Maximum saturation and brightness value.
    pub const MAX_PERCENT: f64 = 100.0;

    /// Creates a new HSB color.
    ///
    /// Hue is wrapped into `[0, 360)`; saturation and brightness are
    /// clamped into `[0, 100]`. Non-finite inputs become zero.
    #[must_use]
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue: finite_or_zero(hue).rem_euclid(Self::HUE_PERIOD),
            saturation: finite_or_zero(saturation).clamp(0.0, Self::MAX_PERCENT),
            brightness: finite_or_zero(brightness).clamp(0.0, Self::MAX_PERCENT),
        }
    }

    /// Creates an HSB color from the integer values reported by a device.
    #[must_use]
    pub fn from_device(hue: u16, saturation: u8, brightness: u8) -> Self {
        Self::new(f64::from(hue), f64::from(saturation), f64::from(brightness))
    }

    /// Returns the hue in degrees, `[0, 360)`.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns the saturation in percent, `[0, 100]`.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Returns the brightness in percent, `[0, 100]`.
    #[must_use]
    pub const fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Returns the hue rounded to whole degrees, `[0, 360)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn hue_degrees(&self) -> u16 {
        // A hue of 359.6 rounds to 360, which is the same angle as 0.
        (self.hue.round() as u16) % 360
    }

    /// Returns the saturation rounded to whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn saturation_percent(&self) -> u8 {
        self.saturation.round() as u8
    }

    /// Returns the brightness rounded to whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn brightness_percent(&self) -> u8 {
        self.brightness.round() as u8
    }
}

impl fmt::Display for HsbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.hue_degrees(),
            self.saturation_percent(),
            self.brightness_percent()
        )
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
