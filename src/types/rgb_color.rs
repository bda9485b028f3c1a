// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex parsing and HSB conversion.
//!
//! Panels are addressed in RGB while the device state API speaks HSB, so
//! both directions of the conversion are needed:
//! - [`rgb_to_hsb`] when a caller picks a color for the whole device
//! - [`hsb_to_rgb`] when the current look has to be frozen into a static
//!   per-panel write

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

use super::HsbColor;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::types::RgbColor;
///
/// let color = RgbColor::new(255, 128, 0);
/// assert_eq!(color.red(), 255);
///
/// let red = RgbColor::from_hex("#FF0000").unwrap();
/// assert_eq!(red, RgbColor::new(255, 0, 0));
/// assert_eq!(red.to_hex_with_hash(), "#FF0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates an RGB color from wide integers, clamping each channel to
    /// `[0, 255]`.
    ///
    /// ```
    /// use nanoleaf_gateway::types::RgbColor;
    ///
    /// assert_eq!(RgbColor::clamped(300, -2, 64), RgbColor::new(255, 0, 64));
    /// ```
    #[must_use]
    pub fn clamped(red: i32, green: i32, blue: i32) -> Self {
        let channel = |v: i32| u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX);
        Self::new(channel(red), channel(green), channel(blue))
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts formats: `#RRGGBB`, `RRGGBB`, `#RGB`, `RGB`
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the hex string is invalid.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ValueError::InvalidHexColor(hex.to_string()));
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    // 0-F expands to 0-255
                    *slot = parse_hex_char(c).ok_or_else(|| invalid(hex))? * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = parse_hex_pair(&digits[0..2]).ok_or_else(|| invalid(hex))?;
                let g = parse_hex_pair(&digits[2..4]).ok_or_else(|| invalid(hex))?;
                let b = parse_hex_pair(&digits[4..6]).ok_or_else(|| invalid(hex))?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(invalid(hex)),
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color as a hex string without the hash prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Returns the color as a hex string with the hash prefix.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{}", self.to_hex())
    }

    /// Converts this RGB color to HSB format.
    #[must_use]
    pub fn to_hsb(&self) -> HsbColor {
        rgb_to_hsb(*self)
    }

    /// Creates an RGB color from an HSB color.
    #[must_use]
    pub fn from_hsb(hsb: &HsbColor) -> Self {
        hsb_to_rgb(*hsb)
    }

    /// Pure white.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black (all channels off).
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

fn invalid(hex: &str) -> ValueError {
    ValueError::InvalidHexColor(hex.to_string())
}

fn parse_hex_char(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

fn parse_hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

/// Converts an RGB color to HSB.
///
/// Hue is 0 for achromatic colors and saturation is 0 for black.
///
/// ```
/// use nanoleaf_gateway::types::{rgb_to_hsb, RgbColor};
///
/// let hsb = rgb_to_hsb(RgbColor::new(0, 255, 0));
/// assert_eq!(hsb.hue_degrees(), 120);
/// assert_eq!(hsb.saturation_percent(), 100);
/// assert_eq!(hsb.brightness_percent(), 100);
/// ```
#[must_use]
#[allow(clippy::float_cmp, clippy::many_single_char_names)]
pub fn rgb_to_hsb(color: RgbColor) -> HsbColor {
    let r = f64::from(color.red) / 255.0;
    let g = f64::from(color.green) / 255.0;
    let b = f64::from(color.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let brightness = max * 100.0;
    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    HsbColor::new(hue, saturation, brightness)
}

/// Converts an HSB color to RGB using the six-sector decomposition.
///
/// ```
/// use nanoleaf_gateway::types::{hsb_to_rgb, HsbColor, RgbColor};
///
/// let rgb = hsb_to_rgb(HsbColor::new(240.0, 100.0, 100.0));
/// assert_eq!(rgb, RgbColor::new(0, 0, 255));
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
pub fn hsb_to_rgb(color: HsbColor) -> RgbColor {
    let v = color.brightness() / 100.0;
    let s = color.saturation() / 100.0;
    let sector_position = color.hue() / 60.0;

    let c = v * s;
    let x = c * (1.0 - (sector_position % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (sector_position.floor() as u8) % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    RgbColor::new(channel(r), channel(g), channel(b))
}
