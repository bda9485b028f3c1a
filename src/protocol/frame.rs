// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary frame codec for the external-control streaming channel.
//!
//! Two layouts exist, selected by hardware model:
//!
//! | Version | Header | Per panel |
//! |---------|--------|-----------|
//! | V1 | `count: u8` | `id: u8, frames: u8 = 1, r, g, b, w = 0, transition: u8 = 1` |
//! | V2 | `count: u16 BE` | `id: u16 BE, r, g, b, w = 0, transition: u16 BE = 1` |
//!
//! The white channel is always zero and the transition time is always one
//! decisecond.

use std::fmt;

use crate::error::ValueError;
use crate::types::RgbColor;

/// Model identifier of the legacy hardware that only understands V1 frames.
pub const LEGACY_MODEL: &str = "NL22";

/// Transition time written into every frame entry, in deciseconds.
const TRANSITION_DECISECONDS: u8 = 1;

/// Streaming protocol version.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::protocol::StreamProtocol;
///
/// assert_eq!(StreamProtocol::for_model("NL22"), StreamProtocol::V1);
/// assert_eq!(StreamProtocol::for_model("NL42"), StreamProtocol::V2);
/// assert_eq!(StreamProtocol::V2.as_str(), "v2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamProtocol {
    /// Legacy layout with one-byte panel ids.
    V1,
    /// Current layout with two-byte panel ids.
    V2,
}

impl StreamProtocol {
    /// Picks the protocol for a reported hardware model.
    #[must_use]
    pub fn for_model(model: &str) -> Self {
        if model.trim().eq_ignore_ascii_case(LEGACY_MODEL) {
            Self::V1
        } else {
            Self::V2
        }
    }

    /// Returns the value of the `extControlVersion` field for this protocol.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Returns the UDP port the device listens on for this protocol.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::V1 => 60221,
            Self::V2 => 60222,
        }
    }

    /// Size of the panel count header in bytes.
    #[must_use]
    pub const fn header_len(&self) -> usize {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Size of one panel entry in bytes.
    #[must_use]
    pub const fn entry_len(&self) -> usize {
        match self {
            Self::V1 => 7,
            Self::V2 => 8,
        }
    }

    /// Largest panel id the protocol can address.
    #[must_use]
    pub const fn max_panel_id(&self) -> u16 {
        match self {
            Self::V1 => 0xFF,
            Self::V2 => u16::MAX,
        }
    }

    /// Largest number of panels one frame can carry.
    #[must_use]
    pub const fn max_panels(&self) -> usize {
        match self {
            Self::V1 => 0xFF,
            Self::V2 => 0xFFFF,
        }
    }

    /// Returns the exact frame length for `panels` entries.
    #[must_use]
    pub const fn frame_len(&self, panels: usize) -> usize {
        self.header_len() + self.entry_len() * panels
    }
}

impl fmt::Display for StreamProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes per-panel colors into a single streaming frame.
///
/// Entries are written in the given order.
///
/// # Errors
///
/// Returns `ValueError::TooManyPanels` if the header cannot count the
/// entries, or `ValueError::PanelIdOutOfRange` if an id does not fit the
/// protocol's id width. Nothing is encoded in either case.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::protocol::{encode_frame, StreamProtocol};
/// use nanoleaf_gateway::types::RgbColor;
///
/// let frame = encode_frame(StreamProtocol::V1, &[(7, RgbColor::new(255, 0, 0))]).unwrap();
/// assert_eq!(frame, vec![1, 7, 1, 255, 0, 0, 0, 1]);
/// ```
pub fn encode_frame(
    protocol: StreamProtocol,
    entries: &[(u16, RgbColor)],
) -> Result<Vec<u8>, ValueError> {
    validate(protocol, entries)?;

    let mut frame = Vec::with_capacity(protocol.frame_len(entries.len()));
    match protocol {
        StreamProtocol::V1 => {
            // validate() bounds the count and every id to one byte
            frame.push(u8::try_from(entries.len()).unwrap_or(u8::MAX));
            for (id, color) in entries {
                frame.push(u8::try_from(*id).unwrap_or(u8::MAX));
                frame.push(1);
                frame.extend_from_slice(&[color.red(), color.green(), color.blue(), 0]);
                frame.push(TRANSITION_DECISECONDS);
            }
        }
        StreamProtocol::V2 => {
            let count = u16::try_from(entries.len()).unwrap_or(u16::MAX);
            frame.extend_from_slice(&count.to_be_bytes());
            for (id, color) in entries {
                frame.extend_from_slice(&id.to_be_bytes());
                frame.extend_from_slice(&[color.red(), color.green(), color.blue(), 0]);
                frame.extend_from_slice(&u16::from(TRANSITION_DECISECONDS).to_be_bytes());
            }
        }
    }
    Ok(frame)
}

/// Reads the panel count from a frame header.
///
/// Returns `None` if the frame is shorter than the header.
#[must_use]
pub fn frame_panel_count(protocol: StreamProtocol, frame: &[u8]) -> Option<usize> {
    match protocol {
        StreamProtocol::V1 => frame.first().map(|&n| usize::from(n)),
        StreamProtocol::V2 => match frame {
            [hi, lo, ..] => Some(usize::from(u16::from_be_bytes([*hi, *lo]))),
            _ => None,
        },
    }
}

fn validate(protocol: StreamProtocol, entries: &[(u16, RgbColor)]) -> Result<(), ValueError> {
    if entries.len() > protocol.max_panels() {
        return Err(ValueError::TooManyPanels {
            count: entries.len(),
            max: protocol.max_panels(),
        });
    }
    if let Some((id, _)) = entries.iter().find(|(id, _)| *id > protocol.max_panel_id()) {
        return Err(ValueError::PanelIdOutOfRange {
            id: *id,
            max: protocol.max_panel_id(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(n: u16) -> Vec<(u16, RgbColor)> {
        (0..n).map(|i| (i, RgbColor::new(10, 20, 30))).collect()
    }

    #[test]
    fn v1_frame_length() {
        for n in [0u16, 1, 5, 64] {
            let frame = encode_frame(StreamProtocol::V1, &panels(n)).unwrap();
            assert_eq!(frame.len(), 1 + 7 * usize::from(n));
            assert_eq!(
                frame_panel_count(StreamProtocol::V1, &frame),
                Some(usize::from(n))
            );
        }
    }

    #[test]
    fn v2_frame_length() {
        for n in [0u16, 1, 5, 300] {
            let frame = encode_frame(StreamProtocol::V2, &panels(n)).unwrap();
            assert_eq!(frame.len(), 2 + 8 * usize::from(n));
            assert_eq!(
                frame_panel_count(StreamProtocol::V2, &frame),
                Some(usize::from(n))
            );
        }
    }

    #[test]
    fn v2_layout() {
        let frame = encode_frame(StreamProtocol::V2, &[(0x1234, RgbColor::new(1, 2, 3))]).unwrap();
        assert_eq!(frame, vec![0, 1, 0x12, 0x34, 1, 2, 3, 0, 0, 1]);
    }

    #[test]
    fn v1_layout_keeps_order() {
        let frame = encode_frame(
            StreamProtocol::V1,
            &[(9, RgbColor::new(1, 2, 3)), (4, RgbColor::new(4, 5, 6))],
        )
        .unwrap();
        assert_eq!(frame, vec![2, 9, 1, 1, 2, 3, 0, 1, 4, 1, 4, 5, 6, 0, 1]);
    }

    #[test]
    fn v1_rejects_wide_panel_id() {
        let err = encode_frame(StreamProtocol::V1, &[(256, RgbColor::black())]).unwrap_err();
        assert_eq!(err, ValueError::PanelIdOutOfRange { id: 256, max: 255 });
    }

    #[test]
    fn v1_rejects_too_many_panels() {
        let err = encode_frame(StreamProtocol::V1, &panels(256)).unwrap_err();
        assert!(matches!(err, ValueError::TooManyPanels { count: 256, max: 255 }));
    }

    #[test]
    fn panel_count_of_short_frame() {
        assert_eq!(frame_panel_count(StreamProtocol::V2, &[1]), None);
        assert_eq!(frame_panel_count(StreamProtocol::V1, &[]), None);
    }

    #[test]
    fn model_selection_ignores_case_and_whitespace() {
        assert_eq!(StreamProtocol::for_model(" nl22 "), StreamProtocol::V1);
        assert_eq!(StreamProtocol::for_model(""), StreamProtocol::V2);
    }
}
