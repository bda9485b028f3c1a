// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical panel arrangement.

use crate::response::{LayoutResponse, PositionResponse};

/// Shape-type code of the non-emitting controller unit.
pub const CONTROLLER_SHAPE_TYPE: u16 = 12;

/// Position and shape of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelPosition {
    /// Vendor-assigned id, stable for the lifetime of the device.
    pub panel_id: u16,
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// Rotation in degrees.
    pub orientation: i32,
    /// Shape-type code.
    pub shape_type: u16,
}

impl PanelPosition {
    /// Returns `true` for controller units, which emit no light.
    #[must_use]
    pub fn is_controller(&self) -> bool {
        self.shape_type == CONTROLLER_SHAPE_TYPE
    }
}

impl From<&PositionResponse> for PanelPosition {
    fn from(position: &PositionResponse) -> Self {
        Self {
            panel_id: position.panel_id,
            x: position.x,
            y: position.y,
            orientation: position.o,
            shape_type: position.shape_type,
        }
    }
}

/// Axis-aligned bounds of the panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    /// Smallest x.
    pub min_x: i32,
    /// Largest x.
    pub max_x: i32,
    /// Smallest y.
    pub min_y: i32,
    /// Largest y.
    pub max_y: i32,
    /// `max_x - min_x`, saturating at `i32::MAX`.
    pub width: i32,
    /// `max_y - min_y`, saturating at `i32::MAX`.
    pub height: i32,
}

impl BoundingBox {
    /// Computes the bounds of a set of positions; all zero when empty.
    #[must_use]
    pub fn of(positions: &[PanelPosition]) -> Self {
        let Some(first) = positions.first() else {
            return Self::default();
        };

        let (min_x, max_x, min_y, max_y) = positions.iter().fold(
            (first.x, first.x, first.y, first.y),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );

        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            width: max_x.saturating_sub(min_x),
            height: max_y.saturating_sub(min_y),
        }
    }
}

/// Panels in device order plus their bounding box.
///
/// # Examples
///
/// ```
/// use nanoleaf_gateway::layout::{PanelLayout, PanelPosition};
///
/// let layout = PanelLayout::new(vec![
///     PanelPosition { panel_id: 1, x: 0, y: 0, orientation: 0, shape_type: 7 },
///     PanelPosition { panel_id: 2, x: 100, y: 50, orientation: 0, shape_type: 7 },
///     PanelPosition { panel_id: 3, x: 50, y: 0, orientation: 0, shape_type: 12 },
/// ]);
///
/// assert_eq!(layout.bounds().width, 100);
/// assert_eq!(layout.panel_ids(), vec![1, 2, 3]);
/// assert_eq!(layout.light_panel_ids(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelLayout {
    panels: Vec<PanelPosition>,
    bounds: BoundingBox,
}

impl PanelLayout {
    /// Creates a layout and computes its bounds.
    #[must_use]
    pub fn new(panels: Vec<PanelPosition>) -> Self {
        let bounds = BoundingBox::of(&panels);
        Self { panels, bounds }
    }

    /// Returns the panels in device order.
    #[must_use]
    pub fn panels(&self) -> &[PanelPosition] {
        &self.panels
    }

    /// Returns the bounding box.
    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Returns the number of panels, controllers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if the layout has no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Returns every panel id, controllers included.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<u16> {
        self.panels.iter().map(|p| p.panel_id).collect()
    }

    /// Returns the ids of the light-emitting panels.
    #[must_use]
    pub fn light_panel_ids(&self) -> Vec<u16> {
        self.panels
            .iter()
            .filter(|p| !p.is_controller())
            .map(|p| p.panel_id)
            .collect()
    }
}

impl From<&LayoutResponse> for PanelLayout {
    fn from(layout: &LayoutResponse) -> Self {
        Self::new(layout.position_data.iter().map(PanelPosition::from).collect())
    }
}
