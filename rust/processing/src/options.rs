// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render options: how each surface kind is turned into geometry.

use roomscan_geometry::{FrameResolution, Rgba};
use serde::{Deserialize, Serialize};

/// How floors are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorMode {
    /// Box of the floor's width and height
    #[default]
    Full,
    /// Extruded polygon from the floor's boundary corners
    Cut,
}

/// How walls are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMode {
    /// Box of the wall's width and height, openings ignored
    Full,
    /// Extruded panel with every child opening cut out
    #[default]
    Cut,
}

/// Extrusion depth per surface kind, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thickness {
    pub floor: f64,
    pub wall: f64,
    pub door: f64,
    pub window: f64,
}

impl Default for Thickness {
    fn default() -> Self {
        Self {
            floor: 0.1,
            wall: 0.1,
            door: 0.05,
            window: 0.05,
        }
    }
}

/// Uniform color per surface kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub floor: Rgba,
    pub wall: Rgba,
    pub cut_wall: Rgba,
    pub door: Rgba,
    pub window: Rgba,
    pub object: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            floor: [0.5, 0.5, 0.5, 1.0],
            wall: [0.5, 0.5, 0.5, 1.0],
            cut_wall: [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0],
            door: [0.6, 0.4, 0.2, 1.0],
            window: [0.0, 0.0, 1.0, 0.3],
            object: [2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0],
        }
    }
}

/// Options for one render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub floor_mode: FloorMode,
    pub wall_mode: WallMode,
    /// How openings are placed in their wall's frame
    pub frame_resolution: FrameResolution,
    pub thickness: Thickness,
    pub palette: Palette,
    /// Mark each floor corner in cut floor mode
    pub corner_markers: bool,
    /// Half edge length of a corner marker
    pub marker_radius: f64,
    /// Skip floors whose outline self-intersects or encloses no area
    /// instead of rendering them best effort
    pub strict_geometry: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            floor_mode: FloorMode::default(),
            wall_mode: WallMode::default(),
            frame_resolution: FrameResolution::default(),
            thickness: Thickness::default(),
            palette: Palette::default(),
            corner_markers: false,
            marker_radius: 0.3,
            strict_geometry: false,
        }
    }
}

impl RenderOptions {
    /// Parse options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
