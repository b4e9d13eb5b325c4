// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Captured-room snapshot
//!
//! A snapshot is the immutable input of a render pass: surfaces partitioned
//! into floors, walls, windows, doors and generic openings, plus furniture
//! objects. Every surface's [`SurfaceKind`] follows from the collection it was
//! listed in, so the loader stamps kinds right after decoding.

use crate::error::Result;
use crate::surface::{CapturedObject, Surface, SurfaceKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Snapshot of a scanned room
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRoom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default)]
    pub floors: Vec<Surface>,
    #[serde(default)]
    pub walls: Vec<Surface>,
    #[serde(default)]
    pub windows: Vec<Surface>,
    #[serde(default)]
    pub doors: Vec<Surface>,
    #[serde(default)]
    pub openings: Vec<Surface>,
    #[serde(default)]
    pub objects: Vec<CapturedObject>,
}

impl CapturedRoom {
    /// Decode a snapshot from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let room: Self = serde_json::from_str(json)?;
        room.finish()
    }

    /// Decode a snapshot from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let room: Self = serde_json::from_reader(reader)?;
        room.finish()
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serialize back to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn finish(mut self) -> Result<Self> {
        self.assign_kinds();
        self.validate()?;
        Ok(self)
    }

    /// Stamp each surface with the kind of the collection holding it
    pub fn assign_kinds(&mut self) {
        let collections = [
            (&mut self.floors, SurfaceKind::Floor),
            (&mut self.walls, SurfaceKind::Wall),
            (&mut self.windows, SurfaceKind::Window),
            (&mut self.doors, SurfaceKind::Door),
            (&mut self.openings, SurfaceKind::Opening),
        ];
        for (surfaces, kind) in collections {
            for surface in surfaces.iter_mut() {
                surface.kind = kind;
            }
        }
    }

    /// Reject non-finite transforms and negative dimensions
    pub fn validate(&self) -> Result<()> {
        for surface in self.surfaces() {
            surface.validate()?;
        }
        for object in &self.objects {
            object.validate()?;
        }
        Ok(())
    }

    /// All surfaces: floors, walls, windows, doors, openings
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.floors
            .iter()
            .chain(&self.walls)
            .chain(&self.windows)
            .chain(&self.doors)
            .chain(&self.openings)
    }

    /// Every surface that can be cut out of a wall, windows first, then
    /// generic openings, then doors
    pub fn opening_surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.windows
            .iter()
            .chain(&self.openings)
            .chain(&self.doors)
    }

    /// Look up a wall by identifier
    pub fn wall(&self, identifier: &str) -> Option<&Surface> {
        self.walls.iter().find(|w| w.identifier == identifier)
    }

    /// Total number of surfaces and objects
    pub fn element_count(&self) -> usize {
        self.surfaces().count() + self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
