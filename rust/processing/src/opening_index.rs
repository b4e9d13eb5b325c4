// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening Index
//!
//! Maps each wall to the openings (windows, generic openings, doors) that
//! reference it through `parent_identifier`. Built once per render pass so
//! walls look up their openings instead of rescanning every collection.
//!
//! Openings are referenced, never owned: the index borrows from the snapshot.
//! An opening whose parent is not a known wall is counted as an orphan and
//! left out.

use roomscan_core::{CapturedRoom, Surface};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Openings per wall; most walls carry a handful at most
type OpeningList<'a> = SmallVec<[&'a Surface; 4]>;

/// Index mapping wall identifiers to their openings
#[derive(Debug, Clone, Default)]
pub struct OpeningIndex<'a> {
    wall_to_openings: FxHashMap<&'a str, OpeningList<'a>>,
    relationship_count: usize,
    orphan_count: usize,
}

impl<'a> OpeningIndex<'a> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a snapshot
    pub fn from_room(room: &'a CapturedRoom) -> Self {
        let mut index = Self::new();
        for wall in &room.walls {
            index.wall_to_openings.entry(wall.identifier.as_str()).or_default();
        }

        for opening in room.opening_surfaces() {
            let Some(parent) = opening.parent_identifier.as_deref() else {
                index.orphan_count += 1;
                tracing::debug!(opening = %opening.identifier, "Opening has no parent wall");
                continue;
            };
            match index.wall_to_openings.get_mut(parent) {
                Some(openings) => {
                    openings.push(opening);
                    index.relationship_count += 1;
                }
                None => {
                    index.orphan_count += 1;
                    tracing::debug!(
                        opening = %opening.identifier,
                        parent = parent,
                        "Opening references an unknown wall"
                    );
                }
            }
        }

        index
    }

    /// Add an opening to a wall
    pub fn add_relationship(&mut self, wall_id: &'a str, opening: &'a Surface) {
        self.wall_to_openings.entry(wall_id).or_default().push(opening);
        self.relationship_count += 1;
    }

    /// Openings of a wall, in snapshot order; empty for unknown walls
    pub fn openings(&self, wall_id: &str) -> &[&'a Surface] {
        self.wall_to_openings
            .get(wall_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Check if a wall has any openings
    pub fn has_openings(&self, wall_id: &str) -> bool {
        !self.openings(wall_id).is_empty()
    }

    /// Total number of wall-opening relationships
    pub fn relationship_count(&self) -> usize {
        self.relationship_count
    }

    /// Openings left out because their parent wall is missing
    pub fn orphan_count(&self) -> usize {
        self.orphan_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomscan_core::SurfaceKind;
    use roomscan_geometry::Matrix4;

    fn surface(kind: SurfaceKind, id: &str) -> Surface {
        Surface::new(kind, id, 1.0, 1.0, Matrix4::identity())
    }

    fn room() -> CapturedRoom {
        CapturedRoom {
            walls: vec![surface(SurfaceKind::Wall, "W1"), surface(SurfaceKind::Wall, "W2")],
            windows: vec![surface(SurfaceKind::Window, "win").with_parent("W1")],
            doors: vec![
                surface(SurfaceKind::Door, "door").with_parent("W1"),
                surface(SurfaceKind::Door, "lost").with_parent("W9"),
            ],
            openings: vec![
                surface(SurfaceKind::Opening, "arch").with_parent("W2"),
                surface(SurfaceKind::Opening, "loose"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_groups_openings_by_wall() {
        let room = room();
        let index = OpeningIndex::from_room(&room);

        let ids: Vec<_> = index.openings("W1").iter().map(|o| o.identifier.as_str()).collect();
        assert_eq!(ids, vec!["win", "door"]);
        assert_eq!(index.openings("W2").len(), 1);
        assert_eq!(index.relationship_count(), 3);
    }

    #[test]
    fn test_orphans_are_excluded() {
        let room = room();
        let index = OpeningIndex::from_room(&room);

        assert_eq!(index.orphan_count(), 2);
        assert!(index.openings("W9").is_empty());
        assert!(!index.has_openings("W9"));
    }

    #[test]
    fn test_add_relationship() {
        let door = surface(SurfaceKind::Door, "d");
        let mut index = OpeningIndex::new();
        index.add_relationship("W", &door);
        assert!(index.has_openings("W"));
        assert_eq!(index.relationship_count(), 1);
    }
}
