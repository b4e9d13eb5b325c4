// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render pass: routes every element of a snapshot to the geometry builder
//! for its kind and collects the positioned meshes into a [`Scene`].
//!
//! | Element | Full mode | Cut mode |
//! |---------|-----------|----------|
//! | floor   | box       | extruded boundary polygon |
//! | wall    | box       | extruded panel, child openings subtracted |
//! | door, window, object | box | box |
//!
//! Generic openings only ever act as holes in their wall.

use crate::opening_index::OpeningIndex;
use crate::options::{FloorMode, RenderOptions, WallMode};
use crate::scene::{NodeKind, Scene, SceneNode};
use roomscan_core::{CapturedObject, CapturedRoom, Surface};
use roomscan_geometry::{
    build_box, build_panel, create_polygon_from_corners, resolve_opening_rect, validate_polygon,
    LocalRect, Matrix4, Point2, ProfileType, Rgba, Vector3,
};

/// Render a snapshot with the given options.
///
/// Never fails: elements whose geometry cannot be built are logged and left
/// out of the scene.
pub fn render_room(room: &CapturedRoom, options: &RenderOptions) -> Scene {
    RoomRenderer::new(room, options).render()
}

/// One render pass over a snapshot
pub struct RoomRenderer<'a> {
    room: &'a CapturedRoom,
    options: &'a RenderOptions,
    openings: OpeningIndex<'a>,
}

impl<'a> RoomRenderer<'a> {
    pub fn new(room: &'a CapturedRoom, options: &'a RenderOptions) -> Self {
        Self {
            room,
            options,
            openings: OpeningIndex::from_room(room),
        }
    }

    /// Openings grouped by wall for this pass
    pub fn opening_index(&self) -> &OpeningIndex<'a> {
        &self.openings
    }

    pub fn render(&self) -> Scene {
        let mut scene = Scene::new();

        for floor in &self.room.floors {
            self.render_floor(floor, &mut scene);
        }
        for wall in &self.room.walls {
            self.render_wall(wall, &mut scene);
        }

        let palette = &self.options.palette;
        let thickness = &self.options.thickness;
        for door in &self.room.doors {
            scene.push(surface_box(door, NodeKind::Door, thickness.door, palette.door));
        }
        for window in &self.room.windows {
            scene.push(surface_box(window, NodeKind::Window, thickness.window, palette.window));
        }
        for object in &self.room.objects {
            scene.push(object_box(object, palette.object));
        }

        tracing::info!(
            meshes = scene.len(),
            triangles = scene.triangle_count(),
            walls = self.room.walls.len(),
            cut_openings = self.openings.relationship_count(),
            orphan_openings = self.openings.orphan_count(),
            "Rendered room"
        );

        scene
    }

    fn render_floor(&self, floor: &Surface, scene: &mut Scene) {
        let thickness = self.options.thickness.floor;
        let color = self.options.palette.floor;

        match self.options.floor_mode {
            FloorMode::Full => {
                scene.push(surface_box(floor, NodeKind::Floor, thickness, color));
            }
            FloorMode::Cut => {
                let corners: Vec<Point2<f64>> = floor
                    .polygon_corners
                    .iter()
                    .map(|c| Point2::new(c.x, c.y))
                    .collect();
                if corners.len() < 3 {
                    tracing::warn!(
                        id = %floor.identifier,
                        corners = corners.len(),
                        "Floor has too few corners for a cut outline, skipping"
                    );
                    return;
                }

                let outline = create_polygon_from_corners(&corners);
                if self.options.strict_geometry {
                    if let ProfileType::Polygon { points } = &outline {
                        if let Err(e) = validate_polygon(points) {
                            tracing::warn!(id = %floor.identifier, error = %e, "Invalid floor outline, skipping");
                            return;
                        }
                    }
                }

                match build_panel(&outline, &[], thickness, color) {
                    Ok(mesh) => {
                        scene.push(SceneNode::new(&floor.identifier, NodeKind::Floor, mesh, floor.transform));
                    }
                    Err(e) => {
                        tracing::warn!(id = %floor.identifier, error = %e, "Failed to build floor");
                    }
                }

                if self.options.corner_markers {
                    self.render_corner_markers(floor, &corners, scene);
                }
            }
        }
    }

    fn render_corner_markers(&self, floor: &Surface, corners: &[Point2<f64>], scene: &mut Scene) {
        let size = self.options.marker_radius * 2.0;
        for (i, corner) in corners.iter().enumerate() {
            let color = corner_marker_color(corners, corner);
            let placement = floor.transform * Matrix4::new_translation(&Vector3::new(corner.x, corner.y, 0.0));
            scene.push(SceneNode::new(
                format!("{}#corner{}", floor.identifier, i),
                NodeKind::CornerMarker,
                build_box(size, size, size, color),
                placement,
            ));
        }
    }

    fn render_wall(&self, wall: &Surface, scene: &mut Scene) {
        let thickness = self.options.thickness.wall;
        let palette = &self.options.palette;

        match self.options.wall_mode {
            WallMode::Full => {
                scene.push(surface_box(wall, NodeKind::Wall, thickness, palette.wall));
            }
            WallMode::Cut => {
                let holes = self.wall_holes(wall);
                let outline = ProfileType::Rectangle {
                    width: wall.width(),
                    height: wall.height(),
                };

                tracing::debug!(id = %wall.identifier, holes = holes.len(), "Cutting wall");

                match build_panel(&outline, &holes, thickness, palette.cut_wall) {
                    Ok(mesh) => {
                        scene.push(SceneNode::new(&wall.identifier, NodeKind::Wall, mesh, wall.transform));
                    }
                    Err(e) => {
                        tracing::warn!(id = %wall.identifier, error = %e, "Failed to build wall");
                    }
                }
            }
        }
    }

    /// Rectangles of every opening in `wall`, in the wall's local frame
    pub fn wall_holes(&self, wall: &Surface) -> Vec<LocalRect> {
        self.openings
            .openings(&wall.identifier)
            .iter()
            .map(|opening| resolve_opening_rect(wall, opening, self.options.frame_resolution))
            .collect()
    }
}

fn surface_box(surface: &Surface, kind: NodeKind, depth: f64, color: Rgba) -> SceneNode {
    SceneNode::new(
        &surface.identifier,
        kind,
        build_box(surface.width(), surface.height(), depth, color),
        surface.transform,
    )
}

fn object_box(object: &CapturedObject, color: Rgba) -> SceneNode {
    let d = &object.dimensions;
    SceneNode::new(
        &object.identifier,
        NodeKind::Object,
        build_box(d.x, d.y, d.z, color),
        object.transform,
    )
}

/// Marker color: green at the largest x, blue at the smallest x, yellow at
/// the largest y, cyan at the smallest y, red otherwise
fn corner_marker_color(corners: &[Point2<f64>], corner: &Point2<f64>) -> Rgba {
    let (mut min, mut max) = (*corner, *corner);
    for c in corners {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }

    if corner.x == max.x {
        [0.0, 1.0, 0.0, 1.0]
    } else if corner.x == min.x {
        [0.0, 0.0, 1.0, 1.0]
    } else if corner.y == max.y {
        [1.0, 1.0, 0.0, 1.0]
    } else if corner.y == min.y {
        [0.0, 1.0, 1.0, 1.0]
    } else {
        [1.0, 0.0, 0.0, 1.0]
    }
}
