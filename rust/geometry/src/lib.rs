// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-scan Geometry Processing
//!
//! Turns captured-room surfaces into triangle meshes: openings are resolved
//! into their wall's local frame, subtracted in 2D with i_overlay,
//! triangulated with earcutr and extruded with nalgebra.

pub mod bool2d;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod panel;
pub mod primitives;
pub mod profile;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};

pub use error::{Error, GeometryError, Result};
pub use extrusion::{apply_transform, extrude_profile, extrude_region};
pub use mesh::{ColoredMesh, Mesh, Rgba};
pub use panel::{build_panel, cut_openings};
pub use primitives::build_box;
pub use profile::{
    create_polygon_from_corners, create_rectangle, validate_polygon, LocalRect, Profile2D,
    ProfileType,
};
pub use transform::{
    resolve_local_opening_rect, resolve_opening_rect, resolve_projected_opening_rect,
    FrameResolution,
};
