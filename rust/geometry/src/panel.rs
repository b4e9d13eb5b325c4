// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panels with openings cut out
//!
//! A panel is an outline (wall rectangle or floor polygon) minus a set of
//! rectangular openings, extruded to a fixed thickness. Cutting is best
//! effort: malformed outlines and openings never fail the build, they just
//! leave less (or nothing) to render. Only an unusable depth is an error.

use crate::bool2d::{ensure_ccw, ensure_cw, is_valid_contour, subtract_2d};
use crate::error::Result;
use crate::extrusion::extrude_region;
use crate::mesh::{ColoredMesh, Rgba};
use crate::profile::{LocalRect, Profile2D, ProfileType};

/// Subtract every opening from the outline, cumulatively.
///
/// The returned region is empty when the outline encloses no area or the
/// openings cover all of it. Openings with non-positive or non-finite size
/// are ignored.
pub fn cut_openings(outer: &ProfileType, holes: &[LocalRect]) -> Result<Vec<Profile2D>> {
    let mut profile = outer.to_profile();
    if !is_valid_contour(&profile.outer) {
        tracing::debug!(vertices = profile.outer.len(), "Outline encloses no area");
        return Ok(Vec::new());
    }
    // Side walls take their facing from the winding
    profile.outer = ensure_ccw(&profile.outer);
    profile.holes = profile.holes.iter().map(|h| ensure_cw(h)).collect();

    let mut region = vec![profile];
    for hole in holes {
        if !is_usable_rect(hole) {
            tracing::debug!(?hole, "Ignoring degenerate opening");
            continue;
        }
        region = subtract_2d(&region, &hole.to_contour())?;
        if region.is_empty() {
            break;
        }
    }

    Ok(region)
}

/// Build an extruded panel with openings cut out, centered on its plane.
///
/// With no openings the result matches extruding the bare outline; when the
/// openings cover the outline the mesh is empty.
pub fn build_panel(
    outer: &ProfileType,
    holes: &[LocalRect],
    depth: f64,
    color: Rgba,
) -> Result<ColoredMesh> {
    let region = cut_openings(outer, holes)?;
    let mesh = extrude_region(&region, depth, None)?;

    tracing::trace!(
        holes = holes.len(),
        pieces = region.len(),
        triangles = mesh.triangle_count(),
        "Built panel"
    );

    Ok(ColoredMesh::new(mesh, color))
}

#[inline]
fn is_usable_rect(rect: &LocalRect) -> bool {
    [rect.x, rect.y, rect.width, rect.height]
        .iter()
        .all(|v| v.is_finite())
        && rect.width > 0.0
        && rect.height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bool2d::region_area;
    use nalgebra::Vector3;

    const GRAY: Rgba = [0.5, 0.5, 0.5, 1.0];

    fn wall() -> ProfileType {
        ProfileType::Rectangle {
            width: 4.0,
            height: 2.5,
        }
    }

    #[test]
    fn test_no_holes_keeps_outline() {
        let region = cut_openings(&wall(), &[]).unwrap();
        assert_eq!(region.len(), 1);
        assert!((region_area(&region) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_leaves_hole() {
        let window = LocalRect::centered(0.5, 0.3, 1.2, 1.0);
        let panel = build_panel(&wall(), &[window], 0.1, GRAY).unwrap();

        assert_eq!(panel.color, GRAY);
        assert!((panel.mesh.area_facing(&Vector3::z()) - (10.0 - 1.2)).abs() < 1e-4);
    }

    #[test]
    fn test_clockwise_outline_is_normalized() {
        let mut points = crate::create_rectangle(2.0, 2.0).outer;
        points.reverse();
        let region = cut_openings(&ProfileType::Polygon { points }, &[]).unwrap();
        assert!(crate::bool2d::compute_signed_area(&region[0].outer) > 0.0);
    }

    #[test]
    fn test_degenerate_openings_ignored() {
        let holes = [
            LocalRect::new(0.0, 0.0, 0.0, 1.0),
            LocalRect::new(0.0, 0.0, 1.0, -1.0),
            LocalRect::new(f64::NAN, 0.0, 1.0, 1.0),
        ];
        let region = cut_openings(&wall(), &holes).unwrap();
        assert!((region_area(&region) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_outline_is_empty() {
        let flat = ProfileType::Rectangle {
            width: 4.0,
            height: 0.0,
        };
        let panel = build_panel(&flat, &[], 0.1, GRAY).unwrap();
        assert!(panel.is_empty());
    }

    #[test]
    fn test_invalid_depth_is_error() {
        assert!(build_panel(&wall(), &[], 0.0, GRAY).is_err());
    }
}
