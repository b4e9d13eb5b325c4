// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Opening Subtraction
//!
//! Openings are subtracted from a panel outline in 2D using the i_overlay
//! crate, before the panel is extruded. The result of a subtraction is a
//! *region*: a list of profiles, because a full-height opening splits a wall
//! into two disconnected pieces and a covering opening leaves nothing.
//!
//! All overlays use the non-zero fill rule with outer boundaries wound
//! counter-clockwise and holes clockwise. Overlapping clip contours therefore
//! remove the area of their union exactly once.

use crate::error::{Error, Result};
use crate::profile::Profile2D;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Minimum area threshold - contours smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Perform 2D boolean difference: region - void_contour
///
/// Contours that do not reach the region's bounds leave it untouched, point
/// for point.
///
/// # Arguments
/// * `region` - Profiles to subtract from (an empty region stays empty)
/// * `void_contour` - The opening footprint to subtract
///
/// # Returns
/// * `Ok(Vec<Profile2D>)` - The remaining region, possibly empty
/// * `Err` - If the contour has fewer than 3 vertices
pub fn subtract_2d(region: &[Profile2D], void_contour: &[Point2<f64>]) -> Result<Vec<Profile2D>> {
    if void_contour.len() < 3 {
        return Err(Error::InvalidProfile(format!(
            "opening contour has {} vertices, at least 3 are required",
            void_contour.len()
        )));
    }

    if region.is_empty() {
        return Ok(Vec::new());
    }

    let (Some((void_min, void_max)), Some((region_min, region_max))) =
        (contour_bounds(void_contour), region_bounds(region))
    else {
        return Ok(region.to_vec());
    };
    if !bounds_overlap(&void_min, &void_max, &region_min, &region_max) {
        return Ok(region.to_vec());
    }

    let subject = region_to_paths(region);
    let clip = vec![contour_to_path(&ensure_ccw(void_contour))];

    let result = subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero);

    Ok(shapes_to_region(&result))
}

/// Perform 2D boolean difference with multiple voids at once
///
/// Equivalent to folding [`subtract_2d`] over the contours, in a single
/// overlay pass.
pub fn subtract_multiple_2d(
    profile: &Profile2D,
    void_contours: &[Vec<Point2<f64>>],
) -> Result<Vec<Profile2D>> {
    let clip: Vec<Vec<[f64; 2]>> = void_contours
        .iter()
        .filter(|c| c.len() >= 3)
        .map(|c| contour_to_path(&ensure_ccw(c)))
        .collect();

    if clip.is_empty() {
        return Ok(vec![profile.clone()]);
    }

    let subject = region_to_paths(std::slice::from_ref(profile));
    let result = subject.overlay(&clip, OverlayRule::Difference, FillRule::NonZero);

    Ok(shapes_to_region(&result))
}

/// Total enclosed area of a region
pub fn region_area(region: &[Profile2D]) -> f64 {
    region.iter().map(Profile2D::area).sum()
}

/// A contour with at least three vertices enclosing a non-negligible area
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    contour.len() >= 3 && compute_signed_area(contour).abs() > MIN_AREA_THRESHOLD
}

/// Shoelace area of a closed contour, positive when counter-clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }
    let next = contour.iter().cycle().skip(1);
    contour
        .iter()
        .zip(next)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        / 2.0
}

/// `contour` wound counter-clockwise, as outer boundaries are
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    with_winding(contour, true)
}

/// `contour` wound clockwise, as holes are
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    with_winding(contour, false)
}

fn with_winding(contour: &[Point2<f64>], ccw: bool) -> Vec<Point2<f64>> {
    let area = compute_signed_area(contour);
    let flip = if ccw { area < 0.0 } else { area > 0.0 };
    if flip {
        contour.iter().rev().copied().collect()
    } else {
        contour.to_vec()
    }
}

/// Axis-aligned bounds `(min, max)` of a contour, `None` when it is empty
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let (first, rest) = contour.split_first()?;
    Some(
        rest.iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p))),
    )
}

/// Whether two closed boxes intersect; touching edges count
pub fn bounds_overlap(
    a_min: &Point2<f64>,
    a_max: &Point2<f64>,
    b_min: &Point2<f64>,
    b_max: &Point2<f64>,
) -> bool {
    a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
}

fn region_bounds(region: &[Profile2D]) -> Option<(Point2<f64>, Point2<f64>)> {
    region
        .iter()
        .filter_map(|profile| contour_bounds(&profile.outer))
        .reduce(|(a_min, a_max), (b_min, b_max)| (a_min.inf(&b_min), a_max.sup(&b_max)))
}

/// Flatten a region into i_overlay paths, outers CCW and holes CW
fn region_to_paths(region: &[Profile2D]) -> Vec<Vec<[f64; 2]>> {
    let mut paths = Vec::with_capacity(region.iter().map(|p| 1 + p.holes.len()).sum());

    for profile in region {
        paths.push(contour_to_path(&ensure_ccw(&profile.outer)));
        for hole in &profile.holes {
            paths.push(contour_to_path(&ensure_cw(hole)));
        }
    }

    paths
}

fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

fn path_to_contour(path: &[[f64; 2]]) -> Vec<Point2<f64>> {
    path.iter().map(|p| Point2::new(p[0], p[1])).collect()
}

/// Rebuild a region from overlay output. Each shape lists its outer
/// boundary first and its holes after; slivers left by the overlay are
/// dropped.
fn shapes_to_region(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Profile2D> {
    let mut region = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let Some((outer, holes)) = shape.split_first() else {
            continue;
        };

        let outer = path_to_contour(outer);
        if !is_valid_contour(&outer) {
            continue;
        }

        let mut profile = Profile2D::new(ensure_ccw(&outer));
        for hole in holes {
            let hole = path_to_contour(hole);
            if is_valid_contour(&hole) {
                profile.add_hole(ensure_cw(&hole));
            }
        }
        region.push(profile);
    }

    region
}
