// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel outlines in a surface's local frame
//!
//! A [`Profile2D`] is a polygon with holes in a surface's local XY frame.
//! Walls use a centered rectangle, floors use their reported boundary corners,
//! and openings are [`LocalRect`]s subtracted from either.

use crate::bool2d::compute_signed_area;
use crate::error::{Error, GeometryError, Result};
use nalgebra::Point2;

/// Minimum enclosed area for a usable outline
const MIN_POLYGON_AREA: f64 = 1e-10;

/// Polygon with holes; contours are closed implicitly, without a repeated
/// first vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Counter-clockwise
    pub outer: Vec<Point2<f64>>,
    /// Clockwise
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Profile2D {
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// Enclosed area: outer area minus hole areas
    pub fn area(&self) -> f64 {
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| compute_signed_area(h).abs())
            .sum();
        compute_signed_area(&self.outer).abs() - holes
    }

    /// Triangulate with earcutr. Indices refer to `points`, which lists the
    /// outer boundary followed by each hole.
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "outline has {} vertices, at least 3 are required",
                self.outer.len()
            )));
        }

        let points: Vec<Point2<f64>> = self
            .outer
            .iter()
            .chain(self.holes.iter().flatten())
            .copied()
            .collect();
        let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();

        let hole_starts: Vec<usize> = self
            .holes
            .iter()
            .scan(self.outer.len(), |start, hole| {
                let this = *start;
                *start += hole.len();
                Some(this)
            })
            .collect();

        let indices = earcutr::earcut(&flat, &hole_starts, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        Ok(Triangulation { points, indices })
    }
}

/// Cap triangles of a profile
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub points: Vec<Point2<f64>>,
    /// Three indices into `points` per triangle
    pub indices: Vec<usize>,
}

/// Axis-aligned rectangle in a surface's local 2D frame.
///
/// `(x, y)` is the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LocalRect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `(cx, cy)`
    #[inline]
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    #[inline]
    pub fn min(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Point2<f64> {
        Point2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners as a counter-clockwise contour
    pub fn to_contour(&self) -> Vec<Point2<f64>> {
        let min = self.min();
        let max = self.max();
        vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ]
    }
}

/// Outline of a panel before openings are cut
#[derive(Debug, Clone)]
pub enum ProfileType {
    /// Centered rectangle, used for walls
    Rectangle { width: f64, height: f64 },
    /// Arbitrary closed polygon, used for floor footprints
    Polygon { points: Vec<Point2<f64>> },
}

impl ProfileType {
    /// Outline as a profile without holes
    pub fn to_profile(&self) -> Profile2D {
        match self {
            Self::Rectangle { width, height } => create_rectangle(*width, *height),
            Self::Polygon { points } => Profile2D::new(points.clone()),
        }
    }
}

/// Rectangle spanning `[-w/2, w/2] x [-h/2, h/2]`, counter-clockwise from
/// the lower-left corner
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    Profile2D::new(LocalRect::centered(0.0, 0.0, width, height).to_contour())
}

/// Build a floor outline from reported boundary corners.
///
/// Capture reports corners in the opposite order to the one the outline is
/// built in, so they are reversed here.
pub fn create_polygon_from_corners(corners: &[Point2<f64>]) -> ProfileType {
    ProfileType::Polygon {
        points: corners.iter().rev().copied().collect(),
    }
}

/// Check that a closed polygon is a usable outline.
///
/// Edges sharing a vertex are not tested against each other.
pub fn validate_polygon(points: &[Point2<f64>]) -> std::result::Result<(), GeometryError> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::TooFewVertices(n));
    }
    if let Some(i) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::NonFinite(i));
    }
    if compute_signed_area(points).abs() <= MIN_POLYGON_AREA {
        return Err(GeometryError::ZeroArea);
    }

    for i in 0..n {
        let (a0, a1) = (points[i], points[(i + 1) % n]);
        for j in (i + 2)..n {
            // first and last edge share vertex 0
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b0, b1) = (points[j], points[(j + 1) % n]);
            if segments_intersect(&a0, &a1, &b0, &b1) {
                return Err(GeometryError::SelfIntersection(i, j));
            }
        }
    }

    Ok(())
}

#[inline]
fn orient(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

#[inline]
fn on_segment(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Closed-segment intersection test, touching endpoints included
fn segments_intersect(a0: &Point2<f64>, a1: &Point2<f64>, b0: &Point2<f64>, b1: &Point2<f64>) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b0, b1, a0))
        || (d2 == 0.0 && on_segment(b0, b1, a1))
        || (d3 == 0.0 && on_segment(a0, a1, b0))
        || (d4 == 0.0 && on_segment(a0, a1, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 4.0),
            Point2::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_centered_rectangle() {
        let wall = create_rectangle(4.0, 2.5);
        assert!(wall.holes.is_empty());
        assert_eq!(
            wall.outer,
            vec![
                Point2::new(-2.0, -1.25),
                Point2::new(2.0, -1.25),
                Point2::new(2.0, 1.25),
                Point2::new(-2.0, 1.25),
            ]
        );
        assert!((wall.area() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangulate_concave_outline() {
        let tri = Profile2D::new(l_shape()).triangulate().unwrap();
        assert_eq!(tri.points.len(), 6);
        // n - 2 triangles for a simple polygon
        assert_eq!(tri.indices.len(), 4 * 3);
    }

    #[test]
    fn test_triangulate_with_hole() {
        let mut profile = create_rectangle(10.0, 10.0);
        let mut hole = LocalRect::centered(0.0, 0.0, 2.0, 2.0).to_contour();
        hole.reverse();
        profile.add_hole(hole);

        let tri = profile.triangulate().unwrap();
        assert_eq!(tri.points.len(), 8);
        // 8 vertices, 1 hole: n + 2h - 2 triangles
        assert_eq!(tri.indices.len(), 8 * 3);
        assert!((profile.area() - 96.0).abs() < 1e-12);
    }

    #[test]
    fn test_triangulate_too_few_points() {
        let profile = Profile2D::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(profile.triangulate().is_err());
    }

    #[test]
    fn test_local_rect_geometry() {
        let rect = LocalRect::centered(1.0, -0.5, 2.0, 1.0);
        assert_eq!(rect.min(), Point2::new(0.0, -1.0));
        assert_eq!(rect.max(), Point2::new(2.0, 0.0));
        assert_eq!(rect.center(), Point2::new(1.0, -0.5));
        assert!(compute_signed_area(&rect.to_contour()) > 0.0);
        assert!((rect.area() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_corners_are_reversed() {
        let corners = l_shape();
        let ProfileType::Polygon { points } = create_polygon_from_corners(&corners) else {
            panic!("expected a polygon outline");
        };
        assert_eq!(points.first(), corners.last());
        assert_eq!(points.last(), corners.first());
    }

    #[test]
    fn test_validate_accepts_concave() {
        assert_eq!(validate_polygon(&l_shape()), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bow_tie() {
        // Lopsided so the lobes do not cancel out to zero area
        let bow_tie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(matches!(
            validate_polygon(&bow_tie),
            Err(GeometryError::SelfIntersection(_, _))
        ));
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let line = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(validate_polygon(&line), Err(GeometryError::ZeroArea));
        assert_eq!(
            validate_polygon(&line[..2]),
            Err(GeometryError::TooFewVertices(2))
        );
        let nan = vec![
            Point2::new(0.0, 0.0),
            Point2::new(f64::NAN, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(validate_polygon(&nan), Err(GeometryError::NonFinite(1)));
    }
}
