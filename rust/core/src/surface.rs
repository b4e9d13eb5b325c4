// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar surfaces and furniture objects of a captured room.

use crate::encoding;
use crate::error::{Error, Result};
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Role of a surface within the room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Floor,
    #[default]
    Wall,
    Door,
    Window,
    Opening,
}

impl SurfaceKind {
    /// Doors, windows and generic openings are cut out of their parent wall
    #[inline]
    pub fn is_opening(self) -> bool {
        matches!(self, Self::Door | Self::Window | Self::Opening)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
            Self::Opening => "opening",
        }
    }
}

/// A planar rectangular panel.
///
/// The panel spans `[-w/2, w/2] x [-h/2, h/2]` in its own XY plane, and
/// `transform` places that plane into world space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    /// Unique key within the snapshot
    pub identifier: String,
    /// Wall this surface is embedded in (openings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_identifier: Option<String>,
    /// Width (x), height (y) and, when reported, thickness (z)
    #[serde(with = "encoding::vector3")]
    pub dimensions: Vector3<f64>,
    /// Local-to-world transform
    #[serde(with = "encoding::matrix4")]
    pub transform: Matrix4<f64>,
    /// Boundary corners in the surface's local frame (floors)
    #[serde(default, with = "encoding::points", skip_serializing_if = "Vec::is_empty")]
    pub polygon_corners: Vec<Point3<f64>>,
    /// Assigned from the snapshot collection the surface was listed in
    #[serde(skip)]
    pub kind: SurfaceKind,
}

impl Surface {
    /// Create a surface with the given size and transform
    pub fn new(
        kind: SurfaceKind,
        identifier: impl Into<String>,
        width: f64,
        height: f64,
        transform: Matrix4<f64>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            parent_identifier: None,
            dimensions: Vector3::new(width, height, 0.0),
            transform,
            polygon_corners: Vec::new(),
            kind,
        }
    }

    /// Set the parent wall identifier
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_identifier = Some(parent.into());
        self
    }

    /// Set the floor boundary corners
    pub fn with_corners(mut self, corners: Vec<Point3<f64>>) -> Self {
        self.polygon_corners = corners;
        self
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.dimensions.y
    }

    /// World-space origin of the surface (translation column of the transform)
    #[inline]
    pub fn translation(&self) -> Vector3<f64> {
        self.transform.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Check that the surface is usable for geometry
    pub fn validate(&self) -> Result<()> {
        validate_pose(&self.identifier, &self.dimensions, &self.transform)
    }
}

/// A furniture object detected in the room, rendered as a box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedObject {
    pub identifier: String,
    /// Category as exported, e.g. `{"table": {}}` or `"table"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<serde_json::Value>,
    /// Width (x), height (y) and length (z)
    #[serde(with = "encoding::vector3")]
    pub dimensions: Vector3<f64>,
    #[serde(with = "encoding::matrix4")]
    pub transform: Matrix4<f64>,
}

impl CapturedObject {
    pub fn new(identifier: impl Into<String>, dimensions: Vector3<f64>, transform: Matrix4<f64>) -> Self {
        Self {
            identifier: identifier.into(),
            category: None,
            dimensions,
            transform,
        }
    }

    /// Category name, whichever way the exporter spelled it
    pub fn category_name(&self) -> Option<&str> {
        match self.category.as_ref()? {
            serde_json::Value::String(name) => Some(name),
            serde_json::Value::Object(map) => map.keys().next().map(String::as_str),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_pose(&self.identifier, &self.dimensions, &self.transform)
    }
}

fn validate_pose(identifier: &str, dimensions: &Vector3<f64>, transform: &Matrix4<f64>) -> Result<()> {
    if dimensions.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(Error::InvalidDimensions {
            identifier: identifier.to_string(),
            x: dimensions.x,
            y: dimensions.y,
            z: dimensions.z,
        });
    }
    if transform.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidTransform {
            identifier: identifier.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_column() {
        let surface = Surface::new(
            SurfaceKind::Wall,
            "w",
            4.0,
            2.5,
            Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0)),
        );
        assert_eq!(surface.translation(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let surface = Surface::new(SurfaceKind::Wall, "w", -1.0, 2.0, Matrix4::identity());
        assert!(matches!(
            surface.validate(),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_nan_transform_rejected() {
        let mut transform = Matrix4::identity();
        transform[(0, 3)] = f64::NAN;
        let surface = Surface::new(SurfaceKind::Door, "d", 1.0, 2.0, transform);
        assert!(matches!(
            surface.validate(),
            Err(Error::InvalidTransform { .. })
        ));
    }

    #[test]
    fn test_category_name() {
        let mut object = CapturedObject::new("o", Vector3::new(1.0, 1.0, 1.0), Matrix4::identity());
        assert_eq!(object.category_name(), None);

        object.category = Some(serde_json::json!({ "table": {} }));
        assert_eq!(object.category_name(), Some("table"));

        object.category = Some(serde_json::json!("sofa"));
        assert_eq!(object.category_name(), Some("sofa"));
    }

    #[test]
    fn test_opening_kinds() {
        assert!(SurfaceKind::Door.is_opening());
        assert!(SurfaceKind::Window.is_opening());
        assert!(SurfaceKind::Opening.is_opening());
        assert!(!SurfaceKind::Wall.is_opening());
        assert!(!SurfaceKind::Floor.is_opening());
    }
}
