// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame transforms between a wall and the openings embedded in it
//!
//! Openings are reported with their own world transform. Cutting them out of
//! a wall needs their rectangle in the wall's local 2D frame, centered on the
//! wall origin. Two strategies are available:
//!
//! - [`FrameResolution::TranslationDelta`] uses the raw X/Y offset between the
//!   two origins. It assumes wall and opening share one orientation and that
//!   the wall's local X/Y axes line up with world X/Y.
//! - [`FrameResolution::Projected`] maps the opening origin through the
//!   wall's inverse transform, which stays correct for walls rotated about
//!   the vertical axis.

use crate::profile::LocalRect;
use nalgebra::Point3;
use roomscan_core::Surface;

/// How an opening's pose is expressed in its wall's frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameResolution {
    /// Offset between world translations
    TranslationDelta,
    /// Opening origin projected through the wall's inverse transform
    #[default]
    Projected,
}

/// Opening rectangle in the wall's local frame from the raw translation delta
///
/// `x = -w/2 - (wall.tx - opening.tx)`, `y = -h/2 - (wall.ty - opening.ty)`.
/// The caller is responsible for pairing the opening with its parent wall.
#[inline]
pub fn resolve_local_opening_rect(wall: &Surface, opening: &Surface) -> LocalRect {
    let wall_origin = wall.translation();
    let opening_origin = opening.translation();

    LocalRect::new(
        -opening.width() / 2.0 - (wall_origin.x - opening_origin.x),
        -opening.height() / 2.0 - (wall_origin.y - opening_origin.y),
        opening.width(),
        opening.height(),
    )
}

/// Opening rectangle in the wall's local frame, projecting the opening origin
/// through the wall's inverse transform
///
/// Falls back to [`resolve_local_opening_rect`] for a singular wall transform.
pub fn resolve_projected_opening_rect(wall: &Surface, opening: &Surface) -> LocalRect {
    let Some(world_to_wall) = wall.transform.try_inverse() else {
        tracing::debug!(
            wall = %wall.identifier,
            "Singular wall transform, using translation delta"
        );
        return resolve_local_opening_rect(wall, opening);
    };

    let local = world_to_wall.transform_point(&Point3::from(opening.translation()));
    LocalRect::centered(local.x, local.y, opening.width(), opening.height())
}

/// Resolve an opening rectangle with the chosen strategy
#[inline]
pub fn resolve_opening_rect(
    wall: &Surface,
    opening: &Surface,
    resolution: FrameResolution,
) -> LocalRect {
    match resolution {
        FrameResolution::TranslationDelta => resolve_local_opening_rect(wall, opening),
        FrameResolution::Projected => resolve_projected_opening_rect(wall, opening),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix4, Vector3};
    use roomscan_core::SurfaceKind;

    fn wall_at(transform: Matrix4<f64>) -> Surface {
        Surface::new(SurfaceKind::Wall, "wall", 4.0, 2.5, transform)
    }

    fn door_at(transform: Matrix4<f64>) -> Surface {
        Surface::new(SurfaceKind::Door, "door", 0.9, 2.1, transform).with_parent("wall")
    }

    #[test]
    fn test_same_origin_is_centered() {
        let pose = Matrix4::new_translation(&Vector3::new(3.0, 1.2, -7.0));
        let rect = resolve_local_opening_rect(&wall_at(pose), &door_at(pose));

        assert_relative_eq!(rect.center().x, 0.0);
        assert_relative_eq!(rect.center().y, 0.0);
        assert_eq!(rect.width, 0.9);
        assert_eq!(rect.height, 2.1);

        let projected = resolve_projected_opening_rect(&wall_at(pose), &door_at(pose));
        assert_relative_eq!(projected.center().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(projected.center().y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_door_offset_below_center() {
        let wall = wall_at(Matrix4::new_translation(&Vector3::new(0.0, 1.25, 0.0)));
        let door = door_at(Matrix4::new_translation(&Vector3::new(0.0, 1.05, 0.0)));

        let rect = resolve_local_opening_rect(&wall, &door);

        assert_relative_eq!(rect.x, -0.45, epsilon = 1e-12);
        assert_relative_eq!(rect.y, -1.25, epsilon = 1e-12);
        assert_relative_eq!(rect.max().x, 0.45, epsilon = 1e-12);
        assert_relative_eq!(rect.max().y, 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_strategies_agree_for_unrotated_wall() {
        let wall = wall_at(Matrix4::new_translation(&Vector3::new(2.0, 1.25, -3.0)));
        let window = door_at(Matrix4::new_translation(&Vector3::new(2.8, 1.6, -3.0)));

        let delta = resolve_opening_rect(&wall, &window, FrameResolution::TranslationDelta);
        let projected = resolve_opening_rect(&wall, &window, FrameResolution::Projected);

        assert_relative_eq!(delta.x, projected.x, epsilon = 1e-12);
        assert_relative_eq!(delta.y, projected.y, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_follows_wall_rotation() {
        // Wall turned 90 degrees about the vertical axis: its local X runs along world -Z
        let rotation = Matrix4::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2);
        let wall_pose = Matrix4::new_translation(&Vector3::new(1.0, 1.25, 0.0)) * rotation;
        let door_pose = Matrix4::new_translation(&Vector3::new(1.0, 1.05, -1.0)) * rotation;

        let rect = resolve_projected_opening_rect(&wall_at(wall_pose), &door_at(door_pose));

        assert_relative_eq!(rect.center().x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(rect.center().y, -0.2, epsilon = 1e-9);

        // The delta formula only sees the unchanged world X
        let delta = resolve_local_opening_rect(&wall_at(wall_pose), &door_at(door_pose));
        assert_relative_eq!(delta.center().x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_singular_wall_falls_back() {
        let mut singular = Matrix4::zeros();
        singular[(0, 3)] = 1.0;
        let door = door_at(Matrix4::new_translation(&Vector3::new(1.5, 0.0, 0.0)));

        let rect = resolve_projected_opening_rect(&wall_at(singular), &door);
        assert_eq!(rect, resolve_local_opening_rect(&wall_at(singular), &door));
    }
}
