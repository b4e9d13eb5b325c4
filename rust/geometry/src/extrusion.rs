// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes
//!
//! Profiles are swept along the Z axis and centered on the profile plane:
//! the back cap lies at `z = -depth/2` and the front cap at `z = +depth/2`.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along the Z axis
#[inline]
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    check_depth(depth)?;

    let triangulation = profile.triangulate()?;
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count(profile),
        triangulation.indices.len() * 2 + side_vertex_count(profile) / 4 * 6,
    );
    append_extrusion(&triangulation, profile, depth, &mut mesh);

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Extrude every profile of a region into one mesh
///
/// An empty region gives an empty mesh. Profiles that cannot be triangulated
/// are skipped.
pub fn extrude_region(
    region: &[Profile2D],
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    check_depth(depth)?;

    let mut mesh = Mesh::new();
    for profile in region {
        match profile.triangulate() {
            Ok(triangulation) => append_extrusion(&triangulation, profile, depth, &mut mesh),
            Err(e) => {
                tracing::warn!(error = %e, vertices = profile.outer.len(), "Skipping untriangulable profile");
            }
        }
    }

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

fn check_depth(depth: f64) -> Result<()> {
    if !depth.is_finite() || depth <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {}",
            depth
        )));
    }
    Ok(())
}

fn side_vertex_count(profile: &Profile2D) -> usize {
    (profile.outer.len() + profile.holes.iter().map(|h| h.len()).sum::<usize>()) * 4
}

fn append_extrusion(triangulation: &Triangulation, profile: &Profile2D, depth: f64, mesh: &mut Mesh) {
    let half = depth / 2.0;

    create_cap_mesh(triangulation, -half, false, mesh);
    create_cap_mesh(triangulation, half, true, mesh);

    create_side_walls(&profile.outer, -half, half, mesh);
    for hole in &profile.holes {
        create_side_walls(hole, -half, half, mesh);
    }
}

/// Create a cap mesh (front or back) from triangulation
///
/// Each triangle is wound to face +Z for the front cap and -Z for the back
/// cap, whatever order the triangulator returned it in.
#[inline]
fn create_cap_mesh(triangulation: &Triangulation, z: f64, front: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if front { Vector3::z() } else { -Vector3::z() };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let ccw = triangle_is_ccw(
            &triangulation.points[tri[0]],
            &triangulation.points[tri[1]],
            &triangulation.points[tri[2]],
        );
        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        if ccw == front {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

#[inline]
fn triangle_is_ccw(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) > 0.0
}

/// One quad per boundary edge between `z_start` and `z_end`.
///
/// Outer boundaries are counter-clockwise and holes clockwise, so the
/// right-hand edge normal points away from the solid for both. Zero-length
/// edges are skipped.
fn create_side_walls(boundary: &[Point2<f64>], z_start: f64, z_end: f64, mesh: &mut Mesh) {
    let next = boundary.iter().cycle().skip(1);
    for (p0, p1) in boundary.iter().zip(next) {
        let Some(normal) = Vector3::new(p1.y - p0.y, p0.x - p1.x, 0.0).try_normalize(1e-10) else {
            continue;
        };

        let first = mesh.vertex_count() as u32;
        for (p, z) in [(p0, z_start), (p1, z_start), (p1, z_end), (p0, z_end)] {
            mesh.add_vertex(Point3::new(p.x, p.y, z), normal);
        }
        mesh.add_triangle(first, first + 1, first + 2);
        mesh.add_triangle(first, first + 2, first + 3);
    }
}

/// Move a mesh by `transform`.
///
/// Normals go through the inverse transpose so they stay perpendicular under
/// non-uniform scale; a singular transform falls back to the matrix itself.
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    for p in mesh.positions.chunks_exact_mut(3) {
        let moved = transform.transform_point(&Point3::new(p[0] as f64, p[1] as f64, p[2] as f64));
        p.copy_from_slice(&[moved.x as f32, moved.y as f32, moved.z as f32]);
    }

    let normal_matrix = transform
        .fixed_view::<3, 3>(0, 0)
        .into_owned();
    let normal_matrix = normal_matrix
        .try_inverse()
        .unwrap_or(normal_matrix)
        .transpose();

    for n in mesh.normals.chunks_exact_mut(3) {
        let normal = Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64);
        let turned = (normal_matrix * normal).try_normalize(1e-12).unwrap_or(normal);
        n.copy_from_slice(&[turned.x as f32, turned.y as f32, turned.z as f32]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bool2d::subtract_2d;
    use approx::assert_relative_eq;
    use crate::profile::{create_rectangle, LocalRect};

    #[test]
    fn test_extrusion_is_centered_on_plane() {
        let mesh = extrude_profile(&create_rectangle(4.0, 2.5), 0.1, None).unwrap();

        // Two caps of 4 vertices plus a quad per edge
        assert_eq!(mesh.vertex_count(), 2 * 4 + 4 * 4);
        assert_eq!(mesh.triangle_count(), 2 * 2 + 4 * 2);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min, Point3::new(-2.0, -1.25, -0.05), epsilon = 1e-6);
        assert_relative_eq!(max, Point3::new(2.0, 1.25, 0.05), epsilon = 1e-6);
    }

    #[test]
    fn test_caps_face_outward() {
        let profile = create_rectangle(2.0, 3.0);
        let mesh = extrude_profile(&profile, 0.5, None).unwrap();

        assert!((mesh.area_facing(&Vector3::z()) - 6.0).abs() < 1e-5);
        assert!((mesh.area_facing(&-Vector3::z()) - 6.0).abs() < 1e-5);
        assert!((mesh.area_facing(&Vector3::x()) - 1.5).abs() < 1e-5);
        assert!((mesh.area_facing(&-Vector3::y()) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_side_normals_match_winding() {
        let profile = create_rectangle(2.0, 2.0);
        let mesh = extrude_profile(&profile, 1.0, None).unwrap();

        // Every stored normal agrees with its triangle's winding
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.position(tri[k] as usize));
            let face = (b - a).cross(&(c - a)).normalize();
            let n = &mesh.normals[tri[0] as usize * 3..tri[0] as usize * 3 + 3];
            let stored = Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64);
            assert!(face.dot(&stored) > 0.99);
        }
    }

    #[test]
    fn test_hole_walls_face_into_hole() {
        let region = subtract_2d(
            &[create_rectangle(4.0, 4.0)],
            &LocalRect::centered(0.0, 0.0, 1.0, 1.0).to_contour(),
        )
        .unwrap();
        let mesh = extrude_region(&region, 1.0, None).unwrap();

        // Outer wall facing +x at x=2 plus hole wall facing +x at x=-0.5
        assert!((mesh.area_facing(&Vector3::x()) - 5.0).abs() < 1e-4);
        assert!((mesh.area_facing(&Vector3::z()) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_transform_places_mesh() {
        let wall_pose = Matrix4::new_translation(&Vector3::new(0.0, 1.25, -2.0));
        let mesh = extrude_profile(&create_rectangle(4.0, 2.5), 0.2, Some(wall_pose)).unwrap();

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min, Point3::new(-2.0, 0.0, -2.1), epsilon = 1e-6);
        assert_relative_eq!(max, Point3::new(2.0, 2.5, -1.9), epsilon = 1e-6);
    }

    #[test]
    fn test_scale_keeps_normals_unit() {
        let stretch = Matrix4::new_nonuniform_scaling(&Vector3::new(3.0, 1.0, 0.5));
        let mut mesh = extrude_profile(&create_rectangle(1.0, 1.0), 1.0, None).unwrap();
        apply_transform(&mut mesh, &stretch);

        for n in mesh.normals.chunks_exact(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert_relative_eq!(len, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rotation_turns_normals() {
        let profile = create_rectangle(1.0, 1.0);
        let rotation = Matrix4::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2);

        let mesh = extrude_profile(&profile, 1.0, Some(rotation)).unwrap();

        // Front cap normal (+z) rotates onto +x
        assert!((mesh.area_facing(&Vector3::x()) - 1.0).abs() < 1e-5);
        let front = &mesh.normals[4 * 3..4 * 3 + 3];
        assert!((front[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_region() {
        let mesh = extrude_region(&[], 1.0, None).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_invalid_depth() {
        let profile = create_rectangle(10.0, 5.0);
        assert!(extrude_profile(&profile, -1.0, None).is_err());
        assert!(extrude_profile(&profile, 0.0, None).is_err());
        assert!(extrude_region(&[profile], f64::NAN, None).is_err());
    }
}
