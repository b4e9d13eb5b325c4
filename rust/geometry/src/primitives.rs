// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box primitive for surfaces and objects that are never cut

use crate::mesh::{ColoredMesh, Mesh, Rgba};
use nalgebra::{Point3, Vector3};

/// Build a box of `width x height x depth` centered on the local origin.
///
/// Each face carries its own four vertices so normals stay flat. Zero,
/// negative or non-finite extents give an empty mesh.
pub fn build_box(width: f64, height: f64, depth: f64, color: Rgba) -> ColoredMesh {
    let extents = [width, height, depth];
    if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
        return ColoredMesh::new(Mesh::new(), color);
    }

    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    let mut mesh = Mesh::with_capacity(24, 36);

    // (normal, u, v) with u x v = normal
    let faces = [
        (Vector3::x(), Vector3::y(), Vector3::z()),
        (-Vector3::x(), Vector3::z(), Vector3::y()),
        (Vector3::y(), Vector3::z(), Vector3::x()),
        (-Vector3::y(), Vector3::x(), Vector3::z()),
        (Vector3::z(), Vector3::x(), Vector3::y()),
        (-Vector3::z(), Vector3::y(), Vector3::x()),
    ];

    for (normal, u, v) in faces {
        let base = mesh.vertex_count() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let offset = normal + u * su + v * sv;
            mesh.add_vertex(Point3::from(offset.component_mul(&half)), normal);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }

    ColoredMesh::new(mesh, color)
}
