// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle meshes and their colors

use nalgebra::{Point3, Vector3};

/// RGBA color in 0-1 range
pub type Rgba = [f32; 4];

/// Indexed triangle mesh with flat f32 buffers, ready to hand to a renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// x, y, z per vertex
    pub positions: Vec<f32>,
    /// Unit normal per vertex
    pub normals: Vec<f32>,
    /// Three vertex indices per triangle, counter-clockwise seen from the
    /// side the face normal points to
    pub indices: Vec<u32>,
}

/// A mesh with one uniform surface color
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredMesh {
    pub mesh: Mesh,
    pub color: Rgba,
}

impl ColoredMesh {
    pub fn new(mesh: Mesh, color: Rgba) -> Self {
        Self { mesh, color }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty mesh with room for `vertex_count` vertices and `index_count`
    /// indices
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Append a vertex; positions and normals are stored as f32
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Append `other`, shifting its indices past the existing vertices
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|&i| base + i));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A mesh without faces draws nothing, whatever vertices it holds
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of a vertex in f64
    #[inline]
    pub fn position(&self, index: usize) -> Point3<f64> {
        let p = &self.positions[index * 3..index * 3 + 3];
        Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }

    /// Axis-aligned bounds `(min, max)`; the origin twice for a mesh with
    /// no vertices
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut points = self
            .positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]));
        let Some(first) = points.next() else {
            return (Point3::origin(), Point3::origin());
        };
        points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)))
    }

    /// Iterate triangles as vertex position triples
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.position(tri[0] as usize),
                self.position(tri[1] as usize),
                self.position(tri[2] as usize),
            ]
        })
    }

    /// Total area of all triangles
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Area of the triangles whose winding faces `direction`
    ///
    /// For an extruded panel and the extrusion axis this is the cap area, i.e.
    /// the footprint of the panel.
    pub fn area_facing(&self, direction: &Vector3<f64>) -> f64 {
        let Some(direction) = direction.try_normalize(1e-12) else {
            return 0.0;
        };
        self.triangles()
            .filter_map(|[a, b, c]| {
                let cross = (b - a).cross(&(c - a));
                let area = cross.norm() * 0.5;
                let facing = cross.try_normalize(1e-12)?.dot(&direction);
                (facing > 1.0 - 1e-6).then_some(area)
            })
            .sum()
    }
}
