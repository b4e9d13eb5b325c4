// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rendered scene: positioned, colored meshes handed to a renderer.

use roomscan_geometry::{apply_transform, ColoredMesh, Matrix4, Mesh, Rgba};
use serde::{Deserialize, Serialize};

/// What a scene node was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Floor,
    Wall,
    Door,
    Window,
    Object,
    CornerMarker,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Floor => "floor",
            NodeKind::Wall => "wall",
            NodeKind::Door => "door",
            NodeKind::Window => "window",
            NodeKind::Object => "object",
            NodeKind::CornerMarker => "corner_marker",
        }
    }
}

/// A local-frame mesh and the transform placing it in the world
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identifier of the source element
    pub identifier: String,
    pub kind: NodeKind,
    pub mesh: ColoredMesh,
    /// Local-to-world transform
    pub transform: Matrix4<f64>,
}

impl SceneNode {
    pub fn new(
        identifier: impl Into<String>,
        kind: NodeKind,
        mesh: ColoredMesh,
        transform: Matrix4<f64>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            mesh,
            transform,
        }
    }

    /// Mesh with positions and normals moved into world space
    pub fn world_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.mesh.clone();
        apply_transform(&mut mesh, &self.transform);
        mesh
    }

    pub fn to_mesh_data(&self) -> MeshData {
        let Mesh {
            positions,
            normals,
            indices,
        } = self.world_mesh();
        MeshData {
            identifier: self.identifier.clone(),
            kind: self.kind,
            positions,
            normals,
            indices,
            color: self.mesh.color,
        }
    }
}

/// Meshes produced by one render pass, in build order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Empty meshes carry nothing to draw and are dropped;
    /// returns whether the node was kept.
    pub fn push(&mut self, node: SceneNode) -> bool {
        if node.mesh.is_empty() {
            tracing::debug!(id = %node.identifier, kind = node.kind.as_str(), "Dropping empty mesh");
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    /// Nodes built from one kind of element
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Find the node for a source element
    pub fn node(&self, identifier: &str, kind: NodeKind) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind && n.identifier == identifier)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes.iter().map(|n| n.mesh.mesh.triangle_count()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.nodes.iter().map(|n| n.mesh.mesh.vertex_count()).sum()
    }

    /// World-space mesh data for every node
    pub fn to_mesh_data(&self) -> Vec<MeshData> {
        self.nodes.iter().map(SceneNode::to_mesh_data).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&SceneData::from(self))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SceneData::from(self))
    }
}

/// Serialized world-space mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshData {
    /// Identifier of the source element
    pub identifier: String,
    pub kind: NodeKind,
    /// Vertex positions (x, y, z triplets)
    pub positions: Vec<f32>,
    /// Vertex normals (x, y, z triplets)
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// RGBA color in 0-1 range
    pub color: Rgba,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}

/// Serialized scene with totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    pub meshes: Vec<MeshData>,
    pub stats: SceneStats,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneStats {
    pub mesh_count: usize,
    pub total_vertices: usize,
    pub total_triangles: usize,
}

impl From<&Scene> for SceneData {
    fn from(scene: &Scene) -> Self {
        Self {
            meshes: scene.to_mesh_data(),
            stats: SceneStats {
                mesh_count: scene.len(),
                total_vertices: scene.vertex_count(),
                total_triangles: scene.triangle_count(),
            },
        }
    }
}
