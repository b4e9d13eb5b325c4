// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid extrusion parameters: {0}")]
    InvalidExtrusion(String),

    #[error("Invalid polygon: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Snapshot error: {0}")]
    CoreError(#[from] roomscan_core::Error),
}

/// Reasons a closed polygon is unusable as an extrusion outline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polygon has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),

    #[error("polygon has a non-finite coordinate at vertex {0}")]
    NonFinite(usize),

    #[error("polygon encloses no area")]
    ZeroArea,

    #[error("edges {0} and {1} intersect")]
    SelfIntersection(usize, usize),
}
