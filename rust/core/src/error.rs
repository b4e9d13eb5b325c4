// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for snapshot loading.

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a captured-room snapshot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not valid snapshot JSON.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot file could not be read.
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// A surface transform contains non-finite values.
    #[error("surface {identifier} has a non-finite transform")]
    InvalidTransform { identifier: String },

    /// A surface reports negative or non-finite dimensions.
    #[error("surface {identifier} has invalid dimensions ({x}, {y}, {z})")]
    InvalidDimensions {
        identifier: String,
        x: f64,
        y: f64,
        z: f64,
    },
}
