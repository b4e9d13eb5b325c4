// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde adapters for the numeric fields of the snapshot schema.
//!
//! Capture exports are not consistent about how they spell vectors and
//! matrices, so each adapter accepts every layout seen in the wild and always
//! writes the most compact one back:
//!
//! - vectors: `[x, y, z]`, `[x, y]` or `{"x": .., "y": .., "z": ..}`
//! - transforms: 16 flat column-major values, or 4 column arrays of 4 values

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum VectorRepr {
    Array(Vec<f64>),
    Object {
        x: f64,
        y: f64,
        #[serde(default)]
        z: f64,
    },
}

impl VectorRepr {
    fn into_vector<E: serde::de::Error>(self) -> Result<Vector3<f64>, E> {
        match self {
            Self::Array(values) => match values.as_slice() {
                [x, y] => Ok(Vector3::new(*x, *y, 0.0)),
                [x, y, z, ..] => Ok(Vector3::new(*x, *y, *z)),
                _ => Err(E::custom(format!(
                    "expected 2 or 3 vector components, found {}",
                    values.len()
                ))),
            },
            Self::Object { x, y, z } => Ok(Vector3::new(x, y, z)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MatrixRepr {
    Flat(Vec<f64>),
    Columns(Vec<Vec<f64>>),
}

/// `Vector3<f64>` as `[x, y, z]`.
pub mod vector3 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq([value.x, value.y, value.z])
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vector3<f64>, D::Error> {
        VectorRepr::deserialize(deserializer)?.into_vector()
    }
}

/// `Vec<Point3<f64>>` as a list of `[x, y, z]`.
pub mod points {
    use super::*;

    pub fn serialize<S: Serializer>(points: &[Point3<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| [p.x, p.y, p.z]))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Point3<f64>>, D::Error> {
        Vec::<VectorRepr>::deserialize(deserializer)?
            .into_iter()
            .map(|repr| repr.into_vector().map(Point3::from))
            .collect()
    }
}

/// `Matrix4<f64>` as 16 column-major values.
pub mod matrix4 {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Matrix4<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        // nalgebra storage is column-major already
        serializer.collect_seq(value.as_slice())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Matrix4<f64>, D::Error> {
        match MatrixRepr::deserialize(deserializer)? {
            MatrixRepr::Flat(values) if values.len() == 16 => Ok(Matrix4::from_column_slice(&values)),
            MatrixRepr::Flat(values) => Err(D::Error::custom(format!(
                "expected 16 transform values, found {}",
                values.len()
            ))),
            MatrixRepr::Columns(columns) => {
                if columns.len() != 4 || columns.iter().any(|c| c.len() != 4) {
                    return Err(D::Error::custom("expected 4 transform columns of 4 values"));
                }
                let flat: Vec<f64> = columns.into_iter().flatten().collect();
                Ok(Matrix4::from_column_slice(&flat))
            }
        }
    }
}
