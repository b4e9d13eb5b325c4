// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Room-scan Core
//!
//! Data model for captured-room snapshots: the planar surfaces (floors, walls,
//! doors, windows, generic openings) and furniture objects reported by a room
//! scanning session, together with a tolerant JSON loader.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomscan_core::CapturedRoom;
//!
//! let room = CapturedRoom::load("Room.json")?;
//! for wall in &room.walls {
//!     println!("{} is {:.2} x {:.2} m", wall.identifier, wall.width(), wall.height());
//! }
//! ```
//!
//! Snapshots are immutable once loaded; geometry crates derive meshes from
//! them without ever writing back.

pub mod encoding;
pub mod error;
pub mod room;
pub mod surface;

pub use error::{Error, Result};
pub use room::CapturedRoom;
pub use surface::{CapturedObject, Surface, SurfaceKind};
