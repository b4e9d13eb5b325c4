// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-scan Processing
//!
//! Turns a captured-room snapshot into a scene of positioned, colored meshes.
//! Each render pass is a pure function of the snapshot and [`RenderOptions`]:
//! openings are indexed by wall once, walls are cut, and everything else is
//! boxed.
//!
//! ```no_run
//! use roomscan_core::CapturedRoom;
//! use roomscan_processing::{render_room, RenderOptions};
//!
//! let room = CapturedRoom::load("room.json")?;
//! let scene = render_room(&room, &RenderOptions::default());
//! println!("{}", scene.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod opening_index;
pub mod options;
pub mod render;
pub mod scene;

pub use opening_index::OpeningIndex;
pub use options::{FloorMode, Palette, RenderOptions, Thickness, WallMode};
pub use roomscan_geometry::FrameResolution;
pub use render::{render_room, RoomRenderer};
pub use scene::{MeshData, NodeKind, Scene, SceneData, SceneNode, SceneStats};
