// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-scan runner - render a captured-room snapshot into a mesh scene.
//!
//! ```text
//! roomscan [SNAPSHOT.json] [SCENE.json]
//! ```
//!
//! Arguments take precedence over `ROOMSCAN_INPUT` and `ROOMSCAN_OUTPUT`.
//! Render options come from `ROOMSCAN_OPTIONS` (a JSON file) and the
//! `ROOMSCAN_*_MODE`, `ROOMSCAN_FRAME_RESOLUTION`, `ROOMSCAN_CORNER_MARKERS`
//! and `ROOMSCAN_STRICT` overrides.

use anyhow::{bail, Context};
use roomscan_core::CapturedRoom;
use roomscan_processing::{render_room, NodeKind};
use std::path::PathBuf;

mod config;

use config::Config;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info,roomscan=debug".into()))
        .init();

    let mut config = Config::from_env();
    let mut args = std::env::args().skip(1);
    if let Some(input) = args.next() {
        config.input = Some(PathBuf::from(input));
    }
    if let Some(output) = args.next() {
        config.output = Some(PathBuf::from(output));
    }

    let Some(input) = config.input.clone() else {
        bail!("No snapshot given: pass a path or set ROOMSCAN_INPUT");
    };
    let options = config.render_options()?;

    tracing::info!(
        input = %input.display(),
        wall_mode = ?options.wall_mode,
        floor_mode = ?options.floor_mode,
        frame_resolution = ?options.frame_resolution,
        "Rendering snapshot"
    );

    let room = CapturedRoom::load(&input)
        .with_context(|| format!("Failed to load snapshot {}", input.display()))?;
    let scene = render_room(&room, &options);

    tracing::info!(
        floors = scene.nodes_of(NodeKind::Floor).count(),
        walls = scene.nodes_of(NodeKind::Wall).count(),
        doors = scene.nodes_of(NodeKind::Door).count(),
        windows = scene.nodes_of(NodeKind::Window).count(),
        objects = scene.nodes_of(NodeKind::Object).count(),
        vertices = scene.vertex_count(),
        triangles = scene.triangle_count(),
        "Scene ready"
    );

    if let Some(output) = &config.output {
        let json = scene.to_json_pretty().context("Failed to serialize scene")?;
        std::fs::write(output, json)
            .with_context(|| format!("Failed to write scene to {}", output.display()))?;
        tracing::info!(output = %output.display(), "Wrote scene");
    }

    Ok(())
}
