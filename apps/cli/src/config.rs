// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runner configuration loaded from environment variables.

use anyhow::Context;
use roomscan_processing::{FloorMode, FrameResolution, RenderOptions, WallMode};
use std::path::PathBuf;

/// Runner configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Snapshot file to render.
    pub input: Option<PathBuf>,
    /// Where to write the scene JSON; nothing is written when unset.
    pub output: Option<PathBuf>,
    /// JSON file with [`RenderOptions`]; the variables below override it.
    pub options_file: Option<PathBuf>,
    pub wall_mode: Option<WallMode>,
    pub floor_mode: Option<FloorMode>,
    pub frame_resolution: Option<FrameResolution>,
    pub corner_markers: Option<bool>,
    pub strict: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Unparseable values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            input: var("ROOMSCAN_INPUT").map(PathBuf::from),
            output: var("ROOMSCAN_OUTPUT").map(PathBuf::from),
            options_file: var("ROOMSCAN_OPTIONS").map(PathBuf::from),
            wall_mode: var("ROOMSCAN_WALL_MODE").and_then(|v| parse_choice("ROOMSCAN_WALL_MODE", &v)),
            floor_mode: var("ROOMSCAN_FLOOR_MODE").and_then(|v| parse_choice("ROOMSCAN_FLOOR_MODE", &v)),
            frame_resolution: var("ROOMSCAN_FRAME_RESOLUTION")
                .and_then(|v| parse_choice("ROOMSCAN_FRAME_RESOLUTION", &v)),
            corner_markers: var("ROOMSCAN_CORNER_MARKERS").and_then(|v| parse_flag("ROOMSCAN_CORNER_MARKERS", &v)),
            strict: var("ROOMSCAN_STRICT").and_then(|v| parse_flag("ROOMSCAN_STRICT", &v)),
        }
    }

    /// Render options: the options file if one is set, then the
    /// per-variable overrides.
    pub fn render_options(&self) -> anyhow::Result<RenderOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file {}", path.display()))?;
                RenderOptions::from_json(&json)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => RenderOptions::default(),
        };

        if let Some(mode) = self.wall_mode {
            options.wall_mode = mode;
        }
        if let Some(mode) = self.floor_mode {
            options.floor_mode = mode;
        }
        if let Some(resolution) = self.frame_resolution {
            options.frame_resolution = resolution;
        }
        if let Some(markers) = self.corner_markers {
            options.corner_markers = markers;
        }
        if let Some(strict) = self.strict {
            options.strict_geometry = strict;
        }

        Ok(options)
    }
}

/// Parse a snake_case enum value the way the options file spells it
fn parse_choice<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Option<T> {
    match serde_json::from_value(serde_json::Value::String(value.to_ascii_lowercase())) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value, "Ignoring unrecognized value");
            None
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value, "Ignoring unrecognized flag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let config = config(&[]);
        assert!(config.input.is_none());
        assert_eq!(config.render_options().unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ROOMSCAN_INPUT", "room.json"),
            ("ROOMSCAN_WALL_MODE", "Full"),
            ("ROOMSCAN_FLOOR_MODE", "cut"),
            ("ROOMSCAN_FRAME_RESOLUTION", "translation_delta"),
            ("ROOMSCAN_CORNER_MARKERS", "yes"),
            ("ROOMSCAN_STRICT", "1"),
        ]);
        assert_eq!(config.input, Some(PathBuf::from("room.json")));

        let options = config.render_options().unwrap();
        assert_eq!(options.wall_mode, WallMode::Full);
        assert_eq!(options.floor_mode, FloorMode::Cut);
        assert_eq!(options.frame_resolution, FrameResolution::TranslationDelta);
        assert!(options.corner_markers);
        assert!(options.strict_geometry);
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = config(&[("ROOMSCAN_WALL_MODE", "hollow"), ("ROOMSCAN_STRICT", "maybe")]);
        assert!(config.wall_mode.is_none());
        assert!(config.strict.is_none());
    }

    #[test]
    fn test_missing_options_file() {
        let config = config(&[("ROOMSCAN_OPTIONS", "/definitely/not/options.json")]);
        assert!(config.render_options().is_err());
    }
}
