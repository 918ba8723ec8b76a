// Copyright 2025 Cowboy AI, LLC.

//! JSON persistence of scene tags
//!
//! Output is pretty-printed with two-space indentation and keys in the fixed
//! order `scene_type, time_of_day, condition, weather, mood, density,
//! lighting_intensity, confidence`.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::schema_for;
use tracing::info;

use crate::errors::TaggingResult;
use crate::tags::SceneTags;

/// Render tags as pretty JSON
pub fn to_json_pretty(tags: &SceneTags) -> TaggingResult<String> {
    Ok(serde_json::to_string_pretty(tags)?)
}

/// Write tags to `path`, creating parent directories; returns the absolute path
pub fn write_tags(path: impl AsRef<Path>, tags: &SceneTags) -> TaggingResult<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_pretty(tags)?)?;
    let absolute = fs::canonicalize(path)?;
    info!(path = %absolute.display(), "Saved scene tags");
    Ok(absolute)
}

/// Read tags written by [`write_tags`]
pub fn read_tags(path: impl AsRef<Path>) -> TaggingResult<SceneTags> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// JSON Schema of the output document
pub fn output_schema() -> TaggingResult<serde_json::Value> {
    Ok(serde_json::to_value(schema_for!(SceneTags))?)
}
