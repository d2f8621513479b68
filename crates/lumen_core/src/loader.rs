//! Scene file loading.
//!
//! Scenes are JSON documents mirroring [`SceneDescription`]. Vectors are
//! written as `[x, y, z]` arrays and shapes are tagged by `"type"`:
//!
//! ```json
//! {
//!   "camera": { "eye": [0, 0, 6], "look_at": [0, 0, 1], "up": [0, 1, 0],
//!               "fov_y": 65, "width": 64, "height": 64 },
//!   "lights": [ { "position": [0, 3, -2], "color": [0.2, 0.2, 0.2] } ],
//!   "shapes": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1 } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scene contains no shapes")]
    NoShapes,

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// Load and validate a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene from {:?}", path);

    let text = fs::read_to_string(path)?;
    load_scene_from_str(&text)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    scene.validate()?;

    log::debug!(
        "Parsed scene: {} shapes, {} lights, {}x{} viewport",
        scene.shapes.len(),
        scene.lights.len(),
        scene.camera.width,
        scene.camera.height
    );

    Ok(scene)
}
