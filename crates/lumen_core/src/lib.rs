//! Lumen Core - renderer-agnostic scene description.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `ShapeDescription`,
//!   `CameraDescription`, `Material`, `Light`
//! - **Scene files**: JSON loading with validation
//! - **Demo scene**: a built-in showcase used when no file is given
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} shapes, {} lights",
//!     scene.shapes.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadResult, SceneError};
pub use scene::{CameraDescription, Light, Material, SceneDescription, ShapeDescription};
