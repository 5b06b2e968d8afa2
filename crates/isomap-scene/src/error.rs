//! This module defines the error types used by the `isomap-scene` crate.

#![warn(missing_docs)]

use isomap_geometry::GeometryError;

/// Error type for scene setup and rendering.
///
/// This enum encapsulates the failures that can occur while building a tile
/// map, attaching a drawing surface or drawing a frame.
#[derive(Debug, PartialEq)]
pub enum SceneError {
    /// No drawing surface was attached before building the renderer.
    MissingSurface,
    /// The drawing surface exists but has no usable 2D drawing context.
    MissingContext(&'static str),
    /// Map width or height is zero.
    InvalidMapSize(&'static str),
    /// No image is cached under the given basename.
    ImageNotFound(String),
    /// The tile projection could not be built.
    Geometry(GeometryError),
}

impl core::fmt::Display for SceneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SceneError::MissingSurface => write!(f, "No drawing surface attached"),
            SceneError::MissingContext(msg) => write!(f, "Drawing context unavailable: {}", msg),
            SceneError::InvalidMapSize(msg) => write!(f, "Invalid map size: {}", msg),
            SceneError::ImageNotFound(name) => write!(f, "Image '{}' not found", name),
            SceneError::Geometry(e) => write!(f, "Invalid geometry: {}", e),
        }
    }
}

impl core::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SceneError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}
