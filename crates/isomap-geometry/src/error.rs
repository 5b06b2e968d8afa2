#![warn(missing_docs)]

//! Error types for the geometry library.
//!
//! This module defines error types that can occur while building an
//! isometric projection.

use core::fmt;

/// Errors that can occur in geometry setup.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Error for an invalid tile size.
    /// This variant is returned when a tile width or height of zero is provided.
    InvalidTileSize(&'static str),
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidTileSize(msg) => write!(f, "Invalid tile size: {}", msg),
        }
    }
}

impl core::error::Error for GeometryError {}
