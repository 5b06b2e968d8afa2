#![warn(missing_docs)]
#![doc = "Scene state and rendering for isometric tile maps."]
#![doc = ""]
#![doc = "This crate holds the tile grid and entity layers, keeps them depth sorted,"]
#![doc = "moves persons with directional collision checks, and draws everything onto"]
#![doc = "any backend implementing the [`Surface`] trait."]

pub mod assets;
pub mod collision;
pub mod depth;
pub mod entity;
pub mod error;
pub mod input;
pub mod map;
pub mod render;
pub mod scene;
pub mod surface;

#[cfg(test)]
mod testutils;

pub use assets::ImageCache;
pub use depth::{TieBreak, sort_by_depth};
pub use entity::{Entity, EntityId, EntityKind, Person, Tile};
pub use error::SceneError;
pub use input::{ArrowKey, DirectionalInput};
pub use map::{TileMap, TileMapBuilder};
pub use render::Renderer;
pub use scene::{Layer, Scene};
pub use surface::{Bitmap, Rect, Rgba, Surface};
