//! Tile map parameters: projection, map extent and tile style.

use isomap_geometry::{IsoProjection, MapPosition, ScreenPosition, Size, is_on_map};
use tracing::debug;

use crate::error::SceneError;
use crate::surface::Rgba;

/// Fixed parameters of an isometric tile map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMap {
    projection: IsoProjection,
    map_size: Size,
    screen_size: Size,
    tile_color: Rgba,
}

impl TileMap {
    /// Returns a builder with no sizes set.
    pub fn builder() -> TileMapBuilder {
        TileMapBuilder::default()
    }

    /// Map <-> screen projection.
    pub fn projection(&self) -> &IsoProjection {
        &self.projection
    }

    /// Map extent in tiles.
    pub fn map_size(&self) -> Size {
        self.map_size
    }

    /// Screen extent in pixels.
    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// Tile size in pixels.
    pub fn tile_size(&self) -> Size {
        self.projection.tile_size()
    }

    /// Fill colour of floor tiles.
    pub fn tile_color(&self) -> Rgba {
        self.tile_color
    }

    /// Replaces the fill colour of floor tiles.
    pub fn set_tile_color(&mut self, color: Rgba) {
        self.tile_color = color;
    }

    /// Returns `true` if `pos` is a cell of this map.
    pub fn is_on_map(&self, pos: MapPosition) -> bool {
        is_on_map(pos, self.map_size)
    }

    /// See [`IsoProjection::map_to_screen`].
    pub fn map_to_screen(&self, pos: MapPosition) -> ScreenPosition {
        self.projection.map_to_screen(pos)
    }

    /// See [`IsoProjection::screen_to_map`].
    pub fn screen_to_map(&self, pos: ScreenPosition) -> MapPosition {
        self.projection.screen_to_map(pos)
    }

    /// The on-map tile drawn under a screen point, if any. See
    /// [`IsoProjection::pick`].
    pub fn pick(&self, pos: ScreenPosition) -> Option<MapPosition> {
        self.projection.pick(pos, self.map_size)
    }
}

/// Builder for [`TileMap`].
#[derive(Debug, Default, Clone)]
pub struct TileMapBuilder {
    screen_size: Size,
    map_size: Size,
    tile_size: Size,
    origin: Option<ScreenPosition>,
    color: Option<Rgba>,
}

impl TileMapBuilder {
    /// Screen size in pixels; used for the default map anchor.
    pub fn with_screen_size(mut self, size: Size) -> TileMapBuilder {
        self.screen_size = size;
        self
    }

    /// Map size in tiles.
    pub fn with_map_size(mut self, size: Size) -> TileMapBuilder {
        self.map_size = size;
        self
    }

    /// Tile size in pixels.
    pub fn with_tile_size(mut self, size: Size) -> TileMapBuilder {
        self.tile_size = size;
        self
    }

    /// Anchor map cell `(0, 0)` at `origin` instead of the default
    /// (screen centre, one tile height down).
    pub fn with_origin(mut self, origin: ScreenPosition) -> TileMapBuilder {
        self.origin = Some(origin);
        self
    }

    /// Tile fill colour; defaults to [`Rgba::TILE`].
    pub fn with_color(mut self, color: Rgba) -> TileMapBuilder {
        self.color = Some(color);
        self
    }

    /// Builds the map.
    ///
    /// # Errors
    ///
    /// Returns `Err(SceneError::InvalidMapSize)` if the map has no cells and
    /// `Err(SceneError::Geometry)` if the tile size is zero.
    pub fn build(&self) -> Result<TileMap, SceneError> {
        if self.map_size.is_empty() {
            return Err(SceneError::InvalidMapSize("width and height must be non-zero"));
        }
        let projection = match self.origin {
            Some(origin) => IsoProjection::new(self.tile_size, origin)?,
            None => IsoProjection::centered(self.tile_size, self.screen_size)?,
        };
        debug!(%projection, map_size = %self.map_size, "Tile map built");
        Ok(TileMap {
            projection,
            map_size: self.map_size,
            screen_size: self.screen_size,
            tile_color: self.color.unwrap_or(Rgba::TILE),
        })
    }
}
