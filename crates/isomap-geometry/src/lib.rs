#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for isometric tile-map geometry."]
#![doc = ""]
#![doc = "This crate provides map and screen position types, the map <-> screen projection,"]
#![doc = "tile vertex and rect geometry, bounds checks and compass directions on the grid."]

use core::fmt;
use libm::{fabs, floor, round};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod direction;
pub mod error;
pub mod vertex;

pub use direction::Direction;
pub use error::GeometryError;
pub use vertex::{Edge, TileRect, TileVertex};

/// An integer tile index on the map grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapPosition {
    /// Tile column (grows towards the bottom-right of the screen).
    pub x: i32,
    /// Tile row (grows towards the bottom-left of the screen).
    pub y: i32,
}

impl MapPosition {
    /// Construct a new map position.
    pub const fn new(x: i32, y: i32) -> Self {
        MapPosition { x, y }
    }
}

impl fmt::Display for MapPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A pixel coordinate on the drawing surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScreenPosition {
    /// Horizontal pixel offset from the left edge.
    pub x: f64,
    /// Vertical pixel offset from the top edge.
    pub y: f64,
}

impl ScreenPosition {
    /// Construct a new screen position.
    pub const fn new(x: f64, y: f64) -> Self {
        ScreenPosition { x, y }
    }

    /// Translate by `(dx, dy)` pixels.
    pub const fn offset(self, dx: f64, dy: f64) -> Self {
        ScreenPosition::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for ScreenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1},{:.1}", self.x, self.y)
    }
}

/// A width/height pair: tile size in pixels or map size in tiles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl Size {
    /// Construct a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// Returns `true` if either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Treating `self` as a map size in tiles, returns `true` if `pos` is a
    /// valid cell.
    pub const fn contains(&self, pos: MapPosition) -> bool {
        pos.x >= 0 && (pos.x as i64) < self.width as i64 && pos.y >= 0 && (pos.y as i64) < self.height as i64
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Returns `true` iff both coordinates of `pos` are non-negative and strictly
/// less than the corresponding dimension of `map_size`.
pub const fn is_on_map(pos: MapPosition, map_size: Size) -> bool {
    map_size.contains(pos)
}

/// Distance from an integer below which `screen_to_map` treats a value as
/// that integer.
pub const SNAP_TOLERANCE: f64 = 1e-9;

fn snapped_floor(value: f64) -> i32 {
    let nearest = round(value);
    if fabs(value - nearest) < SNAP_TOLERANCE { nearest as i32 } else { floor(value) as i32 }
}

/// Isometric projection between the map grid and the screen.
///
/// Holds the tile pixel size and the screen anchor of map cell `(0, 0)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    /// Tile size in pixels.
    tile_size: Size,
    /// Screen anchor of map cell `(0, 0)`.
    origin: ScreenPosition,
}

impl IsoProjection {
    /// Construct a new projection.
    ///
    /// # Arguments
    ///
    /// * `tile_size`: Width and height of a single tile in pixels.
    /// * `origin`: Screen position that map cell `(0, 0)` is anchored to.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::InvalidTileSize)` if either tile dimension is zero.
    pub const fn new(tile_size: Size, origin: ScreenPosition) -> Result<Self, GeometryError> {
        if tile_size.is_empty() {
            return Err(GeometryError::InvalidTileSize("width and height must be non-zero"));
        }
        Ok(IsoProjection { tile_size, origin })
    }

    /// Construct a projection anchored the default way for a screen of
    /// `screen_size` pixels: horizontally centred, one tile height down.
    ///
    /// # Errors
    ///
    /// Same as [`IsoProjection::new`].
    pub fn centered(tile_size: Size, screen_size: Size) -> Result<Self, GeometryError> {
        let origin = ScreenPosition::new(screen_size.width as f64 / 2.0, tile_size.height as f64);
        IsoProjection::new(tile_size, origin)
    }

    /// Returns the tile size in pixels.
    pub const fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Returns the screen anchor of map cell `(0, 0)`.
    pub const fn origin(&self) -> ScreenPosition {
        self.origin
    }

    fn tile_width(&self) -> f64 {
        self.tile_size.width as f64
    }

    fn tile_height(&self) -> f64 {
        self.tile_size.height as f64
    }

    /// Converts a map position to the screen anchor of its tile.
    ///
    /// `((mx - my) * tw/2 + ox, (mx + my) * th/2 + oy)`
    pub fn map_to_screen(&self, pos: MapPosition) -> ScreenPosition {
        let mx = pos.x as f64;
        let my = pos.y as f64;
        ScreenPosition {
            x: (mx - my) * self.tile_width() / 2.0 + self.origin.x,
            y: (mx + my) * self.tile_height() / 2.0 + self.origin.y,
        }
    }

    /// Converts a screen position to the map cell it falls in.
    ///
    /// With `x = (sx - ox) / tw` and `y = (sy - oy) / th` the result is
    /// `(floor(y + x), floor(y - x))`. The floor rounds towards negative
    /// infinity, so points left of or above the origin land on negative cells.
    ///
    /// Sums within [`SNAP_TOLERANCE`] of an integer count as that integer, so
    /// every tile anchor maps back to its own cell whatever the origin.
    pub fn screen_to_map(&self, pos: ScreenPosition) -> MapPosition {
        let x = (pos.x - self.origin.x) / self.tile_width();
        let y = (pos.y - self.origin.y) / self.tile_height();
        MapPosition { x: snapped_floor(y + x), y: snapped_floor(y - x) }
    }

    /// The on-map cell whose drawn rhombus (see [`IsoProjection::tile_vertex`])
    /// contains `pos`, or `None` if that cell is outside a map of `map_size`
    /// tiles.
    ///
    /// The drawn rhombus sits half a tile width left of the cell
    /// [`IsoProjection::screen_to_map`] reports, so the candidate comes from
    /// the shifted point. Points on a shared outline go to the first tile
    /// whose outline contains them, candidate first.
    pub fn pick(&self, pos: ScreenPosition, map_size: Size) -> Option<MapPosition> {
        let cell = self.tile_at(pos);
        is_on_map(cell, map_size).then_some(cell)
    }

    /// The cell whose drawn rhombus contains `pos`, on or off the map.
    pub fn tile_at(&self, pos: ScreenPosition) -> MapPosition {
        let candidate = self.screen_to_map(pos.offset(self.tile_width() / 2.0, 0.0));
        let neighbours = Direction::ALL.map(|d| d.step(candidate));
        core::iter::once(candidate)
            .chain(neighbours)
            .find(|cell| self.tile_vertex(self.map_to_screen(*cell)).contains(pos))
            .unwrap_or(candidate)
    }

    /// The four rhombus vertices of the tile anchored at `anchor`.
    pub fn tile_vertex(&self, anchor: ScreenPosition) -> TileVertex {
        let w = self.tile_width();
        let h = self.tile_height();
        TileVertex {
            top: ScreenPosition::new(anchor.x - w / 2.0, anchor.y),
            left: ScreenPosition::new(anchor.x - w, anchor.y + h / 2.0),
            right: ScreenPosition::new(anchor.x, anchor.y + h / 2.0),
            bottom: ScreenPosition::new(anchor.x - w / 2.0, anchor.y + h),
        }
    }

    /// The bounding rect of the tile anchored at `anchor`.
    pub fn tile_rect(&self, anchor: ScreenPosition) -> TileRect {
        let w = self.tile_width();
        let h = self.tile_height();
        TileRect {
            top_right: anchor,
            top_left: ScreenPosition::new(anchor.x - w, anchor.y),
            bottom_right: ScreenPosition::new(anchor.x, anchor.y + h),
            bottom_left: ScreenPosition::new(anchor.x - w, anchor.y + h),
        }
    }
}

impl fmt::Display for IsoProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IsoProjection (tile: {}, origin: {})", self.tile_size, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn projection(ox: f64, oy: f64) -> IsoProjection {
        IsoProjection::new(Size::new(64, 32), ScreenPosition::new(ox, oy)).unwrap()
    }

    fn assert_close(actual: ScreenPosition, x: f64, y: f64) {
        assert!((actual.x - x).abs() < EPSILON, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < EPSILON, "y: {} != {}", actual.y, y);
    }

    #[test]
    fn test_projection_constructor() {
        let p = projection(10.0, 1.0);
        assert_eq!(p.tile_size(), Size::new(64, 32));
        assert_eq!(p.origin(), ScreenPosition::new(10.0, 1.0));
    }

    #[test]
    fn test_constructor_invalid_tile_size() {
        let result = IsoProjection::new(Size::new(0, 32), ScreenPosition::default());
        assert!(matches!(result, Err(GeometryError::InvalidTileSize(_))));
        let result = IsoProjection::new(Size::new(64, 0), ScreenPosition::default());
        assert!(matches!(result, Err(GeometryError::InvalidTileSize(_))));
    }

    #[test]
    fn test_centered_anchor() {
        let p = IsoProjection::centered(Size::new(64, 32), Size::new(1024, 800)).unwrap();
        assert_close(p.origin(), 512.0, 32.0);
    }

    #[test]
    fn test_origin_maps_to_anchor() {
        let p = projection(10.0, 1.0);
        assert_close(p.map_to_screen(MapPosition::new(0, 0)), 10.0, 1.0);
    }

    #[test]
    fn test_map_to_screen_examples() {
        let p = projection(0.0, 0.0);
        assert_close(p.map_to_screen(MapPosition::new(1, 1)), 0.0, 32.0);
        assert_close(p.map_to_screen(MapPosition::new(1, 0)), 32.0, 16.0);
        assert_close(p.map_to_screen(MapPosition::new(0, 1)), -32.0, 16.0);
    }

    #[test]
    fn test_round_trip_over_map() {
        let map = Size::new(14, 14);
        for p in [projection(0.0, 0.0), projection(10.0, 1.0), projection(512.0, 32.0)] {
            for x in 0..map.width as i32 {
                for y in 0..map.height as i32 {
                    let pos = MapPosition::new(x, y);
                    assert_eq!(p.screen_to_map(p.map_to_screen(pos)), pos);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_with_odd_tile_size() {
        let p = IsoProjection::new(Size::new(63, 31), ScreenPosition::new(7.0, 3.0)).unwrap();
        for x in -3..10 {
            for y in -3..10 {
                let pos = MapPosition::new(x, y);
                assert_eq!(p.screen_to_map(p.map_to_screen(pos)), pos);
            }
        }
    }

    #[test]
    fn test_screen_to_map_floors_towards_negative_infinity() {
        let p = projection(0.0, 0.0);
        // Just above the origin: y + x = -0.03, y - x = -0.03 -> (-1, -1).
        assert_eq!(p.screen_to_map(ScreenPosition::new(0.0, -1.0)), MapPosition::new(-1, -1));
        // Slightly left of the origin: x = -0.0156, y = 0 -> (-1, 0).
        assert_eq!(p.screen_to_map(ScreenPosition::new(-1.0, 0.0)), MapPosition::new(-1, 0));
        // Slightly right of the origin on the first row of cell (0, -1).
        assert_eq!(p.screen_to_map(ScreenPosition::new(1.0, 0.0)), MapPosition::new(0, -1));
        // Inside the first cell.
        assert_eq!(p.screen_to_map(ScreenPosition::new(0.0, 1.0)), MapPosition::new(0, 0));
    }

    #[test]
    fn test_is_on_map_boundaries() {
        let map = Size::new(14, 14);
        assert!(is_on_map(MapPosition::new(0, 0), map));
        assert!(is_on_map(MapPosition::new(13, 13), map));
        assert!(!is_on_map(MapPosition::new(14, 0), map));
        assert!(!is_on_map(MapPosition::new(0, 14), map));
        assert!(!is_on_map(MapPosition::new(-1, 5), map));
        assert!(!is_on_map(MapPosition::new(5, -1), map));
        assert!(!is_on_map(MapPosition::new(0, 0), Size::new(0, 0)));
    }

    #[test]
    fn test_round_trip_fractional_origin() {
        for (ox, oy) in [(100.3, 17.7), (0.1, 0.2), (512.7, 32.3)] {
            let p = projection(ox, oy);
            for x in 0..14 {
                for y in 0..14 {
                    let pos = MapPosition::new(x, y);
                    assert_eq!(p.screen_to_map(p.map_to_screen(pos)), pos, "origin ({}, {})", ox, oy);
                }
            }
        }
    }

    #[test]
    fn test_snap_keeps_floor_away_from_integers() {
        let p = projection(0.0, 0.0);
        // y + x = -1e-6: well outside the snap tolerance.
        assert_eq!(p.screen_to_map(ScreenPosition::new(0.0, -32.0e-6)), MapPosition::new(-1, -1));
        // One ulp-scale error below the anchor still lands on the anchor's cell.
        assert_eq!(p.screen_to_map(ScreenPosition::new(0.0, -1e-12)), MapPosition::new(0, 0));
    }

    #[test]
    fn test_pick_at_drawn_tile_centre() {
        let map = Size::new(14, 14);
        for (ox, oy) in [(0.0, 0.0), (512.0, 32.0), (100.3, 17.7)] {
            let p = projection(ox, oy);
            for (x, y) in [(0, 0), (3, 4), (13, 0), (0, 13), (13, 13)] {
                let pos = MapPosition::new(x, y);
                let centre = p.tile_vertex(p.map_to_screen(pos)).center();
                assert_eq!(p.pick(centre, map), Some(pos));
            }
        }
    }

    #[test]
    fn test_pick_follows_drawn_outline() {
        let p = projection(0.0, 0.0);
        let map = Size::new(14, 14);
        // Drawn tile (0, 0): top (-32, 0), left (-64, 16), bottom (-32, 32), right (0, 16).
        assert_eq!(p.pick(ScreenPosition::new(-60.0, 16.0), map), Some(MapPosition::new(0, 0)));
        assert_eq!(p.pick(ScreenPosition::new(-2.0, 16.0), map), Some(MapPosition::new(0, 0)));
        // Just right of the drawn tile is cell (1, 0), whose centre is (0, 32).
        assert_eq!(p.pick(ScreenPosition::new(2.0, 20.0), map), Some(MapPosition::new(1, 0)));
        // Above the drawn top vertex is off the map.
        assert_eq!(p.pick(ScreenPosition::new(-32.0, -1.0), map), None);
        let outside = p.tile_vertex(p.map_to_screen(MapPosition::new(14, 0))).center();
        assert_eq!(p.pick(outside, map), None);
        assert_eq!(p.tile_at(outside), MapPosition::new(14, 0));
    }

    #[test]
    fn test_tile_vertex() {
        let p = projection(0.0, 0.0);
        let v = p.tile_vertex(ScreenPosition::new(100.0, 50.0));
        assert_close(v.top, 68.0, 50.0);
        assert_close(v.left, 36.0, 66.0);
        assert_close(v.bottom, 68.0, 82.0);
        assert_close(v.right, 100.0, 66.0);
    }

    #[test]
    fn test_tile_rect() {
        let p = projection(0.0, 0.0);
        let r = p.tile_rect(ScreenPosition::new(100.0, 50.0));
        assert_close(r.top_right, 100.0, 50.0);
        assert_close(r.top_left, 36.0, 50.0);
        assert_close(r.bottom_right, 100.0, 82.0);
        assert_close(r.bottom_left, 36.0, 82.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", MapPosition::new(3, -1)), "3,-1");
        assert_eq!(format!("{}", Size::new(14, 14)), "14x14");
    }
}
