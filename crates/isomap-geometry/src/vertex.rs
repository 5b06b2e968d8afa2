//! Tile outline geometry: the rhombus vertices, the bounding rect and the
//! edges between vertices.

use libm::{fabs, fmax, fmin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Direction, ScreenPosition};

/// Distance (pixels) under which two points or lines are treated as touching.
const TOLERANCE: f64 = 1e-6;

/// The four corners of a rhombus tile outline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TileVertex {
    /// Top corner.
    pub top: ScreenPosition,
    /// Left corner.
    pub left: ScreenPosition,
    /// Right corner.
    pub right: ScreenPosition,
    /// Bottom corner.
    pub bottom: ScreenPosition,
}

impl TileVertex {
    /// Corners in outline order: top, left, bottom, right.
    pub const fn outline(&self) -> [ScreenPosition; 4] {
        [self.top, self.left, self.bottom, self.right]
    }

    /// Centre of the rhombus.
    pub const fn center(&self) -> ScreenPosition {
        ScreenPosition::new(self.top.x, self.left.y)
    }

    /// The edge of the rhombus facing `direction`.
    ///
    /// | direction | edge |
    /// |-----------|------|
    /// | south-east | right -> bottom |
    /// | south-west | left -> bottom |
    /// | north-east | top -> right |
    /// | north-west | top -> left |
    pub const fn edge(&self, direction: Direction) -> Edge {
        match direction {
            Direction::SouthEast => Edge::new(self.right, self.bottom),
            Direction::SouthWest => Edge::new(self.left, self.bottom),
            Direction::NorthEast => Edge::new(self.top, self.right),
            Direction::NorthWest => Edge::new(self.top, self.left),
        }
    }

    /// Returns `true` if `point` lies inside the rhombus or on its outline.
    pub fn contains(&self, point: ScreenPosition) -> bool {
        let center = self.center();
        let half_width = self.top.x - self.left.x;
        let half_height = self.left.y - self.top.y;
        if half_width <= 0.0 || half_height <= 0.0 {
            return false;
        }
        let dx = fabs(point.x - center.x) / half_width;
        let dy = fabs(point.y - center.y) / half_height;
        dx + dy <= 1.0 + TOLERANCE
    }
}

/// Axis-aligned bounding rect of a tile, used to anchor images.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TileRect {
    /// Top-right corner; this is the tile's screen anchor.
    pub top_right: ScreenPosition,
    /// Top-left corner.
    pub top_left: ScreenPosition,
    /// Bottom-right corner.
    pub bottom_right: ScreenPosition,
    /// Bottom-left corner.
    pub bottom_left: ScreenPosition,
}

impl TileRect {
    /// Rect width in pixels.
    pub fn width(&self) -> f64 {
        self.top_right.x - self.top_left.x
    }

    /// Rect height in pixels.
    pub fn height(&self) -> f64 {
        self.bottom_left.y - self.top_left.y
    }
}

/// A straight segment between two outline vertices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Start vertex.
    pub from: ScreenPosition,
    /// End vertex.
    pub to: ScreenPosition,
}

impl Edge {
    /// Construct a new edge.
    pub const fn new(from: ScreenPosition, to: ScreenPosition) -> Self {
        Edge { from, to }
    }

    /// Segment length in pixels.
    pub fn length(&self) -> f64 {
        let dx = self.to.x - self.from.x;
        let dy = self.to.y - self.from.y;
        sqrt(dx * dx + dy * dy)
    }

    /// Returns `true` if both segments lie on the same line and share a
    /// stretch of positive length.
    ///
    /// Segments that only touch at an endpoint, or that cross at an angle, do
    /// not overlap.
    pub fn overlaps(&self, other: &Edge) -> bool {
        let len = self.length();
        if len < TOLERANCE {
            return false;
        }
        let dx = (self.to.x - self.from.x) / len;
        let dy = (self.to.y - self.from.y) / len;

        // Perpendicular distance of `other`'s endpoints from this line.
        let off_line = |p: ScreenPosition| fabs(dx * (p.y - self.from.y) - dy * (p.x - self.from.x));
        if off_line(other.from) > TOLERANCE || off_line(other.to) > TOLERANCE {
            return false;
        }

        // Project onto the line; this segment spans [0, len].
        let along = |p: ScreenPosition| dx * (p.x - self.from.x) + dy * (p.y - self.from.y);
        let (a, b) = (along(other.from), along(other.to));
        let shared = fmin(fmax(a, b), len) - fmax(fmin(a, b), 0.0);
        shared > TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IsoProjection, MapPosition, Size};

    fn projection() -> IsoProjection {
        IsoProjection::new(Size::new(64, 32), ScreenPosition::new(0.0, 0.0)).unwrap()
    }

    #[test]
    fn test_edges_follow_direction() {
        let v = projection().tile_vertex(ScreenPosition::new(64.0, 0.0));
        assert_eq!(v.edge(Direction::SouthEast), Edge::new(v.right, v.bottom));
        assert_eq!(v.edge(Direction::SouthWest), Edge::new(v.left, v.bottom));
        assert_eq!(v.edge(Direction::NorthEast), Edge::new(v.top, v.right));
        assert_eq!(v.edge(Direction::NorthWest), Edge::new(v.top, v.left));
    }

    #[test]
    fn test_contains() {
        let v = projection().tile_vertex(ScreenPosition::new(64.0, 0.0));
        assert!(v.contains(v.center()));
        for corner in v.outline() {
            assert!(v.contains(corner));
        }
        // Bounding rect corners are outside the rhombus.
        assert!(!v.contains(ScreenPosition::new(64.0, 0.0)));
        assert!(!v.contains(ScreenPosition::new(0.0, 32.0)));
        assert!(!v.contains(ScreenPosition::new(200.0, 16.0)));
    }

    #[test]
    fn test_identical_edges_overlap() {
        let v = projection().tile_vertex(ScreenPosition::new(64.0, 0.0));
        let e = v.edge(Direction::SouthEast);
        assert!(e.overlaps(&e));
        // Direction of travel along the segment does not matter.
        assert!(e.overlaps(&Edge::new(e.to, e.from)));
    }

    #[test]
    fn test_partial_overlap() {
        let e = Edge::new(ScreenPosition::new(0.0, 0.0), ScreenPosition::new(32.0, 16.0));
        let shifted = Edge::new(ScreenPosition::new(16.0, 8.0), ScreenPosition::new(48.0, 24.0));
        assert!(e.overlaps(&shifted));
        assert!(shifted.overlaps(&e));
    }

    #[test]
    fn test_touching_and_parallel_edges_do_not_overlap() {
        let p = projection();
        let here = p.tile_vertex(p.map_to_screen(MapPosition::new(2, 2)));
        // South-west neighbour shares only one endpoint of the south-east edge line.
        let along = p.tile_vertex(p.map_to_screen(MapPosition::new(2, 3)));
        assert!(!here.edge(Direction::SouthEast).overlaps(&along.edge(Direction::SouthEast)));
        // South-east neighbour has a parallel but offset south-east edge.
        let beside = p.tile_vertex(p.map_to_screen(MapPosition::new(3, 2)));
        assert!(!here.edge(Direction::SouthEast).overlaps(&beside.edge(Direction::SouthEast)));
    }

    #[test]
    fn test_crossing_edges_do_not_overlap() {
        let a = Edge::new(ScreenPosition::new(0.0, 0.0), ScreenPosition::new(10.0, 10.0));
        let b = Edge::new(ScreenPosition::new(0.0, 10.0), ScreenPosition::new(10.0, 0.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_degenerate_edge() {
        let point = ScreenPosition::new(3.0, 4.0);
        let e = Edge::new(point, point);
        assert!(!e.overlaps(&e));
    }

    #[test]
    fn test_rect_dimensions() {
        let r = projection().tile_rect(ScreenPosition::new(64.0, 0.0));
        assert!((r.width() - 64.0).abs() < 1e-9);
        assert!((r.height() - 32.0).abs() < 1e-9);
    }
}
