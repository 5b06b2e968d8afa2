//! Painter's-algorithm ordering: entities further up the screen are drawn
//! first so nearer ones paint over them.

use core::cmp::Ordering;

use isomap_geometry::ScreenPosition;

use crate::entity::Entity;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How entities on the same screen row are ordered.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Left to right.
    Ascending,
    /// Right to left.
    #[default]
    Descending,
}

/// Compares two screen anchors for drawing order: `y` ascending, then `x` by
/// `tie_break`.
pub fn depth_order(a: ScreenPosition, b: ScreenPosition, tie_break: TieBreak) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| match tie_break {
        TieBreak::Ascending => a.x.total_cmp(&b.x),
        TieBreak::Descending => b.x.total_cmp(&a.x),
    })
}

/// Sorts `entities` back-to-front in place.
///
/// The sort is stable, so entities with identical anchors keep their
/// insertion order and re-sorting unchanged input is a no-op.
pub fn sort_by_depth(entities: &mut [Entity], tie_break: TieBreak) {
    entities.sort_by(|a, b| depth_order(a.screen_pos, b.screen_pos, tie_break));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, EntityKind};

    fn entity(id: u32, x: f64, y: f64) -> Entity {
        Entity { id: EntityId(id), screen_pos: ScreenPosition::new(x, y), kind: EntityKind::Prism }
    }

    fn ids(entities: &[Entity]) -> Vec<u32> {
        entities.iter().map(|e| e.id.0).collect()
    }

    #[test]
    fn test_y_is_primary_key() {
        let a = ScreenPosition::new(100.0, 10.0);
        let b = ScreenPosition::new(0.0, 20.0);
        for tie in [TieBreak::Ascending, TieBreak::Descending] {
            assert_eq!(depth_order(a, b, tie), Ordering::Less);
            assert_eq!(depth_order(b, a, tie), Ordering::Greater);
        }
    }

    #[test]
    fn test_tie_break_policies() {
        let left = ScreenPosition::new(0.0, 10.0);
        let right = ScreenPosition::new(50.0, 10.0);
        assert_eq!(depth_order(left, right, TieBreak::Ascending), Ordering::Less);
        assert_eq!(depth_order(left, right, TieBreak::Descending), Ordering::Greater);
        assert_eq!(depth_order(left, left, TieBreak::Descending), Ordering::Equal);
    }

    #[test]
    fn test_sort_back_to_front() {
        let mut layer = vec![entity(1, 0.0, 64.0), entity(2, 32.0, 16.0), entity(3, -32.0, 16.0), entity(4, 0.0, 0.0)];
        sort_by_depth(&mut layer, TieBreak::Ascending);
        assert_eq!(ids(&layer), vec![4, 3, 2, 1]);
        sort_by_depth(&mut layer, TieBreak::Descending);
        assert_eq!(ids(&layer), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_sort_is_idempotent_and_stable() {
        let mut layer = vec![entity(1, 10.0, 5.0), entity(2, 10.0, 5.0), entity(3, 0.0, 1.0), entity(4, 10.0, 5.0)];
        sort_by_depth(&mut layer, TieBreak::Descending);
        let first = ids(&layer);
        assert_eq!(first, vec![3, 1, 2, 4]);
        for _ in 0..3 {
            sort_by_depth(&mut layer, TieBreak::Descending);
            assert_eq!(ids(&layer), first);
        }
    }
}
