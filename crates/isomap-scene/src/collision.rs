//! Directional collision check for one-tile moves.
//!
//! A move in some direction is blocked when another entity's tile edge facing
//! that direction lies along the destination tile's facing edge.

use isomap_geometry::{Direction, Edge, IsoProjection, MapPosition};
use tracing::trace;

use crate::entity::{Entity, EntityId};

fn facing_edge(projection: &IsoProjection, entity: &Entity, direction: Direction) -> Edge {
    projection.tile_vertex(entity.screen_pos).edge(direction)
}

/// Returns `true` if `occupant` blocks a move onto `destination` heading in
/// `direction`.
pub fn blocks(projection: &IsoProjection, occupant: &Entity, destination: MapPosition, direction: Direction) -> bool {
    let target = projection.tile_vertex(projection.map_to_screen(destination)).edge(direction);
    facing_edge(projection, occupant, direction).overlaps(&target)
}

/// Linear scan of `layer` for an entity other than `mover` that occupies
/// `destination` as seen when arriving from `direction`.
pub fn is_occupied(
    projection: &IsoProjection,
    layer: &[Entity],
    mover: Option<EntityId>,
    destination: MapPosition,
    direction: Direction,
) -> bool {
    let hit = layer
        .iter()
        .filter(|e| Some(e.id) != mover)
        .find(|e| blocks(projection, e, destination, direction));
    if let Some(e) = hit {
        trace!(occupant = %e.id, kind = e.kind.label(), %destination, %direction, "Destination occupied");
    }
    hit.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use isomap_geometry::{ScreenPosition, Size};

    fn projection() -> IsoProjection {
        IsoProjection::new(Size::new(64, 32), ScreenPosition::new(512.0, 32.0)).unwrap()
    }

    fn prism_at(p: &IsoProjection, id: u32, pos: MapPosition) -> Entity {
        Entity { id: EntityId(id), screen_pos: p.map_to_screen(pos), kind: EntityKind::Prism }
    }

    #[test]
    fn test_empty_destination_is_free() {
        let p = projection();
        for dir in Direction::ALL {
            assert!(!is_occupied(&p, &[], None, MapPosition::new(3, 3), dir));
        }
        let layer = [prism_at(&p, 1, MapPosition::new(8, 8))];
        for dir in Direction::ALL {
            assert!(!is_occupied(&p, &layer, None, MapPosition::new(3, 3), dir));
        }
    }

    #[test]
    fn test_occupied_destination_blocks_every_direction() {
        let p = projection();
        let layer = [prism_at(&p, 1, MapPosition::new(3, 3))];
        for dir in Direction::ALL {
            assert!(is_occupied(&p, &layer, None, MapPosition::new(3, 3), dir));
            assert!(blocks(&p, &layer[0], MapPosition::new(3, 3), dir));
        }
    }

    #[test]
    fn test_neighbours_do_not_block() {
        let p = projection();
        let dest = MapPosition::new(4, 4);
        let layer: Vec<Entity> = Direction::ALL
            .iter()
            .enumerate()
            .map(|(i, dir)| prism_at(&p, i as u32, dir.step(dest)))
            .collect();
        for dir in Direction::ALL {
            assert!(!is_occupied(&p, &layer, None, dest, dir));
        }
    }

    #[test]
    fn test_mover_is_ignored() {
        let p = projection();
        let layer = [prism_at(&p, 7, MapPosition::new(2, 2))];
        assert!(!is_occupied(&p, &layer, Some(EntityId(7)), MapPosition::new(2, 2), Direction::SouthEast));
        assert!(is_occupied(&p, &layer, Some(EntityId(8)), MapPosition::new(2, 2), Direction::SouthEast));
    }

    #[test]
    fn test_free_placed_entity_sliding_along_edge_blocks() {
        let p = projection();
        let dest = MapPosition::new(5, 5);
        // Shift a quarter tile along the south-east edge direction (-w/2, +h/2).
        let anchor = p.map_to_screen(dest).offset(-16.0, 8.0);
        let layer = [Entity { id: EntityId(1), screen_pos: anchor, kind: EntityKind::image("wall-low") }];
        assert!(is_occupied(&p, &layer, None, dest, Direction::SouthEast));
        // The same shift is off the line of the south-west edge.
        assert!(!is_occupied(&p, &layer, None, dest, Direction::SouthWest));
    }
}
