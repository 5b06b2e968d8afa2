//! Scene state: the tile grid plus the ordered entity layers drawn on top.
//!
//! The scene is plain data owned by the application and handed to the
//! renderer by reference each frame.

use isomap_geometry::{Direction, MapPosition, ScreenPosition};
use tracing::{debug, info};

use crate::collision;
use crate::depth::{TieBreak, sort_by_depth};
use crate::entity::{Entity, EntityId, EntityKind, Person, Tile};
use crate::map::TileMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entity layers above the tile grid, in drawing order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Static objects: prisms and images.
    Props = 0,
    /// Moving characters.
    Actors = 1,
}

impl Layer {
    /// All layers, back to front.
    pub const ALL: [Layer; 2] = [Layer::Props, Layer::Actors];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Everything drawn in a frame.
#[derive(Debug, Clone)]
pub struct Scene {
    map: TileMap,
    tiles: Vec<Tile>,
    layers: [Vec<Entity>; 2],
    tie_break: TieBreak,
    highlighted: Option<usize>,
    next_id: u32,
}

impl Scene {
    /// An empty scene over `map`; call [`Scene::add_tiles`] to lay the floor.
    pub fn new(map: TileMap) -> Self {
        Scene {
            map,
            tiles: Vec::new(),
            layers: [Vec::new(), Vec::new()],
            tie_break: TieBreak::default(),
            highlighted: None,
            next_id: 0,
        }
    }

    /// Use `tie_break` for entities on the same screen row.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.set_tie_break(tie_break);
        self
    }

    /// Map parameters.
    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Mutable map parameters (e.g. to recolour the floor).
    pub fn map_mut(&mut self) -> &mut TileMap {
        &mut self.map
    }

    /// Current row tie-break policy.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Changes the row tie-break policy and re-sorts all layers.
    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
        self.sort_layers();
    }

    /// Fills the tile layer with one tile per map cell, replacing any
    /// existing tiles.
    pub fn add_tiles(&mut self) {
        let size = self.map.map_size();
        self.tiles.clear();
        self.highlighted = None;
        for x in 0..size.width as i32 {
            for y in 0..size.height as i32 {
                let map_pos = MapPosition::new(x, y);
                self.tiles.push(Tile { map_pos, screen_pos: self.map.map_to_screen(map_pos), highlight: false });
            }
        }
        info!(tiles = self.tiles.len(), map_size = %size, "Tile layer created");
    }

    /// All floor tiles.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn tile_index(&self, pos: MapPosition) -> Option<usize> {
        if !self.map.is_on_map(pos) {
            return None;
        }
        let height = self.map.map_size().height as usize;
        let index = pos.x as usize * height + pos.y as usize;
        (index < self.tiles.len()).then_some(index)
    }

    /// The floor tile at `pos`, if the tile layer has been created.
    pub fn tile(&self, pos: MapPosition) -> Option<&Tile> {
        self.tile_index(pos).map(|i| &self.tiles[i])
    }

    /// Moves the highlight to the tile at `pos`, clearing the previous one.
    ///
    /// Returns `false` (and leaves the current highlight alone) when `pos` is
    /// `None` or has no tile.
    pub fn highlight(&mut self, pos: Option<MapPosition>) -> bool {
        let Some(index) = pos.and_then(|p| self.tile_index(p)) else {
            return false;
        };
        if let Some(last) = self.highlighted.take() {
            self.tiles[last].highlight = false;
        }
        self.tiles[index].highlight = true;
        self.highlighted = Some(index);
        true
    }

    /// The highlighted tile, if any.
    pub fn highlighted(&self) -> Option<&Tile> {
        self.highlighted.map(|i| &self.tiles[i])
    }

    /// Entities of `layer` in drawing order.
    pub fn layer(&self, layer: Layer) -> &[Entity] {
        &self.layers[layer.index()]
    }

    /// Looks up an entity in any layer.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.layers.iter().flatten().find(|e| e.id == id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.layers.iter_mut().flatten().find(|e| e.id == id)
    }

    /// Adds an entity anchored at `screen_pos` to `layer`.
    ///
    /// Returns `None` if the anchor does not fall on a map cell.
    pub fn add_entity(&mut self, kind: EntityKind, screen_pos: ScreenPosition, layer: Layer) -> Option<EntityId> {
        let cell = self.map.screen_to_map(screen_pos);
        self.insert_entity(kind, screen_pos, cell, layer)
    }

    /// Places `kind` on the tile at `cell`, anchored at its screen position.
    fn add_on_tile(&mut self, kind: EntityKind, cell: MapPosition, layer: Layer) -> Option<EntityId> {
        let screen_pos = self.map.map_to_screen(cell);
        self.insert_entity(kind, screen_pos, cell, layer)
    }

    fn insert_entity(
        &mut self,
        kind: EntityKind,
        screen_pos: ScreenPosition,
        cell: MapPosition,
        layer: Layer,
    ) -> Option<EntityId> {
        if !self.map.is_on_map(cell) {
            debug!(kind = kind.label(), %cell, "Rejected off-map entity");
            return None;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        debug!(%id, kind = kind.label(), %cell, ?layer, "Entity added");
        self.layers[layer.index()].push(Entity { id, screen_pos, kind });
        self.sort_layer(layer);
        Some(id)
    }

    /// Drops a prism on the props layer at `pos`.
    pub fn place_prism(&mut self, pos: MapPosition) -> Option<EntityId> {
        self.add_on_tile(EntityKind::Prism, pos, Layer::Props)
    }

    /// Places the cached image `basename` on the tile at `pos`.
    pub fn place_image(&mut self, basename: &str, pos: MapPosition, scaled: bool, layer: Layer) -> Option<EntityId> {
        let kind = EntityKind::Image { basename: basename.to_string(), scaled };
        self.add_on_tile(kind, pos, layer)
    }

    /// Puts `person` on the actors layer at its map position.
    pub fn spawn_person(&mut self, person: Person) -> Option<EntityId> {
        let pos = person.map_pos();
        self.add_on_tile(EntityKind::Person(person), pos, Layer::Actors)
    }

    /// Re-anchors an entity at an arbitrary screen position, e.g. an image
    /// following the pointer. No bounds check is applied.
    pub fn move_entity(&mut self, id: EntityId, screen_pos: ScreenPosition) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            return false;
        };
        entity.screen_pos = screen_pos;
        self.sort_layers();
        true
    }

    /// Sets or clears the direction a person will step in on each update.
    ///
    /// Returns `false` if `id` is not a person.
    pub fn steer(&mut self, id: EntityId, direction: Option<Direction>) -> bool {
        match self.entity_mut(id).and_then(Entity::as_person_mut) {
            Some(person) => {
                person.set_pending(direction);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if any entity other than `mover` blocks a move onto
    /// `destination` heading in `direction`.
    pub fn is_occupied(&self, mover: Option<EntityId>, destination: MapPosition, direction: Direction) -> bool {
        self.layers
            .iter()
            .any(|layer| collision::is_occupied(self.map.projection(), layer, mover, destination, direction))
    }

    /// Advances the scene one step.
    ///
    /// Every person with a pending direction turns to face it and steps one
    /// tile unless the destination is off the map or occupied. Screen
    /// positions are then recomputed from map positions and every layer is
    /// re-sorted. Returns the number of persons that moved.
    pub fn update(&mut self) -> usize {
        let walkers: Vec<(usize, usize, EntityId, MapPosition, Direction)> = self
            .layers
            .iter()
            .enumerate()
            .flat_map(|(l, layer)| layer.iter().enumerate().map(move |(i, e)| (l, i, e)))
            .filter_map(|(l, i, e)| {
                let person = e.as_person()?;
                Some((l, i, e.id, person.map_pos(), person.pending()?))
            })
            .collect();

        let mut moved = 0;
        for (l, i, id, from, direction) in walkers {
            let destination = direction.step(from);
            let allowed = if !self.map.is_on_map(destination) {
                debug!(%id, %destination, "Move rejected: off map");
                false
            } else if self.is_occupied(Some(id), destination, direction) {
                debug!(%id, %destination, "Move rejected: occupied");
                false
            } else {
                true
            };

            let entity = &mut self.layers[l][i];
            let Some(person) = entity.as_person_mut() else {
                continue;
            };
            person.face(direction);
            if allowed {
                person.set_map_pos(destination);
                moved += 1;
            }
            let map_pos = person.map_pos();
            entity.screen_pos = self.map.map_to_screen(map_pos);
        }

        self.sort_layers();
        moved
    }

    /// Re-sorts one layer back to front.
    pub fn sort_layer(&mut self, layer: Layer) {
        sort_by_depth(&mut self.layers[layer.index()], self.tie_break);
    }

    /// Re-sorts every layer back to front.
    pub fn sort_layers(&mut self) {
        for layer in Layer::ALL {
            self.sort_layer(layer);
        }
    }
}
