//! Things placed on the map: the tile grid and the drawable, orderable
//! entities stacked on top of it.

use core::fmt;

use isomap_geometry::{Direction, MapPosition, ScreenPosition};

/// Sprite prefix used for persons unless overridden.
pub const DEFAULT_PERSON_SPRITE: &str = "man";

/// Stable handle to an entity in a [`crate::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single floor tile of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Grid cell of the tile.
    pub map_pos: MapPosition,
    /// Screen anchor of the tile.
    pub screen_pos: ScreenPosition,
    /// Hovered tiles are stroked with the highlight colour.
    pub highlight: bool,
}

/// A character that walks tile by tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    map_pos: MapPosition,
    facing: Direction,
    pending: Option<Direction>,
    sprite_prefix: String,
}

impl Person {
    /// A person standing on `map_pos`, facing south-east.
    pub fn new(map_pos: MapPosition) -> Self {
        Person {
            map_pos,
            facing: Direction::SouthEast,
            pending: None,
            sprite_prefix: DEFAULT_PERSON_SPRITE.to_string(),
        }
    }

    /// Use `<prefix>-<dir>` images instead of the default sprite set.
    pub fn with_sprite_prefix(mut self, prefix: &str) -> Self {
        self.sprite_prefix = prefix.to_string();
        self
    }

    /// Current grid cell.
    pub fn map_pos(&self) -> MapPosition {
        self.map_pos
    }

    /// Direction the person is looking in.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Direction the person will try to step in on the next update.
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Basename of the image for the current facing, e.g. `man-se`.
    pub fn sprite(&self) -> String {
        format!("{}-{}", self.sprite_prefix, self.facing.code())
    }

    pub(crate) fn set_pending(&mut self, direction: Option<Direction>) {
        self.pending = direction;
    }

    pub(crate) fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    pub(crate) fn set_map_pos(&mut self, map_pos: MapPosition) {
        self.map_pos = map_pos;
    }
}

/// What an entity is and how it gets drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A solid block filling one tile.
    Prism,
    /// A cached image drawn on the tile, by basename.
    Image {
        /// Image cache key.
        basename: String,
        /// Shrink the image to fit inside the tile rect.
        scaled: bool,
    },
    /// A walking character.
    Person(Person),
}

impl EntityKind {
    /// An unscaled image entity.
    pub fn image(basename: &str) -> Self {
        EntityKind::Image { basename: basename.to_string(), scaled: false }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Prism => "prism",
            EntityKind::Image { .. } => "image",
            EntityKind::Person(_) => "person",
        }
    }
}

/// A drawable, depth-ordered object in one of the scene layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) screen_pos: ScreenPosition,
    pub(crate) kind: EntityKind,
}

impl Entity {
    /// Scene handle.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Screen anchor; the depth sort key.
    pub fn screen_pos(&self) -> ScreenPosition {
        self.screen_pos
    }

    /// Entity variant.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// The person data, if this entity is a person.
    pub fn as_person(&self) -> Option<&Person> {
        match &self.kind {
            EntityKind::Person(p) => Some(p),
            _ => None,
        }
    }

    pub(crate) fn as_person_mut(&mut self) -> Option<&mut Person> {
        match &mut self.kind {
            EntityKind::Person(p) => Some(p),
            _ => None,
        }
    }
}
