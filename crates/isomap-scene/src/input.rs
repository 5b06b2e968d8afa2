//! Keyboard and pointer state independent of any windowing backend.

use isomap_geometry::{Direction, ScreenPosition};

use crate::surface::Rect;

/// Up/down state of one key with edge detection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    is_down: bool,
}

impl KeyState {
    /// Returns `true` while the key is held.
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Records a key-down event. Returns `true` only on the up -> down
    /// transition, so auto-repeat does not fire twice.
    pub fn press(&mut self) -> bool {
        let fired = !self.is_down;
        self.is_down = true;
        fired
    }

    /// Records a key-up event. Returns `true` only on the down -> up
    /// transition.
    pub fn release(&mut self) -> bool {
        let fired = self.is_down;
        self.is_down = false;
        fired
    }
}

/// The four arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    /// Left arrow.
    Left,
    /// Up arrow.
    Up,
    /// Right arrow.
    Right,
    /// Down arrow.
    Down,
}

impl ArrowKey {
    /// All arrow keys.
    pub const ALL: [ArrowKey; 4] = [ArrowKey::Left, ArrowKey::Up, ArrowKey::Right, ArrowKey::Down];

    /// The map direction this key walks in.
    pub const fn direction(self) -> Direction {
        match self {
            ArrowKey::Left => Direction::SouthWest,
            ArrowKey::Right => Direction::NorthEast,
            ArrowKey::Up => Direction::NorthWest,
            ArrowKey::Down => Direction::SouthEast,
        }
    }

    const fn index(self) -> usize {
        match self {
            ArrowKey::Left => 0,
            ArrowKey::Up => 1,
            ArrowKey::Right => 2,
            ArrowKey::Down => 3,
        }
    }
}

/// Turns arrow key events into a walking direction.
///
/// Pressing an arrow sets the direction; releasing any arrow clears it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalInput {
    keys: [KeyState; 4],
    current: Option<Direction>,
}

impl DirectionalInput {
    /// Handles a key-down event. Returns the new direction when it changed.
    pub fn key_down(&mut self, key: ArrowKey) -> Option<Direction> {
        if self.keys[key.index()].press() {
            self.current = Some(key.direction());
            return self.current;
        }
        None
    }

    /// Handles a key-up event. Returns `true` when the direction was cleared.
    pub fn key_up(&mut self, key: ArrowKey) -> bool {
        if self.keys[key.index()].release() {
            self.current = None;
            return true;
        }
        false
    }

    /// Current walking direction.
    pub fn current(&self) -> Option<Direction> {
        self.current
    }

    /// Returns `true` while `key` is held.
    pub fn is_down(&self, key: ArrowKey) -> bool {
        self.keys[key.index()].is_down()
    }
}

/// Pointer position relative to the top-left of `bounds`, the target
/// element's bounding box in window coordinates.
pub fn pointer_position(client: ScreenPosition, bounds: Rect) -> ScreenPosition {
    ScreenPosition::new(client.x - bounds.x, client.y - bounds.y)
}
