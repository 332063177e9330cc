//! Tile module - numbered tiles and their grid positions

/// Grid coordinates of a tile. `x` is the column, `y` is the row,
/// with row 0 at the bottom of the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This position moved by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A numbered tile. The value is a power of two and only changes when
/// two tiles merge; the position always names the cell the tile sits in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    value: u32,
    position: Position,
}

impl Tile {
    pub fn new(value: u32, position: Position) -> Self {
        Self { value, position }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Double the value (the merge rule). Returns the new value.
    pub fn double(&mut self) -> u32 {
        self.value *= 2;
        self.value
    }

    /// Move the tile by (dx, dy)
    pub(crate) fn translate(&mut self, dx: i32, dy: i32) {
        self.position = self.position.translated(dx, dy);
    }

    /// Reposition the tile to an exact cell
    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = position;
    }
}
