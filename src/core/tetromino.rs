//! Tetromino module - falling pieces built from numbered tiles
//!
//! Each piece is four tiles at absolute grid coordinates. Shapes are given
//! as offsets from the piece's bottom-left corner with y growing upward.
//! There is no rotation: the hybrid rules only use I, O and Z.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::core::tile::{Position, Tile};
use crate::types::{PieceKind, SPAWN_VALUES};

/// Cell offset from the piece's bottom-left corner
pub type ShapeOffset = (i32, i32);

/// Shape of a piece kind as four cell offsets
pub fn shape_offsets(kind: PieceKind) -> &'static [ShapeOffset; 4] {
    match kind {
        // I: ####
        PieceKind::I => &[(0, 0), (1, 0), (2, 0), (3, 0)],
        // O: ##
        //    ##
        PieceKind::O => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        // Z: ##.
        //    .##
        PieceKind::Z => &[(0, 1), (1, 1), (1, 0), (2, 0)],
    }
}

/// Width of a shape's bounding box in cells
pub fn shape_width(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        PieceKind::Z => 3,
    }
}

/// Height of a shape's bounding box in cells
pub fn shape_height(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::I => 1,
        PieceKind::O => 2,
        PieceKind::Z => 2,
    }
}

/// A falling piece: four numbered tiles moving as one rigid unit.
/// The tiles live outside the board until the piece lands.
#[derive(Debug, Clone)]
pub struct Tetromino {
    kind: PieceKind,
    tiles: ArrayVec<Tile, 4>,
}

impl Tetromino {
    /// Spawn a piece of the given kind fully inside the top of the board,
    /// at a random horizontal offset and with random tile values.
    pub fn spawn(kind: PieceKind, board: &Board, rng: &mut SimpleRng) -> Self {
        let max_x = board.width() as i32 - shape_width(kind);
        let origin_x = if max_x > 0 {
            rng.next_range(max_x as u32 + 1) as i32
        } else {
            0
        };
        let origin_y = board.height() as i32 - shape_height(kind);

        let mut tiles = ArrayVec::new();
        for &(dx, dy) in shape_offsets(kind) {
            let value = SPAWN_VALUES[rng.next_range(SPAWN_VALUES.len() as u32) as usize];
            tiles.push(Tile::new(value, Position::new(origin_x + dx, origin_y + dy)));
        }

        Self { kind, tiles }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check whether the piece could move by (dx, dy) on the given board
    pub fn can_shift(&self, dx: i32, dy: i32, board: &Board) -> bool {
        self.tiles.iter().all(|tile| {
            let target = tile.position().translated(dx, dy);
            board.is_inside(target.y, target.x) && !board.is_occupied(target.y, target.x)
        })
    }

    /// Validate then commit a move. Returns false and leaves the piece
    /// unchanged when any target cell is outside the board or occupied.
    pub fn try_shift(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        if !self.can_shift(dx, dy, board) {
            return false;
        }
        for tile in &mut self.tiles {
            tile.translate(dx, dy);
        }
        true
    }

    /// How many cells the piece can still fall, for the ghost preview
    pub fn drop_distance(&self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.can_shift(0, -(distance + 1), board) {
            distance += 1;
        }
        distance
    }

    /// Columns the piece currently occupies, sorted and deduplicated
    pub fn occupied_columns(&self) -> ArrayVec<usize, 4> {
        let mut columns = ArrayVec::new();
        for tile in &self.tiles {
            let col = tile.position().x as usize;
            if !columns.contains(&col) {
                columns.push(col);
            }
        }
        columns.sort_unstable();
        columns
    }

    /// Rows the piece currently occupies, sorted and deduplicated
    pub fn occupied_rows(&self) -> ArrayVec<usize, 4> {
        let mut rows = ArrayVec::new();
        for tile in &self.tiles {
            let row = tile.position().y as usize;
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        rows.sort_unstable();
        rows
    }

    /// Hand the tiles over for placement on the board
    pub fn into_tiles(self) -> ArrayVec<Tile, 4> {
        self.tiles
    }
}
