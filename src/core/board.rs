//! Board module - manages the merge grid
//!
//! The grid is a height x width field of numbered tiles. Storage is a flat
//! vector in row-major order with row 0 at the BOTTOM, so y grows upward.
//! Every stored tile records the cell it sits in; all mutation paths keep
//! that recorded position in step with the cell index.
//!
//! Placement never rolls back: tiles that fall outside the grid or on top
//! of an existing tile are reported through the game-over flag while the
//! rest of the batch still lands.

use crate::core::tile::{Position, Tile};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// The merge grid with its running score
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    height: usize,
    width: usize,
    /// Flat cells, row-major order (row * width + col), row 0 at the bottom
    cells: Vec<Option<Tile>>,
    score: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![None; height * width],
            score: 0,
        }
    }

    /// Calculate flat index from (row, col), None when out of bounds
    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Flat index for coordinates the caller has already validated
    #[inline(always)]
    fn flat(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total score accumulated by merges and row clears
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Check if (row, col) is within grid bounds
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.height && col >= 0 && (col as usize) < self.width
    }

    /// Check if the cell at (row, col) holds a tile.
    /// Out-of-bounds coordinates count as unoccupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(idx) => self.cells[idx].is_some(),
            None => false,
        }
    }

    /// Borrow the tile at (row, col), None when empty or out of bounds
    pub fn tile(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Commit settled tiles onto the grid. Each tile lands in the cell its
    /// own position names. Returns true when any tile fell outside the grid
    /// or onto an occupied cell; the rest of the batch still lands, there
    /// is no rollback.
    pub fn place_tiles<I>(&mut self, tiles: I) -> bool
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut game_over = false;
        for tile in tiles {
            let position = tile.position();
            match self.index(position.y, position.x) {
                Some(idx) if self.cells[idx].is_none() => self.cells[idx] = Some(tile),
                _ => game_over = true,
            }
        }
        game_over
    }

    /// Run the vertical merge cascade over the given columns, then settle
    /// the grid. Columns outside the grid are skipped. Within a column the
    /// scan restarts from the bottom after every merge, so a stack like
    /// [4, 2, 2] collapses all the way to [8].
    pub fn resolve_merges(&mut self, columns: &[usize]) {
        for &col in columns {
            if col >= self.width {
                continue;
            }
            self.merge_column(col);
        }
        self.apply_gravity();
    }

    /// Merge equal vertical neighbours in one column until a full scan
    /// finds no pair. Every merge removes a tile, so this terminates after
    /// at most `height` passes.
    fn merge_column(&mut self, col: usize) {
        loop {
            let mut merged = false;
            for row in 0..self.height.saturating_sub(1) {
                let (Some(lower), Some(upper)) =
                    (self.value_at(row, col), self.value_at(row + 1, col))
                else {
                    continue;
                };
                if lower != upper {
                    continue;
                }

                // Double the lower tile, consume the upper one and close
                // the gap by shifting everything above down one row.
                let idx = self.flat(row, col);
                if let Some(tile) = self.cells[idx].as_mut() {
                    self.score += tile.double();
                }
                let upper_idx = self.flat(row + 1, col);
                self.cells[upper_idx] = None;
                self.shift_column_down(col, row + 2);

                merged = true;
                break;
            }
            if !merged {
                break;
            }
        }
    }

    /// Clear candidate rows that are completely filled, award their tile
    /// values and drop everything above by one row. Candidates are fixed
    /// up front: ascending, in-bounds, no duplicates. A row that shifts
    /// into a candidate index after an earlier clear is checked as-is.
    /// Returns the number of rows actually cleared.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut candidates: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&row| row < self.height)
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut cleared = 0;
        for row in candidates {
            if !self.is_row_full(row) {
                continue;
            }
            for col in 0..self.width {
                if let Some(tile) = self.take(row, col) {
                    self.score += tile.value();
                }
            }
            for col in 0..self.width {
                self.shift_column_down(col, row + 1);
            }
            cleared += 1;
        }
        self.apply_gravity();
        cleared
    }

    /// Drop every floating tile straight down until it rests on another
    /// tile or on the grid floor. Column order is preserved and a second
    /// pass is a no-op.
    pub fn apply_gravity(&mut self) {
        for col in 0..self.width {
            for row in 1..self.height {
                if !self.has_tile(row, col) {
                    continue;
                }
                let mut current = row;
                while current > 0 && !self.has_tile(current - 1, col) {
                    if let Some(tile) = self.take(current, col) {
                        self.put(current - 1, col, tile);
                    }
                    current -= 1;
                }
            }
        }
    }

    /// Shift every tile at or above `from_row` in one column down one cell
    fn shift_column_down(&mut self, col: usize, from_row: usize) {
        for row in from_row..self.height {
            if let Some(tile) = self.take(row, col) {
                self.put(row - 1, col, tile);
            }
        }
    }

    fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        self.cells[self.flat(row, col)].as_ref().map(Tile::value)
    }

    fn has_tile(&self, row: usize, col: usize) -> bool {
        self.cells[self.flat(row, col)].is_some()
    }

    fn take(&mut self, row: usize, col: usize) -> Option<Tile> {
        let idx = self.flat(row, col);
        self.cells[idx].take()
    }

    /// Store a tile in a cell, keeping its recorded position in step
    fn put(&mut self, row: usize, col: usize, mut tile: Tile) {
        tile.move_to(Position::new(col as i32, row as i32));
        let idx = self.flat(row, col);
        self.cells[idx] = Some(tile);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GRID_HEIGHT, GRID_WIDTH)
    }
}
