//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default playfield dimensions (rows x columns, row 0 at the bottom)
pub const GRID_HEIGHT: usize = 20;
pub const GRID_WIDTH: usize = 12;

/// Frame delay driving the drop cadence (milliseconds)
pub const FRAME_MS: u32 = 300;

/// Values a freshly spawned tile can carry
pub const SPAWN_VALUES: [u32; 2] = [2, 4];

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    Z,
}

impl PieceKind {
    /// All kinds, in spawn-table order
    pub const ALL: [PieceKind; 3] = [PieceKind::I, PieceKind::O, PieceKind::Z];

    /// Convert to display string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::Z => "Z",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Pause,
    Restart,
}
