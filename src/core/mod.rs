//! Core module - pure game logic with no external dependencies
//!
//! This module contains the grid rules, piece movement and session state.
//! It has zero dependencies on UI, audio, or I/O.

pub mod board;
pub mod rng;
pub mod session;
pub mod tetromino;
pub mod tile;

// Re-export commonly used types
pub use board::Board;
pub use rng::SimpleRng;
pub use session::{Session, SessionEvent};
pub use tetromino::Tetromino;
pub use tile::{Position, Tile};
