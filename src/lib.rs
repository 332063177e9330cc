//! Terminal Tetris/2048 hybrid.
//!
//! Tetrominoes of numbered tiles fall onto a grid; equal tiles stacked in
//! a column merge 2048-style, and full rows clear for points. `core` holds
//! the whole rule set free of I/O, `term` renders it, and the thin modules
//! around them wire up input, audio and achievement persistence.

pub mod achievements;
pub mod audio;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
