//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: views draw the session into a
//! plain framebuffer of styled cells, and the renderer flushes whole
//! frames to the terminal. Keeping the framebuffer step pure makes the
//! screens testable without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
