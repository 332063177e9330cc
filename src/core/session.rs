//! Session module - drives the grid through the piece lifecycle
//!
//! One session owns the board, the active and next pieces and the RNG.
//! Gravity advances one cell per tick; when the active piece can no longer
//! fall it lands, and the landing pipeline runs in a fixed order:
//! placement, then vertical merges in the piece's columns, then row clears
//! for the piece's rows. A placement that reports game over stops the
//! pipeline before any merge or clear.

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::core::tetromino::Tetromino;
use crate::types::{GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Events emitted by the landing pipeline, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Rows actually removed by the last landing
    RowsCleared { count: usize },
    /// Score after the last landing finished merging and clearing
    ScoreChanged { score: u32 },
    /// The last placement left the grid unplayable
    GameOver { score: u32 },
}

/// A running game: board, falling piece, upcoming piece and RNG
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    /// The falling piece; None only after game over
    active: Option<Tetromino>,
    next: Tetromino,
    rng: SimpleRng,
    paused: bool,
    game_over: bool,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session on the default grid
    pub fn new(seed: u32) -> Self {
        Self::with_dimensions(seed, GRID_HEIGHT, GRID_WIDTH)
    }

    /// Start a session on a grid of the given dimensions
    pub fn with_dimensions(seed: u32, height: usize, width: usize) -> Self {
        let board = Board::new(height, width);
        let mut rng = SimpleRng::new(seed);
        let next = Tetromino::spawn(random_kind(&mut rng), &board, &mut rng);

        let mut session = Self {
            board,
            active: None,
            next,
            rng,
            paused: false,
            game_over: false,
            events: Vec::new(),
        };
        session.spawn_next();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// How far the active piece would fall, for the ghost preview
    pub fn ghost_offset(&self) -> Option<i32> {
        self.active
            .as_ref()
            .map(|piece| piece.drop_distance(&self.board))
    }

    /// Drain the events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance gravity by one cell. Returns true when the piece landed.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.try_shift(0, -1, &self.board) {
            return false;
        }
        self.land_active();
        true
    }

    /// Apply a player action. Returns true when it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.shift_active(-1, 0),
            GameAction::MoveRight => self.shift_active(1, 0),
            GameAction::SoftDrop => self.shift_active(0, -1),
            GameAction::HardDrop => {
                if self.paused || self.game_over || self.active.is_none() {
                    return false;
                }
                if let Some(active) = self.active.as_mut() {
                    while active.try_shift(0, -1, &self.board) {}
                }
                self.land_active();
                true
            }
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Restart on the same grid, continuing the RNG sequence
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        *self = Self::with_dimensions(seed, self.board.height(), self.board.width());
    }

    fn shift_active(&mut self, dx: i32, dy: i32) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => active.try_shift(dx, dy, &self.board),
            None => false,
        }
    }

    /// The landing pipeline: place, merge, clear, report, respawn
    fn land_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let columns = piece.occupied_columns();
        let rows = piece.occupied_rows();

        if self.board.place_tiles(piece.into_tiles()) {
            self.game_over = true;
            self.events.push(SessionEvent::GameOver {
                score: self.board.score(),
            });
            return;
        }

        self.board.resolve_merges(&columns);
        let cleared = self.board.clear_rows(&rows);

        if cleared > 0 {
            self.events.push(SessionEvent::RowsCleared { count: cleared });
        }
        self.events.push(SessionEvent::ScoreChanged {
            score: self.board.score(),
        });

        self.spawn_next();
    }

    /// Promote the preview piece and roll a new one
    fn spawn_next(&mut self) {
        let upcoming = Tetromino::spawn(random_kind(&mut self.rng), &self.board, &mut self.rng);
        self.active = Some(std::mem::replace(&mut self.next, upcoming));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}

fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
}
