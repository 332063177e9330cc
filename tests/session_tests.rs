//! Session tests - piece lifecycle, landing pipeline and game over

use tui_tetris2048::core::{Session, SessionEvent};
use tui_tetris2048::types::{GameAction, GRID_HEIGHT, GRID_WIDTH, SPAWN_VALUES};

fn active_rows(session: &Session) -> Vec<i32> {
    session
        .active()
        .map(|piece| piece.tiles().iter().map(|t| t.position().y).collect())
        .unwrap_or_default()
}

fn active_cols(session: &Session) -> Vec<i32> {
    session
        .active()
        .map(|piece| piece.tiles().iter().map(|t| t.position().x).collect())
        .unwrap_or_default()
}

fn board_has_tile_in_row(session: &Session, row: i32) -> bool {
    (0..session.board().width() as i32).any(|col| session.board().is_occupied(row, col))
}

#[test]
fn test_new_session_spawns_at_the_top() {
    let session = Session::new(3);
    let piece = session.active().unwrap();

    let top = piece.tiles().iter().map(|t| t.position().y).max().unwrap();
    assert_eq!(top, GRID_HEIGHT as i32 - 1, "spawn flush with the top row");
    for tile in piece.tiles() {
        assert!(session.board().is_inside(tile.position().y, tile.position().x));
        assert!(SPAWN_VALUES.contains(&tile.value()));
    }
}

#[test]
fn test_session_uses_default_dimensions() {
    let session = Session::new(3);
    assert_eq!(session.board().height(), GRID_HEIGHT);
    assert_eq!(session.board().width(), GRID_WIDTH);
}

#[test]
fn test_piece_lands_within_grid_height_ticks() {
    let mut session = Session::new(3);
    let mut landed = false;
    for _ in 0..=GRID_HEIGHT {
        if session.tick() {
            landed = true;
            break;
        }
    }

    assert!(landed, "an unobstructed piece lands in at most height ticks");
    assert!(board_has_tile_in_row(&session, 0));
    assert!(session.active().is_some(), "the next piece takes over");
}

#[test]
fn test_soft_drop_moves_down_one_cell() {
    let mut session = Session::new(3);
    let before = active_rows(&session);

    assert!(session.apply_action(GameAction::SoftDrop));

    let after = active_rows(&session);
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b - 1, *a);
    }
}

#[test]
fn test_walls_clamp_lateral_movement() {
    let mut session = Session::new(3);

    for _ in 0..GRID_WIDTH {
        session.apply_action(GameAction::MoveLeft);
    }
    assert_eq!(active_cols(&session).iter().min(), Some(&0));
    assert!(!session.apply_action(GameAction::MoveLeft), "wall rejects the move");

    for _ in 0..GRID_WIDTH {
        session.apply_action(GameAction::MoveRight);
    }
    assert_eq!(active_cols(&session).iter().max(), Some(&(GRID_WIDTH as i32 - 1)));
    assert!(!session.apply_action(GameAction::MoveRight));
}

#[test]
fn test_hard_drop_reaches_the_floor() {
    let mut session = Session::new(3);
    assert!(session.apply_action(GameAction::HardDrop));

    assert!(board_has_tile_in_row(&session, 0), "first piece rests on the floor");
}

#[test]
fn test_preview_piece_is_promoted_on_landing() {
    let mut session = Session::new(3);
    let upcoming_kind = session.next_piece().kind();
    let upcoming_values: Vec<u32> = session
        .next_piece()
        .tiles()
        .iter()
        .map(|t| t.value())
        .collect();

    session.apply_action(GameAction::HardDrop);

    let active = session.active().unwrap();
    assert_eq!(active.kind(), upcoming_kind);
    let active_values: Vec<u32> = active.tiles().iter().map(|t| t.value()).collect();
    assert_eq!(active_values, upcoming_values, "the preview spawns exactly as shown");
}

#[test]
fn test_ghost_offset_counts_remaining_soft_drops() {
    let mut session = Session::new(3);
    let offset = session.ghost_offset().unwrap();
    assert!(offset > 0, "a fresh piece floats above the floor");

    for step in 0..offset {
        assert!(
            session.apply_action(GameAction::SoftDrop),
            "soft drop {} of {} must succeed",
            step + 1,
            offset
        );
    }

    assert_eq!(session.ghost_offset(), Some(0));
    assert!(!session.apply_action(GameAction::SoftDrop), "the piece is grounded");
}

#[test]
fn test_rejected_soft_drop_leaves_landing_to_the_tick() {
    let mut session = Session::new(42);
    let offset = session.ghost_offset().unwrap();
    for _ in 0..offset {
        assert!(session.apply_action(GameAction::SoftDrop));
    }

    // Grounded: further soft drops are rejected and land nothing. The
    // piece stays active and no tile reaches the board.
    for _ in 0..3 {
        assert!(!session.apply_action(GameAction::SoftDrop));
    }
    assert!(session.active().is_some());
    assert!(session.take_events().is_empty(), "no landing pipeline ran");
    assert!(
        !board_has_tile_in_row(&session, 0),
        "tiles settle only when the piece lands"
    );

    // The next gravity tick performs the landing.
    assert!(session.tick(), "the grounded piece lands on the tick");
    assert!(board_has_tile_in_row(&session, 0));
    let events = session.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::ScoreChanged { .. })));
}

#[test]
fn test_score_tracks_board_and_never_decreases() {
    let mut session = Session::new(11);
    let mut last = 0;
    for _ in 0..20 {
        if session.game_over() {
            break;
        }
        session.apply_action(GameAction::HardDrop);
        let score = session.score();
        assert!(score >= last, "score must never decrease");
        assert_eq!(score, session.board().score());
        last = score;
    }
}

#[test]
fn test_landing_always_reports_score() {
    let mut session = Session::new(3);
    session.apply_action(GameAction::HardDrop);

    let events = session.take_events();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, SessionEvent::ScoreChanged { .. })),
        "every successful landing reports the score, merged or not"
    );
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    // Seed 1 deals an I piece first, which cannot fit on a 2-wide grid:
    // the first landing leaves part of the piece outside.
    let mut session = Session::with_dimensions(1, 2, 2);
    session.tick();

    assert!(session.game_over());
    assert!(session.active().is_none(), "no piece falls after game over");
    let events = session.take_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::GameOver { .. })));
}

#[test]
fn test_actions_rejected_after_game_over() {
    let mut session = Session::with_dimensions(1, 2, 2);
    session.tick();
    assert!(session.game_over());
    let score = session.score();

    assert!(!session.tick());
    assert!(!session.apply_action(GameAction::MoveLeft));
    assert!(!session.apply_action(GameAction::HardDrop));
    assert!(!session.apply_action(GameAction::Pause));
    assert!(!session.paused());
    assert_eq!(session.score(), score, "score freezes at game over");
}

#[test]
fn test_restart_after_game_over_starts_fresh() {
    let mut session = Session::with_dimensions(1, 2, 2);
    session.tick();
    assert!(session.game_over());

    assert!(session.apply_action(GameAction::Restart));

    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
    assert!(session.active().is_some());
    let board = session.board();
    for row in 0..board.height() as i32 {
        for col in 0..board.width() as i32 {
            assert!(!board.is_occupied(row, col), "restart clears cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_same_seed_plays_the_same_game() {
    let mut a = Session::new(42);
    let mut b = Session::new(42);

    for step in 0..10 {
        if step % 3 == 0 {
            a.apply_action(GameAction::MoveLeft);
            b.apply_action(GameAction::MoveLeft);
        }
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
    }

    assert_eq!(a.score(), b.score());
    assert_eq!(a.board(), b.board());
    assert_eq!(a.game_over(), b.game_over());
}
