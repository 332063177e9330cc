//! GameView tests - framebuffer contents for the menu and game screens

use tui_tetris2048::core::Session;
use tui_tetris2048::term::{FrameBuffer, GameView, Viewport};
use tui_tetris2048::types::GameAction;

fn screen_rows(fb: &FrameBuffer) -> Vec<String> {
    (0..fb.height())
        .map(|y| {
            (0..fb.width())
                .map(|x| fb.get(x, y).map(|cell| cell.ch).unwrap_or(' '))
                .collect()
        })
        .collect()
}

fn screen_contains(fb: &FrameBuffer, needle: &str) -> bool {
    screen_rows(fb).iter().any(|row| row.contains(needle))
}

#[test]
fn test_render_fills_the_viewport() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    assert_eq!(fb.width(), 80);
    assert_eq!(fb.height(), 24);
    assert_eq!(fb.cells().len(), 80 * 24);
}

#[test]
fn test_menu_shows_title_and_controls() {
    let view = GameView::default();
    let fb = view.render_menu(Viewport::new(80, 24));

    assert!(screen_contains(&fb, "TETRIS 2048"));
    assert!(screen_contains(&fb, "ENTER"));
    assert!(screen_contains(&fb, "quit"));
}

#[test]
fn test_game_screen_shows_panel_labels() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    assert!(screen_contains(&fb, "SCORE"));
    assert!(screen_contains(&fb, "NEXT"));
}

#[test]
fn test_panel_labels_the_next_piece_kind() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    let kind = session.next_piece().kind().as_str();
    let expected = format!("NEXT {}", kind);
    assert!(
        screen_contains(&fb, &expected),
        "panel should read {:?}",
        expected
    );
}

#[test]
fn test_game_screen_shows_the_falling_tiles() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    // Spawned tiles are worth 2 or 4, and the view prints their values.
    let rows = screen_rows(&fb);
    assert!(
        rows.iter().any(|row| row.contains('2') || row.contains('4')),
        "tile values must be visible on the board"
    );
}

#[test]
fn test_game_screen_draws_the_frame() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    let rows = screen_rows(&fb);
    assert!(rows.iter().any(|row| row.contains('┌') && row.contains('┐')));
    assert!(rows.iter().any(|row| row.contains('└') && row.contains('┘')));
}

#[test]
fn test_paused_session_shows_overlay() {
    let mut session = Session::new(5);
    session.apply_action(GameAction::Pause);

    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    assert!(screen_contains(&fb, "PAUSED"));
}

#[test]
fn test_game_over_shows_overlay_with_score() {
    // Seed 1 deals an I piece, which cannot fit on a 2-wide grid.
    let mut session = Session::with_dimensions(1, 2, 2);
    session.tick();
    assert!(session.game_over());

    let view = GameView::default();
    let fb = view.render(&session, None, Viewport::new(80, 24));

    assert!(screen_contains(&fb, "GAME OVER"));
    assert!(screen_contains(&fb, "SCORE"));
}

#[test]
fn test_toast_appears_in_the_side_panel() {
    let session = Session::new(5);
    let view = GameView::default();
    let fb = view.render(&session, Some("First Clear"), Viewport::new(80, 24));

    assert!(screen_contains(&fb, "UNLOCKED"));
    assert!(screen_contains(&fb, "First Clear"));
}

#[test]
fn test_tiny_viewport_renders_without_panic() {
    let session = Session::new(5);
    let view = GameView::default();

    let fb = view.render(&session, Some("First Clear"), Viewport::new(20, 10));
    assert_eq!(fb.width(), 20);

    let menu = view.render_menu(Viewport::new(20, 10));
    assert_eq!(menu.height(), 10);
}
