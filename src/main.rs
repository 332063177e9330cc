//! Terminal Tetris 2048 runner.
//!
//! Flow: title screen, then the session loop. Input comes from crossterm,
//! frames go through the framebuffer renderer, and the landing events
//! feed the achievement tracker and the background music switch.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_tetris2048::achievements::{AchievementManager, ProgressEvent, DEFAULT_SAVE_FILE};
use tui_tetris2048::audio::AudioHandle;
use tui_tetris2048::core::{Session, SessionEvent};
use tui_tetris2048::input::{handle_key_event, is_confirm, should_quit};
use tui_tetris2048::term::{GameView, TerminalRenderer, Viewport};
use tui_tetris2048::types::{GameAction, FRAME_MS};

/// How long an unlocked-achievement toast stays in the side panel
const TOAST_SECS: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
struct GameConfig {
    seed: u32,
    audio: bool,
    bgm_path: PathBuf,
    save_path: PathBuf,
}

fn parse_args(args: &[String]) -> Result<GameConfig> {
    let mut config = GameConfig {
        seed: seed_from_clock(),
        audio: true,
        bgm_path: PathBuf::from("assets/bgm.wav"),
        save_path: PathBuf::from(DEFAULT_SAVE_FILE),
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--bgm" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --bgm"))?;
                config.bgm_path = PathBuf::from(v);
            }
            "--save" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --save"))?;
                config.save_path = PathBuf::from(v);
            }
            "--no-audio" => {
                config.audio = false;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Seed drawn from the clock so every run gets a fresh piece sequence
fn seed_from_clock() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.subsec_nanos() ^ elapsed.as_secs() as u32,
        Err(_) => 1,
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let view = GameView::default();

    if !menu(term, &view)? {
        return Ok(());
    }
    play(term, &view, config)
}

/// Title screen. Returns false when the player quits from the menu.
fn menu(term: &mut TerminalRenderer, view: &GameView) -> Result<bool> {
    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render_menu(Viewport::new(w, h));
        term.draw(&fb)?;

        if event::poll(Duration::from_millis(150))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if should_quit(key) {
                    return Ok(false);
                }
                if is_confirm(key) {
                    return Ok(true);
                }
            }
        }
    }
}

fn play(term: &mut TerminalRenderer, view: &GameView, config: &GameConfig) -> Result<()> {
    let mut session = Session::new(config.seed);
    let mut tracker = AchievementManager::with_save_path(&config.save_path);
    let mut audio = start_audio(config);
    let mut toast: Option<(String, Instant)> = None;

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        if let Some((_, since)) = &toast {
            if since.elapsed() >= Duration::from_secs(TOAST_SECS) {
                toast = None;
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let toast_name = toast.as_ref().map(|(name, _)| name.as_str());
        let fb = view.render(&session, toast_name, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next gravity step.
        let timeout = frame
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        if let Some(handle) = audio.take() {
                            handle.stop();
                        }
                        return Ok(());
                    }

                    // Enter restarts from the game over screen.
                    let action = if session.game_over() && is_confirm(key) {
                        Some(GameAction::Restart)
                    } else {
                        handle_key_event(key)
                    };
                    if let Some(action) = action {
                        let was_over = session.game_over();
                        session.apply_action(action);
                        if was_over && !session.game_over() && audio.is_none() {
                            audio = start_audio(config);
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= frame {
            last_tick = Instant::now();
            session.tick();
        }

        // Feed landing events to the tracker and the audio switch.
        for event in session.take_events() {
            match event {
                SessionEvent::RowsCleared { count } => {
                    for def in tracker.report(ProgressEvent::RowsCleared(count as u64)) {
                        toast = Some((def.name.to_string(), Instant::now()));
                    }
                }
                SessionEvent::ScoreChanged { score } => {
                    for def in tracker.report(ProgressEvent::Score(score as u64)) {
                        toast = Some((def.name.to_string(), Instant::now()));
                    }
                }
                SessionEvent::GameOver { .. } => {
                    if let Some(handle) = audio.take() {
                        handle.stop();
                    }
                }
            }
        }
    }
}

fn start_audio(config: &GameConfig) -> Option<AudioHandle> {
    if !config.audio {
        return None;
    }
    AudioHandle::spawn(&config.bgm_path).ok()
}
