mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use kamikaze_furry::compute::{
    aim_player, init_state, player_shoot, restart, start_game, tick, toggle_pause,
};
use kamikaze_furry::config::Config;
use kamikaze_furry::entities::{Controls, GameState, Lifecycle};
use kamikaze_furry::logging;
use kamikaze_furry::store::{HighScoreStore, JsonFileStore};

use display::{Overlay, Viewport};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈130 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn held_controls(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Controls {
    use KeyCode::{Char, Down, Left, Right, Up};
    Controls {
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
    }
}

// ── One-shot key actions ──────────────────────────────────────────────────────

enum Action {
    Quit,
    Start,
    TogglePause,
    Restart,
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// for every key, and each frame the still-fresh keys become the held
/// `Controls`. Mouse motion aims the ship, the left button fires.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    store: &mut impl HighScoreStore,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let high_score = store.load().unwrap_or_else(|e| {
        log::warn!("could not read high score: {e}");
        0
    });
    let mut state: GameState = init_state(high_score);
    let mut overlay = Overlay::default();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let frame_budget = config.frame();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let view = Viewport::new(width, height);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match action_for(code, modifiers) {
                            Some(Action::Quit) => return Ok(()),
                            Some(Action::Start) => state = start_game(&state),
                            Some(Action::TogglePause)
                                if matches!(
                                    state.lifecycle,
                                    Lifecycle::Playing | Lifecycle::Paused
                                ) =>
                            {
                                state = toggle_pause(&state)
                            }
                            Some(Action::Restart) if state.lifecycle != Lifecycle::Idle => {
                                state = restart(&state, store);
                                overlay.clear();
                                key_frame.clear();
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let (x, y) = view.to_world(column, row);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            state = aim_player(&state, x, y);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            state = aim_player(&state, x, y);
                            state = player_shoot(&state);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let controls = held_controls(&key_frame, frame);
        state = tick(&state, &controls, &mut rng);

        overlay.absorb(&state.drain_events());
        display::render(out, &state, &overlay, view)?;
        overlay.age();

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let config = Config::parse();
    logging::init(config.verbose, config.log_file.as_deref())?;
    let mut store = JsonFileStore::new(config.high_score_path());
    log::info!("high score file: {}", store.path().display());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &mut store);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
