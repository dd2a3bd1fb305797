use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::info;

use zombie_island::audio::SoundPlayer;
use zombie_island::config::{self, FRAME, HOLD_WINDOW, MAX_FRAME_DT};
use zombie_island::display::{self, Viewport};
use zombie_island::entities::{Input, Phase};
use zombie_island::menu::MenuAction;
use zombie_island::session::GameSession;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file = config::log_path().and_then(|path| {
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        // The terminal is busy drawing the game; nowhere else to write.
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }

    std::panic::set_hook(Box::new(|info| {
        display::restore_terminal(&mut stdout());
        let _ = terminal::disable_raw_mode();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

#[cfg(feature = "audio")]
fn open_sounds() -> Box<dyn SoundPlayer> {
    match zombie_island::audio::Synth::open() {
        Ok(synth) => Box::new(synth),
        Err(err) => {
            tracing::warn!(%err, "audio unavailable, running silent");
            Box::new(zombie_island::audio::Silent)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_sounds() -> Box<dyn SoundPlayer> {
    Box::new(zombie_island::audio::Silent)
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Jump is level-triggered, so we track when each key was last pressed or
/// repeated (`key_frame`) and treat it as held while that is recent.  On
/// keyboard-enhanced terminals (kitty protocol) release events remove the key
/// immediately; elsewhere it expires after `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    sounds: &mut dyn SoundPlayer,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char(' ') => session.acknowledge(),
                            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S')
                                if session.phase == Phase::Menu =>
                            {
                                session.reset();
                            }
                            KeyCode::Char('m') | KeyCode::Char('M')
                                if session.phase == Phase::Menu =>
                            {
                                session.toggle_audio(sounds);
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
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = view.to_world(column, row);
                    if session.click(x, y, sounds) == Some(MenuAction::Exit) {
                        return Ok(());
                    }
                }
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows),
                _ => {}
            }
        }

        let input = Input {
            jump: is_held(&key_frame, &KeyCode::Up, frame)
                || is_held(&key_frame, &KeyCode::Char('w'), frame)
                || is_held(&key_frame, &KeyCode::Char('W'), frame),
        };

        let dt = last_tick.elapsed().as_secs_f64().min(MAX_FRAME_DT);
        last_tick = Instant::now();
        session.update(dt, input, &mut rng, sounds);

        display::render(out, session, view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_tracing();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut sounds = open_sounds();
    let mut session = GameSession::new(config::audio_enabled());
    info!(audio_enabled = session.audio_enabled, "starting");

    let result = game_loop(&mut out, &mut session, sounds.as_mut(), &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    display::restore_terminal(&mut out);
    let _ = terminal::disable_raw_mode();

    info!(score = session.display_score(), "exiting");
    result
}
