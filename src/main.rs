mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Color, Print};
use crossterm::{terminal, ExecutableCommand, QueueableCommand};
use rand::thread_rng;

use last_survivor::compute::{init_state, tick};
use last_survivor::entities::{GameState, GameStatus, InputState};
use last_survivor::{consts, Settings};

// ── Key tracking ──────────────────────────────────────────────────────────────

/// Frames a key stays "held" after its last press/repeat event. Terminals
/// without release reporting only send repeats, and the OS repeat rate
/// refreshes the entry faster than this window expires, so a held key stays
/// live until the repeats stop.
const HOLD_WINDOW: u64 = 4;

/// Tracks which keys are currently down. Raw events are folded in as they
/// arrive; once per frame the tracker collapses into the one `InputState`
/// snapshot the simulation reads.
struct KeyTracker {
    /// Frame on which each key was last pressed or repeated.
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    fn new() -> Self {
        KeyTracker {
            last_seen: HashMap::new(),
        }
    }

    fn note(&mut self, kind: KeyEventKind, code: KeyCode, frame: u64) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, frame);
            }
            // Only enhancement-capable terminals ever send these.
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    fn held(&self, code: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&code)
            .map(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn snapshot(&self, frame: u64) -> InputState {
        let any = |codes: &[KeyCode]| codes.iter().any(|&c| self.held(c, frame));
        InputState {
            left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            forward: any(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            back: any(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            fire: self.held(KeyCode::Char(' '), frame),
        }
    }
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".last_survivor_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    let path = high_score_path();
    if let Err(err) = std::fs::write(&path, score.to_string()) {
        log::warn!("could not write {}: {err}", path.display());
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let cy = rows / 2;

    display::print_centered(
        out,
        cols,
        cy.saturating_sub(7),
        Color::Cyan,
        "★  LAST  SURVIVOR  ★",
    )?;
    if high_score > 0 {
        display::print_centered(
            out,
            cols,
            cy.saturating_sub(6),
            Color::Yellow,
            &format!("Best Score: {high_score}"),
        )?;
    }
    display::print_centered(
        out,
        cols,
        cy.saturating_sub(4),
        Color::White,
        "Enemies pour in from every edge. Outlast them.",
    )?;

    let legend: &[(&str, &str)] = &[
        ("← → / A D", "turn the ship"),
        ("    ↑ / W", "thrust forward"),
        ("    ↓ / S", "reverse"),
        ("    SPACE", "fire"),
    ];
    let left = (cols / 2).saturating_sub(14);
    for (i, (keys, action)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(left, cy.saturating_sub(1) + i as u16))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(keys))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("  {action}")))?;
    }

    display::print_centered(
        out,
        cols,
        cy + 5,
        Color::Green,
        "ENTER / SPACE : Play      Q : Quit",
    )?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until a choice arrives.
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Reader thread gone; nothing left to wait for.
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one session until quit (`Ok(true)`) or restart (`Ok(false)`).
///
/// The loop never blocks on input: the reader thread feeds raw events
/// through `rx`, the drain at the top of each frame folds them into the key
/// tracker, and the simulation sees exactly one `InputState` per frame.
/// Terminals that report key releases clear keys immediately; everywhere
/// else a key expires `HOLD_WINDOW` frames after its last repeat.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let mut tracker = KeyTracker::new();
    let mut frame: u64 = 0;
    let mut last_time = Instant::now();
    let mut fps = 0.0_f32;
    let frame_budget = Duration::from_secs_f32(1.0 / settings.target_fps.max(1) as f32);

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Fold pending events into the tracker; control keys act immediately.
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            tracker.note(kind, code, frame);
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true);
                }
                KeyCode::Char('r') | KeyCode::Char('R')
                    if state.status == GameStatus::GameOver =>
                {
                    return Ok(false);
                }
                _ => {}
            }
        }

        let input = tracker.snapshot(frame);

        // Clamped seconds since the previous frame, so one stalled frame
        // cannot teleport entities.
        let since_last = frame_start.duration_since(last_time).as_secs_f32();
        let dt = since_last.min(consts::MAX_DT);
        last_time = frame_start;
        if since_last > 0.0 {
            // Smoothed so the HUD readout doesn't flicker
            let instant = 1.0 / since_last;
            fps = if fps > 0.0 {
                fps * 0.9 + instant * 0.1
            } else {
                instant
            };
        }

        if state.status == GameStatus::Running {
            *state = tick(state, &input, dt, &mut rng);
            if state.status == GameStatus::GameOver {
                log::info!("game over: score {}", state.score);
            }
        }

        let hud_fps = settings.show_fps.then_some(fps);
        display::render(out, state, hud_fps)?;

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Blocking `event::read` calls get a dedicated thread; the game loop only
/// ever polls the channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped, program is exiting
            }
        }
    });
    rx
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("last_survivor starting");

    let settings = Settings::load();

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat reporting; classic terminals just refuse.
    let enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let rx = spawn_input_thread();

    let result = run(&mut out, &rx, &settings);

    // Unwind the terminal no matter how the session ended.
    if enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> std::io::Result<()> {
    let mut high_score = load_high_score();

    if let MenuResult::Quit = show_menu(out, rx, high_score)? {
        return Ok(());
    }

    // R on the game-over overlay chains straight into the next session.
    loop {
        log::info!("session start, best so far {high_score}");
        let mut state = init_state(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT, high_score);
        state.status = GameStatus::Running;

        let quit = game_loop(out, &mut state, rx, settings)?;

        if state.score > high_score {
            high_score = state.score;
            save_high_score(high_score);
            log::info!("new high score: {high_score}");
        }

        if quit {
            return Ok(());
        }
    }
}
