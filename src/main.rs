mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use snake_tower_defense::compute::tick;
use snake_tower_defense::config::Rules;
use snake_tower_defense::entities::{GameSession, Mode, Screen};
use snake_tower_defense::screen::{handle_event, select_mode, Flow, InputEvent, Key};

#[derive(Parser, Debug)]
#[command(name = "snake_tower_defense")]
#[command(about = "Place snakes along the path and hold the base against the waves")]
struct Args {
    /// TOML file overriding the default rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the menu and start in this mode (easy, hard, extreme, endless)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG controls the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Map a terminal event onto the game's input model.  Only key presses
/// count; Ctrl-C stands in for closing the window.
fn to_input(ev: Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
        return None;
    };
    if kind != KeyEventKind::Press {
        return None;
    }
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char(c) => Some(InputEvent::Key(Key::Char(c))),
        KeyCode::Esc => Some(InputEvent::Key(Key::Escape)),
        _ => None,
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Single loop for every screen: drain input, advance the simulation if
/// playing, draw, then sleep out the rest of the frame.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut session: GameSession,
    rng: &mut StdRng,
) -> Result<()> {
    let frame = Duration::from_secs(1) / session.rules.fps;
    let clock = Instant::now();

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            let Some(input) = to_input(ev) else { continue };
            match handle_event(&session, &input, rng) {
                Flow::Quit => {
                    tracing::info!(wave = session.wave, "quit");
                    return Ok(());
                }
                Flow::Continue(next) => session = next,
            }
        }

        if session.screen == Screen::Playing {
            let now_ms = clock.elapsed().as_millis() as u64;
            session = tick(&session, now_ms, rng);
        }

        display::render(out, &session).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let rules = match &args.config {
        Some(path) => Rules::load(path)?,
        None => Rules::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = GameSession::new(rules);
    let session = match args.mode {
        Some(mode) => select_mode(&session, mode),
        None => session,
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, session, &mut rng);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
