//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `tui_2048::term`.
//! Logs go to a file since the terminal is taken by the alternate screen.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tui_2048::app::{App, Flow, Settings};
use tui_2048::store::load_config;
use tui_2048::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_2048::types::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, STATIC_REDRAW_MS, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tui-2048", about = "Play 2048 in the terminal")]
struct Args {
    /// Path to the JSON config file (created with defaults if missing).
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// Directory holding the save slots.
    #[arg(long, default_value = "saves")]
    saves: PathBuf,
    /// Board edge length.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE,
          value_parser = clap::value_parser!(u8).range(MIN_BOARD_SIZE as i64..=MAX_BOARD_SIZE as i64).map(usize::from))]
    size: usize,
    /// Seed for tile spawns; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
    /// Log file path.
    #[arg(long, default_value = "tui-2048.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = load_config(&args.config);
    let settings = Settings {
        board_size: args.size,
        seed: args.seed,
        saves_dir: args.saves.clone(),
        config,
        config_path: args.config.clone(),
    };
    info!(size = args.size, saves = %args.saves.display(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, App::new(settings));

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %format!("{:#}", err), "exited with error");
    }
    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("create log file {}", args.log_file.display()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS);
    let mut throttle = RenderThrottle::from_millis(STATIC_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);
    let mut viewport = Viewport::new(0, 0);

    loop {
        let now = Instant::now();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != (viewport.width, viewport.height) {
            viewport = Viewport::new(w, h);
            term.invalidate();
            throttle.invalidate();
        }

        if throttle.should_render(now, app.fingerprint(now)) {
            app.render_into(now, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if app.handle_key(key, Instant::now()) == Flow::Quit {
                    info!(score = app.game().score(), "quit");
                    return Ok(());
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                throttle.invalidate();
            }
            _ => {}
        }
    }
}
