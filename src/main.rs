#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use line_follower::simulation::world::{Outcome, World};
use line_follower::ui::{
    field::compute_field_grid,
    input::{map_key, Input},
    render::draw_ui,
};
use line_follower::SimulationConfig;

const TRACE_FILE: &str = "line_follower.trace.log";

struct Args {
    config: Option<String>,
    headless: Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        headless: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--headless" {
            let ticks = iter.next().context("--headless needs a tick count")?;
            args.headless = Some(ticks.parse().context("invalid tick count")?);
        } else if arg.starts_with("--") {
            bail!("unknown option {arg}");
        } else {
            args.config = Some(arg);
        }
    }
    Ok(args)
}

fn init_tracing(headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if headless {
        let _ = builder.with_writer(io::stderr).try_init();
    } else {
        // The TUI owns the terminal, so traces go to a file.
        let file = File::create(TRACE_FILE).with_context(|| format!("creating {TRACE_FILE}"))?;
        let _ = builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args()?;
    init_tracing(args.headless.is_some())?;

    let config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("loading config {path}"))?,
        None => SimulationConfig::default(),
    };
    let mut world = World::new(config)?;

    if let Some(ticks) = args.headless {
        return run_headless(&mut world, ticks);
    }

    // Setup Terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(world.config().tick_millis);
    let res = run_app(&mut terminal, &mut world, tick_rate);

    // Restore Terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(path) = world.shutdown() {
        println!("Step log saved to {}", path.display());
    }
    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_headless(world: &mut World, ticks: u64) -> Result<()> {
    info!(ticks, "running headless");
    for _ in 0..ticks {
        world.tick()?;
    }
    print!("{}", world.log().format_table(None));
    world.shutdown();
    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::LinesGenerated { clusters, cells } => {
            format!("{clusters} clusters, {cells} cells")
        }
        Outcome::AgentMoved { x, y } => format!("agent at ({x},{y})"),
        Outcome::GridCleared => "grid cleared".to_string(),
        Outcome::Paused(true) => "paused".to_string(),
        Outcome::Paused(false) => "running".to_string(),
        Outcome::LogCleared => "log cleared".to_string(),
        Outcome::Exported { path, rows } => format!("{rows} rows -> {}", path.display()),
        Outcome::NothingToExport => "nothing to export".to_string(),
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    world: &mut World,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut status = String::new();
    loop {
        // 1. Update
        if last_tick.elapsed() >= tick_rate {
            if let Err(err) = world.tick() {
                error!(%err, "step log write failed");
                status = format!("log error: {err}");
            }
            last_tick = Instant::now();
        }

        // 2. Render
        let view: &World = world;
        terminal.draw(|f| {
            let field = compute_field_grid(view.grid(), view.agent());
            draw_ui(f, view, field, &status);
        })?;

        // 3. Input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match map_key(key.code) {
                    Some(Input::Quit) => return Ok(()),
                    Some(Input::Command(command)) => {
                        status = match world.apply(command) {
                            Ok(outcome) => describe(&outcome),
                            Err(err) => {
                                error!(%err, "command failed");
                                format!("error: {err}")
                            }
                        };
                    }
                    None => {}
                }
            }
        }
    }
}
