#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blockfall::app::App;
use blockfall::commands::Command;
use blockfall::config::{self, Config};
use blockfall::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blockfall.log";

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Blockfall");

    match config::loader::load_config_from_file() {
        Ok(loaded) => {
            Config::install(loaded);
            info!("Configuration loaded successfully");
        }
        // Continue with default configuration
        Err(e) => error!("Failed to load configuration: {e}"),
    }

    // Terminal initialization
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new();
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Exiting");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut last_render = Instant::now()
        .checked_sub(app.config().timing.frame_interval())
        .unwrap_or_else(Instant::now);
    let mut last_update = Instant::now();

    // Flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        let timing = app.config().timing.clone();

        if last_render.elapsed() >= timing.frame_interval() {
            terminal.draw(|f| ui::render(f, &app))?;
            last_render = Instant::now();
        }

        if last_update.elapsed() >= timing.update_interval() {
            last_update = Instant::now();

            if Config::check_and_reload() {
                app.apply_config(&Config::current());
            }

            let delta_seconds = app.advance_clock();
            let accepted = app.update(delta_seconds);
            if accepted > 0 {
                debug!("Applied {accepted} commands");
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                // Only presses and repeats move the shape
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Char('r') => app.reset(),
                    code => {
                        if let Some(command) = Command::from_key_code(code) {
                            app.push(command);
                        }
                    }
                }
            }
        }
    }
}
