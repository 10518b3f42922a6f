use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use pot_split::config::{self, Config};
use pot_split::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// The terminal owns stdout, so logs only go to a file.
fn init_logging(cfg: &Config) -> io::Result<()> {
    let Some(path) = cfg.log_file.as_ref() else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pot_split=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "pot-split requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            pot_split::VERSION
        );
        return Ok(());
    }
    let cfg = config::load().map_err(io::Error::other)?;
    init_logging(&cfg)?;
    tracing::info!(version = pot_split::VERSION, boards = cfg.boards.count(), "starting");

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let mut app = AppState::new(cfg);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
