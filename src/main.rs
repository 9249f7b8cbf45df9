use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::console::{configure_seats, Console};
use minimax_connect_four::session::Session;
use minimax_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four against a minimax opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Play over plain stdin/stdout instead of the full-screen UI
    #[arg(long)]
    headless: bool,

    /// Ask who plays each seat on stdin instead of reading the config's seats
    #[arg(long)]
    setup: bool,

    /// Seed for the computer players' tie-breaks
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config.search.seed = Some(seed);
    }
    if cli.setup {
        let [one, two] = configure_seats(&mut io::stdin().lock(), &mut io::stdout())
            .context("seat setup failed")?;
        config.player_one = one;
        config.player_two = two;
    }
    info!(?config, "starting session");

    let session = Session::from_config(&config);
    if cli.headless {
        let stdin = io::stdin();
        Console::new(session, stdin.lock(), io::stdout())
            .run()
            .context("console session failed")
    } else {
        run_tui(session).context("terminal UI failed")
    }
}

fn run_tui(session: Session) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
