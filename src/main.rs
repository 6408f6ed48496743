use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use hangr::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    leaderboard::{self, LeaderboardStore},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui,
    word_bank::WordBank,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Process exit codes
const EXIT_OK: i32 = 0;
const EXIT_WORD_BANK: i32 = 1;
const EXIT_TERMINAL: i32 = 2;
const EXIT_EXPORT: i32 = 3;

/// word-guessing game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the word one letter at a time, optionally against a 60 second clock, and keep your best scores on a local leaderboard."
)]
pub struct Cli {
    /// word bank to draw from (csv: category,word,difficulty)
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// leaderboard file to read and append to
    #[clap(short = 'l', long)]
    leaderboard: Option<PathBuf>,

    /// seed for word selection, for reproducible rounds
    #[clap(long)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// print the top 10 scores and exit
    Scores,
    /// write a ranked leaderboard snapshot to a file and exit
    Export {
        /// destination file, overwritten if it exists
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    let store = LeaderboardStore::new(
        cli.leaderboard
            .clone()
            .unwrap_or_else(|| config.leaderboard_path()),
    );

    let code = match &cli.command {
        Some(Command::Scores) => print_scores(&store),
        Some(Command::Export { path }) => export(&store, path),
        None => play(&cli, &mut config, &config_store, store),
    };
    process::exit(code);
}

/// Logs go to a file; the terminal belongs to the game
fn init_logging() {
    let path = AppDirs::log_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("HANGR_LOG").unwrap_or_else(|_| EnvFilter::new("hangr=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
}

fn print_scores(store: &LeaderboardStore) -> i32 {
    let top = leaderboard::top(&store.read_all());
    if top.is_empty() {
        println!("No scores recorded yet.");
    }
    for (i, record) in top.iter().enumerate() {
        println!("{}", leaderboard::format_line(i + 1, record));
    }
    EXIT_OK
}

fn export(store: &LeaderboardStore, path: &Path) -> i32 {
    match LeaderboardStore::export(&store.read_all(), path) {
        Ok(()) => {
            println!("Leaderboard exported to {}", path.display());
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_EXPORT
        }
    }
}

fn play(
    cli: &Cli,
    config: &mut Config,
    config_store: &impl ConfigStore,
    store: LeaderboardStore,
) -> i32 {
    let word_path = cli.words.clone().unwrap_or_else(|| config.word_bank.clone());
    let words = match WordBank::load(&word_path) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Error: {e}");
            return EXIT_WORD_BANK;
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(words, store, rng).with_player_name(config.player_name.clone());

    if let Err(e) = run_tui(&mut app) {
        tracing::error!(error = %e, "terminal session failed");
        eprintln!("Error: {e}");
        return EXIT_TERMINAL;
    }

    if app.player_name != config.player_name {
        config.player_name = app.player_name.clone();
        if let Err(e) = config_store.save(config) {
            tracing::warn!(error = %e, "could not save config");
        }
    }

    EXIT_OK
}

fn run_tui(app: &mut App) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui::draw(app, f))?;
    while !app.should_quit {
        match runner.step() {
            GameEvent::Tick => app.on_tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => app.on_key(key),
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}
