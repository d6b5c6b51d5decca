//! Tic-Tac-Toe in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tictactoe_model::{GameMachine, KeyValueStore};
use tictactoe_tui::{
    App, Cli, Command, JsonFileStore, TuiConfig, describe_slot, draw, init_file_logging,
    init_stderr_logging,
};
use tracing::{info, instrument, warn};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TuiConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.state_file, cli.key, cli.log_file);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            init_file_logging(config.log_file(), config.log_filter())?;
            play(&config)
        }
        Command::Show => {
            init_stderr_logging(config.log_filter());
            let store = JsonFileStore::new(config.state_file());
            print!("{}", describe_slot(&store, config.storage_key()));
            Ok(())
        }
        Command::Reset => {
            init_stderr_logging(config.log_filter());
            let mut store = JsonFileStore::new(config.state_file());
            store
                .remove(config.storage_key())
                .with_context(|| format!("Failed to reset {}", store.path().display()))?;
            println!("Saved game cleared.");
            Ok(())
        }
    }
}

#[instrument(skip(config), fields(state_file = %config.state_file().display()))]
fn play(config: &TuiConfig) -> Result<()> {
    info!("Starting Tic-Tac-Toe TUI");

    let store = JsonFileStore::new(config.state_file());
    let machine = GameMachine::new(store).with_key(config.storage_key().as_str());
    let app = App::new(machine);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        warn!(error = %err, "Terminal UI stopped with an error");
    }
    res
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }

        if app.should_quit() {
            info!("Quit requested");
            return Ok(());
        }
    }
}
