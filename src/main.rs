//! mux-session - jump to a project's tmux session, creating it from a template
//!
//! Run with `mux-session` for the interactive picker or `mux-session --help`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mux_session::{
    APP_NAME, Config, Item, SessionManager, SwitchMode, SwitchOutcome, VERSION, aggregate,
    error::SessionError,
    preview::Previewer,
    provider::flatten_tree,
    tmux::{TmuxClient, TmuxExecutor},
    tui,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Fuzzy-pick a project directory or tmux session and switch to it")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file
    #[arg(short = 'f', long = "file", global = true)]
    file: Option<PathBuf>,

    /// Tmux socket name, overriding the config file
    #[arg(short = 'L', long, global = true)]
    socket: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every directory and session, live sessions marked with [x]
    ListSessions,

    /// Switch to the session for an item, creating it if needed
    Switch {
        /// Directory base name or session name
        id: String,

        /// Create the session without switching the client to it
        #[arg(long)]
        detached: bool,
    },

    /// Load the config file and print it as JSON
    ConfigValidate,

    /// Write a starter config file
    Init {
        /// Directories to search (prompted for when omitted)
        search_paths: Vec<String>,
    },
}

fn setup_logging(verbose: bool, to_file: bool) -> Result<()> {
    let default_level = match (verbose, to_file) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        // Our crate at the default level, warn for dependencies
        Err(_) => EnvFilter::new(default_level)
            .add_directive("gix=warn".parse()?)
            .add_directive("tokio=warn".parse()?),
    };

    if to_file {
        // Log to file while the picker owns the screen
        let path = Config::log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_ansi(false).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

fn load_config(file: Option<PathBuf>) -> Result<Config> {
    let config = match file {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Tmux client on the socket from the command line, else the config file
async fn connect(config: &Config, socket: Option<String>) -> Result<TmuxClient> {
    TmuxExecutor::new().check_installed().await?;
    Ok(TmuxClient::with_socket(socket.or_else(|| config.socket.clone())))
}

async fn switch(
    item: &Item,
    config: &Config,
    tmux: TmuxClient,
    mode: SwitchMode,
) -> Result<()> {
    let manager = SessionManager::new(tmux, mode);
    let outcome = manager
        .switch_or_create(item, config.project_for(&item.id))
        .await?;

    info!("Switch finished: {:?}", outcome);
    match outcome {
        SwitchOutcome::Created(session) if mode == SwitchMode::Detached => {
            println!("Created session '{}'", session);
        }
        SwitchOutcome::Exists(session) => {
            println!("Session '{}' already exists", session);
        }
        _ => {}
    }

    Ok(())
}

fn prompt_search_paths() -> Result<Vec<String>> {
    print!("Search paths (comma separated): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let Cli {
        verbose,
        file,
        socket,
        command,
    } = Cli::parse();

    match command {
        None => {
            setup_logging(verbose, true)?;
            info!("Starting {} v{}", APP_NAME, VERSION);

            let config = load_config(file)?;
            let tmux = connect(&config, socket).await?;
            let items = aggregate(config.expanded_search_paths(), tmux.clone()).await?;
            if items.is_empty() {
                println!("No items found");
                return Ok(());
            }

            let Some(item) = tui::select(items, Previewer::new(tmux.clone())).await? else {
                return Ok(());
            };

            switch(&item, &config, tmux, SwitchMode::detect()).await?;
        }

        Some(Commands::ListSessions) => {
            setup_logging(verbose, false)?;

            let config = load_config(file)?;
            let tmux = connect(&config, socket).await?;
            let items = flatten_tree(&aggregate(config.expanded_search_paths(), tmux).await?);

            if items.is_empty() {
                println!("No items found");
            }
            for item in items {
                println!("{}", item.display);
            }
        }

        Some(Commands::Switch { id, detached }) => {
            setup_logging(verbose, false)?;

            let config = load_config(file)?;
            let tmux = connect(&config, socket).await?;
            let items = aggregate(config.expanded_search_paths(), tmux.clone()).await?;
            let item = Item::find(&items, &id)
                .ok_or_else(|| SessionError::ItemNotFound(id.clone()))?;

            let mode = if detached {
                SwitchMode::Detached
            } else {
                SwitchMode::detect()
            };
            switch(item, &config, tmux, mode).await?;
        }

        Some(Commands::ConfigValidate) => {
            setup_logging(verbose, false)?;

            let config = load_config(file)?;
            println!("{}", config.to_pretty_json()?);
        }

        Some(Commands::Init { search_paths }) => {
            setup_logging(verbose, false)?;

            let path = match file {
                Some(path) => path,
                None => Config::config_file_path()?,
            };
            let search_paths = if search_paths.is_empty() {
                prompt_search_paths()?
            } else {
                search_paths
            };

            Config::starter(search_paths).init(&path)?;
            println!("Configuration written to {}", path.display());
        }
    }

    Ok(())
}
