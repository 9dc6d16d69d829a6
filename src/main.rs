use std::env;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use overscroll_nav::replay;
use overscroll_nav_config::{Config, DEFAULT_CONFIG};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "overscroll-nav")]
#[command(about = "Inspect and replay overscroll navigation gestures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the config and report any errors
    Validate {
        /// Path to the config file, defaults to the user config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay a recorded touch trace and print the render outputs as JSON lines
    Replay {
        /// Number of articles in the sequence
        #[arg(long, default_value_t = 5)]
        articles: usize,
        /// Index of the article the trace starts on
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Path to the config file, defaults to the user config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// JSON trace to replay
        trace: PathBuf,
    },
    /// Print the default config
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "overscroll_nav=info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => {
            let path = config_path(config)?;
            load_config(&path)?;
            info!("config is valid");
            println!("config is valid");
        }
        Commands::Replay {
            articles,
            index,
            config,
            trace,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => default_or_user_config(),
            };

            let events = replay::load_trace(&trace)?;
            let mut stdout = io::stdout().lock();
            replay::replay(&events, articles, index, &config, &mut stdout)
                .context("error replaying trace")?;
            stdout.flush()?;
        }
        Commands::DefaultConfig => print!("{DEFAULT_CONFIG}"),
    }

    Ok(())
}

fn config_path(cli_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "overscroll-nav")
        .context("error retrieving the config directory")?;
    Ok(dirs.config_dir().join("config.kdl"))
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load(path).map_err(|err| {
        // Print the full miette report with source spans.
        eprintln!("{err:?}");
        anyhow!("invalid config at {}", path.display())
    })
}

/// The user config if there is one, the defaults otherwise.
fn default_or_user_config() -> Config {
    let path = match config_path(None) {
        Ok(path) => path,
        Err(err) => {
            warn!("{err:?}");
            return Config::default();
        }
    };

    if !path.exists() {
        return Config::default();
    }

    match load_config(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}, using the default config");
            Config::default()
        }
    }
}
