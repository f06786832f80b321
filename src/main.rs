use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use claude_menu::{
    command::CommandSpec,
    config::Config,
    integration, launcher,
    selection::SelectionProvider,
};

#[derive(Parser)]
#[command(
    name = "claude-menu",
    about = "Right-click Claude Code sessions from the desktop file manager"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new Claude Code session in the resolved folder
    Open {
        /// Selected entries, in host order
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Folder the menu was invoked in, used when nothing in the
        /// selection resolves
        #[arg(long, value_name = "DIR")]
        target: Option<PathBuf>,

        /// Realize the launch through the installed helper script
        #[arg(long)]
        via_script: bool,
    },

    /// Resume a previous session in the resolved folder
    Resume {
        /// Selected entries, in host order
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Folder the menu was invoked in, used when nothing in the
        /// selection resolves
        #[arg(long, value_name = "DIR")]
        target: Option<PathBuf>,

        /// Realize the launch through the installed helper script
        #[arg(long)]
        via_script: bool,
    },

    /// Install the file-manager integration for the current user
    Setup,

    /// Remove the file-manager integration
    Uninstall,

    /// Show integration status
    Status {
        /// Keep re-checking on a fixed cadence
        #[arg(long)]
        watch: bool,

        /// Poll interval for --watch (e.g. "2s")
        #[arg(long, value_name = "DUR")]
        interval: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration to disk
    Init,
    /// Set a configuration value (e.g. terminal.command wezterm)
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
}

/// Selection data as the host glue passes it on the command line.
struct CliSelection {
    paths: Vec<PathBuf>,
    target: Option<PathBuf>,
}

impl SelectionProvider for CliSelection {
    fn selected_items(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }

    fn targeted_container(&self) -> Option<PathBuf> {
        self.target.clone()
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Open {
            paths,
            target,
            via_script,
        } => cmd_action(CommandSpec::Open, paths, target, via_script),

        Commands::Resume {
            paths,
            target,
            via_script,
        } => cmd_action(CommandSpec::Resume, paths, target, via_script),

        Commands::Setup => integration::install()?,

        Commands::Uninstall => integration::uninstall()?,

        Commands::Status { watch, interval } => cmd_status(watch, interval)?,

        Commands::Config { action } => cmd_config(action)?,
    }

    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("claude_menu=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The two menu actions exit zero even when nothing launches: a context
/// menu command has nowhere to surface an error beyond the log.
fn cmd_action(spec: CommandSpec, paths: Vec<PathBuf>, target: Option<PathBuf>, via_script: bool) {
    let provider = CliSelection { paths, target };
    launcher::dispatch(&provider, spec, via_script);
}

fn cmd_status(watch: bool, interval: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let interval = match interval {
        Some(text) => humantime::parse_duration(&text)?,
        None => config.status.poll_interval,
    };

    loop {
        for row in integration::status()? {
            println!("{row}");
        }
        if !watch {
            return Ok(());
        }
        std::thread::sleep(interval);
        println!();
    }
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            let pretty = toml::to_string_pretty(&config)?;
            print!("{pretty}");
        }
        ConfigAction::Path => {
            let path = Config::path()?;
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let config = Config::default();
            config.save()?;
            println!("Wrote default config to {}", Config::path()?.display());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set_value(&key, &value)?;
            config.save()?;
            println!("Set {key} = {value}");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get_value(&key)?);
        }
    }
    Ok(())
}
