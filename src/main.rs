use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use dropsearch::app::editor;
use dropsearch::app::{self, AppConfig};
use dropsearch::combobox::MatchMode;
use dropsearch::config;
#[cfg(feature = "harness")]
use dropsearch::harness;
use dropsearch::ui::theme;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV_VAR: &str = "DROPSEARCH_LOG";

/// Searchable dropdown demo for the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Option to offer; repeat to build the list. Overrides `[demo] options`.
    #[arg(long = "option", value_name = "TEXT")]
    options: Vec<String>,

    /// Placeholder shown while the query is empty.
    #[arg(long)]
    placeholder: Option<String>,

    /// Text shown when a query matches no option.
    #[arg(long)]
    notfound: Option<String>,

    /// Render the combobox disabled.
    #[arg(long, default_value_t = false)]
    disabled: bool,

    /// Use fuzzy matching instead of substring matching.
    #[arg(long, default_value_t = false)]
    fuzzy: bool,

    /// Log at debug level.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[cfg(feature = "harness")]
    /// Render deterministic frames to stdout without entering interactive mode.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 100)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 24)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit dropsearch configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Config(command)) = cli.command {
        return handle_config_command(command);
    }

    let config = config::load_or_create()?;
    init_logging(cli.verbose, &config.log_level)?;
    theme::apply(config.theme);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_demo_dump(cli.harness_width, cli.harness_height)?;
        println!("{dump}");
        return Ok(());
    }

    let mut combobox = config.combobox;
    if let Some(placeholder) = cli.placeholder {
        combobox.placeholder = placeholder;
    }
    if let Some(notfound) = cli.notfound {
        combobox.notfound = notfound;
    }
    combobox.disabled |= cli.disabled;
    if cli.fuzzy {
        combobox.match_mode = MatchMode::Fuzzy;
    }

    let options = if cli.options.is_empty() {
        config.options
    } else {
        cli.options
    };

    app::run(AppConfig { options, combobox }).await
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}

/// Installs a file-backed subscriber; the terminal itself belongs to the TUI.
fn init_logging(verbose: bool, configured_level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::try_new(configured_level)
            .with_context(|| format!("invalid log level in config: {configured_level}"))?,
    };

    let path = config::log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
