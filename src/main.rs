// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use docs_map::config::{load_config, load_config_from, DocsMapConfig, SyncOverrides};
use docs_map::logging::{default_log_dir, init_logging, parse_rotation, LogConfig};
use docs_map::sync::{synchronize, SyncMode, SyncOutcome};
use docs_map::theme::{builtin_themes, load_themes};
use docs_map::utils::DOCS_MAP_VERSION;
use std::path::PathBuf;
use tracing::{debug, Level};

/// docs-map - keeps a static site's docs map in sync with its content files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.docs-map/config.toml, optional)
    #[arg(long, global = true, env = "DOCS_MAP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable JSON log format
    #[arg(long, global = true, env = "DOCS_MAP_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, global = true, env = "DOCS_MAP_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Also write logs to files in this directory
    #[arg(long, global = true, env = "DOCS_MAP_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Also write logs to ~/.docs-map/logs when --log-dir is not given
    #[arg(long, global = true, env = "DOCS_MAP_LOG_FILE", default_value = "false")]
    log_file: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synchronize the docs map with the documents directory (default)
    Sync(SyncArgs),
    /// List the theme-color table, or print one theme as JSON
    Themes(ThemesArgs),
}

#[derive(clap::Args, Debug, Default)]
struct SyncArgs {
    /// Documents root to scan (created if missing)
    #[arg(long, env = "DOCS_MAP_CONTENT_ROOT")]
    content_root: Option<PathBuf>,

    /// Manifest file to update
    #[arg(long, env = "DOCS_MAP_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Document layout under the documents root
    #[arg(long, value_enum)]
    mode: Option<SyncMode>,

    /// Content file extension
    #[arg(long)]
    extension: Option<String>,

    /// Remove entries whose document no longer exists
    #[arg(long)]
    prune: bool,
}

#[derive(clap::Args, Debug)]
struct ThemesArgs {
    /// Theme table to read instead of the built-in one
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print this theme as JSON instead of listing all themes
    #[arg(long)]
    id: Option<String>,
}

fn run_sync(config: &DocsMapConfig, args: SyncArgs) -> Result<()> {
    let options = config.sync.resolve(SyncOverrides {
        content_root: args.content_root,
        manifest_path: args.manifest,
        mode: args.mode,
        extension: args.extension,
        prune_missing: args.prune,
    });
    debug!(?options, "Resolved sync options");

    if let SyncOutcome::Written(report) = synchronize(&options)? {
        if !report.has_changes() {
            debug!("Manifest rewritten without changes");
        }
    }
    Ok(())
}

fn run_themes(config: &DocsMapConfig, args: ThemesArgs) -> Result<()> {
    let table = match args.file.or_else(|| config.themes.file.clone()) {
        Some(path) => load_themes(&path)?,
        None => builtin_themes()?,
    };

    if let Some(id) = args.id {
        let theme = table
            .find(&id)
            .ok_or_else(|| {
                let known: Vec<&str> = table.ids().collect();
                eyre!("Unknown theme id: {id} (available: {})", known.join(", "))
            })?;
        println!("{}", serde_json::to_string_pretty(theme)?);
        return Ok(());
    }

    for theme in table.iter() {
        println!("{}\t{}", theme.id, theme.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();

    let log_dir = match args.log_dir {
        Some(dir) => Some(dir),
        None if args.log_file => {
            Some(default_log_dir().ok_or_else(|| eyre!("Cannot locate the home directory"))?)
        }
        None => None,
    };

    init_logging(LogConfig {
        log_dir,
        log_level: if args.verbose { Level::DEBUG } else { Level::INFO },
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
    })?;
    debug!("docs-map v{DOCS_MAP_VERSION}");

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match args.command.unwrap_or(Command::Sync(SyncArgs::default())) {
        Command::Sync(sync_args) => run_sync(&config, sync_args),
        Command::Themes(themes_args) => run_themes(&config, themes_args),
    }
}
