//! htmlpad - A minimal HTML editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! htmlpad
//! htmlpad page.html
//! htmlpad --debug-log htmlpad.log page.html
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use htmlpad::app::App;
use htmlpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A minimal HTML editor with clipboard image pasting
#[derive(Parser, Debug)]
#[command(name = "htmlpad", version, about, long_about = None)]
struct Cli {
    /// HTML file to open on start-up
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Where to write the document being displayed (defaults to a temp file)
    #[arg(long, value_name = "PATH")]
    render_path: Option<PathBuf>,

    /// Write debug-level logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Disable mouse capture (no clickable buttons)
    #[arg(long)]
    no_mouse: bool,

    /// Save current command-line flags as global defaults
    #[arg(long)]
    save: bool,

    /// Clear saved global defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    match debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("htmlpad=debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let debug_log = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("HTMLPAD_DEBUG_LOG").map(PathBuf::from));
    init_logging(debug_log.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    // Verify file exists
    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    // Run the application
    let app = App::new()
        .with_file(cli.file)
        .with_render_location(effective.render_path)
        .with_mouse(!effective.no_mouse);

    app.run().context("Application error")
}
