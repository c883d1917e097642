//! Inkpad - A terminal rich-text editor.
//!
//! # Usage
//!
//! ```bash
//! inkpad
//! inkpad --autosave --filename notes.txt
//! inkpad --restore
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use inkpad::app::App;
use inkpad::autosave::MIN_AUTOSAVE_PERIOD_MS;
use inkpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use inkpad::export::DEFAULT_FILENAME;
use inkpad::storage::default_storage_dir;

/// A terminal rich-text editor with plain-text export and auto-save
#[derive(Parser, Debug)]
#[command(name = "inkpad", version, about, long_about = None)]
struct Cli {
    /// Start with auto-save enabled
    #[arg(short, long)]
    autosave: bool,

    /// Export filename (defaults to document.txt)
    #[arg(short, long, value_name = "NAME")]
    filename: Option<String>,

    /// Directory exported files are written into
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Directory holding the auto-save record
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Auto-save period in milliseconds (at least 100)
    #[arg(
        long,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(MIN_AUTOSAVE_PERIOD_MS..)
    )]
    autosave_interval_ms: Option<u64>,

    /// Load the last auto-saved document on startup
    #[arg(short, long)]
    restore: bool,

    /// Write log events to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            autosave: self.autosave,
            restore: self.restore,
            filename: self.filename.clone(),
            export_dir: self.export_dir.clone(),
            storage_dir: self.storage_dir.clone(),
            autosave_interval_ms: self.autosave_interval_ms,
            log_file: self.log_file.clone(),
        }
    }
}

/// Route tracing output to `path`. The terminal belongs to the UI, so
/// without a log file events are dropped.
fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

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

    let log_path = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("INKPAD_LOG_FILE").map(PathBuf::from));
    if let Err(err) = init_logging(log_path.as_ref()) {
        eprintln!("[warn] {err:#}");
    }
    tracing::info!(?effective, "starting inkpad");

    let mut app = App::new()
        .with_filename(
            effective
                .filename
                .clone()
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        )
        .with_autosave(effective.autosave)
        .with_restore(effective.restore)
        .with_storage_dir(
            effective
                .storage_dir
                .clone()
                .unwrap_or_else(default_storage_dir),
        )
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );
    if let Some(dir) = effective.export_dir.clone() {
        app = app.with_export_dir(dir);
    }
    if let Some(ms) = effective.autosave_interval_ms {
        app = app.with_autosave_period(Duration::from_millis(ms));
    }

    app.run().context("Application error")
}
