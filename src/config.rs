use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::autosave::MIN_AUTOSAVE_PERIOD_MS;

/// Flags that can be given on the command line or in a config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub autosave: bool,
    pub restore: bool,
    pub filename: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub autosave_interval_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` on top of `self`: booleans are OR'd, options from
    /// `other` win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            autosave: self.autosave || other.autosave,
            restore: self.restore || other.restore,
            filename: other.filename.clone().or_else(|| self.filename.clone()),
            export_dir: other.export_dir.clone().or_else(|| self.export_dir.clone()),
            storage_dir: other
                .storage_dir
                .clone()
                .or_else(|| self.storage_dir.clone()),
            autosave_interval_ms: other.autosave_interval_ms.or(self.autosave_interval_ms),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("inkpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("inkpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("inkpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("inkpad").join("config");
        }
    }

    PathBuf::from(".inkpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".inkpadrc")
}

/// Read flags from a config file. A missing file yields no flags.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, one flag per line.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# inkpad defaults (saved with --save)".to_string());
    if flags.autosave {
        lines.push("--autosave".to_string());
    }
    if flags.restore {
        lines.push("--restore".to_string());
    }
    if let Some(filename) = &flags.filename {
        lines.push(format!("--filename {filename}"));
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir {}", dir.display()));
    }
    if let Some(dir) = &flags.storage_dir {
        lines.push(format!("--storage-dir {}", dir.display()));
    }
    if let Some(ms) = flags.autosave_interval_ms {
        lines.push(format!("--autosave-interval-ms {ms}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file, if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };

        if inline_value.is_none() {
            match name {
                "--autosave" => flags.autosave = true,
                "--restore" => flags.restore = true,
                _ => {}
            }
        }

        if is_value_flag(name) {
            let value = match inline_value {
                Some(value) => Some(value),
                None => {
                    let next = tokens.get(i + 1).map(String::as_str);
                    if next.is_some() {
                        i += 1;
                    }
                    next
                }
            };
            if let Some(value) = value {
                apply_value(&mut flags, name, value);
            }
        }
        i += 1;
    }
    flags
}

fn is_value_flag(name: &str) -> bool {
    matches!(
        name,
        "--filename" | "--export-dir" | "--storage-dir" | "--autosave-interval-ms" | "--log-file"
    )
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--filename" => flags.filename = Some(value.to_string()),
        "--export-dir" => flags.export_dir = Some(PathBuf::from(value)),
        "--storage-dir" => flags.storage_dir = Some(PathBuf::from(value)),
        "--autosave-interval-ms" => {
            if let Ok(ms) = value.parse::<u64>()
                && ms >= MIN_AUTOSAVE_PERIOD_MS
            {
                flags.autosave_interval_ms = Some(ms);
            }
        }
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
