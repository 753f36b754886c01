//! Persistent default flags.
//!
//! A config file holds CLI flags, one or more per line, with `#` comments.
//! The global file is read first, then the local `.htmlpadrc`, then the
//! actual command line; see [`ConfigFlags::union`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const LOCAL_FILE_NAME: &str = ".htmlpadrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_mouse: bool,
    pub render_path: Option<PathBuf>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are OR-ed, options from `other`
    /// win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_mouse: self.no_mouse || other.no_mouse,
            render_path: other
                .render_path
                .clone()
                .or_else(|| self.render_path.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("htmlpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("htmlpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("htmlpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("htmlpad")
                .join("config");
        }
    }

    PathBuf::from(LOCAL_FILE_NAME)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE_NAME)
}

/// Read flags from `path`. A missing file yields the defaults.
///
/// # Errors
/// Fails if the file exists but cannot be read.
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

/// # Errors
/// Fails if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# htmlpad defaults (saved with --save)".to_string()];
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if let Some(render) = &flags.render_path {
        lines.push(format!("--render-path {}", render.display()));
    }
    if let Some(log) = &flags.debug_log {
        lines.push(format!("--debug-log {}", log.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
/// Fails if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this file format knows out of a token list; anything else
/// (the program name, a file argument, unknown flags) is skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-mouse" {
            flags.no_mouse = true;
        } else if let Some((value, consumed)) = path_option(tokens, i, "--render-path") {
            flags.render_path = Some(value);
            i += consumed;
        } else if let Some((value, consumed)) = path_option(tokens, i, "--debug-log") {
            flags.debug_log = Some(value);
            i += consumed;
        }
        i += 1;
    }
    flags
}

/// `--name value` or `--name=value` at `tokens[i]`. Returns the value and
/// how many extra tokens it used.
fn path_option(tokens: &[String], i: usize, name: &str) -> Option<(PathBuf, usize)> {
    let token = &tokens[i];
    if token == name {
        return tokens.get(i + 1).map(|next| (PathBuf::from(next), 1));
    }
    token
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .map(|value| (PathBuf::from(value), 0))
}
