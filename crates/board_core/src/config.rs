use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "board.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_filter: String,
    pub window_title: String,
    pub show_help_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            window_title: "Order Board".into(),
            show_help_on_start: false,
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse board settings")
    }

    /// Applies environment overrides. `APP__*` names win over the short names.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BOARD_LOG_FILTER") {
            self.log_filter = v;
        }
        if let Some(v) = lookup("APP__LOG_FILTER") {
            self.log_filter = v;
        }

        if let Some(v) = lookup("BOARD_WINDOW_TITLE") {
            self.window_title = v;
        }
        if let Some(v) = lookup("APP__WINDOW_TITLE") {
            self.window_title = v;
        }

        if let Some(v) = lookup("APP__SHOW_HELP_ON_START") {
            match parse_flag(&v) {
                Some(flag) => self.show_help_on_start = flag,
                None => tracing::warn!(value = %v, "ignoring invalid APP__SHOW_HELP_ON_START"),
            }
        }
    }
}

/// Loads settings from `path` (or `board.toml` in the working directory),
/// then applies environment overrides. A missing file means defaults; an
/// unreadable or malformed one is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    })
}

pub fn load_settings_with<F>(path: Option<&Path>, lookup: F) -> anyhow::Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => Settings::from_toml_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    settings.apply_env(lookup);
    Ok(settings)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
