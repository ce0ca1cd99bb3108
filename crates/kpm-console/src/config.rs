//! Console configuration
//!
//! Settings come from `console.toml` in the kpm home directory
//! (`$KPM_HOME`, falling back to `~/.kpm`), then from `KPM_*` environment
//! variables. Every field has a default so an empty or missing file is valid.

use crate::error::{ConsoleError, Result};
use crate::ui::spinner::DEFAULT_INTERVAL;
use crate::ui::stream::DEFAULT_COLUMNS;
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What an activity does when the status stream is not a terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityFallback {
    /// Write nothing
    #[default]
    Silent,
    /// Write the first label as a plain line
    Plain,
}

impl ActivityFallback {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" => Some(Self::Silent),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }
}

/// Reporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Tool name shown by `header`
    pub tool_name: String,
    /// Tool version shown by `header`
    pub tool_version: String,
    /// Delay between spinner frames
    pub spinner_interval_ms: u64,
    /// Width used when the terminal size is unknown
    pub fallback_columns: u16,
    /// Activity behaviour on non-interactive output
    pub activity_fallback: ActivityFallback,
    /// Prefix the footer with ✨
    pub emoji: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tool_name: "kpm".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            spinner_interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            fallback_columns: DEFAULT_COLUMNS,
            activity_fallback: ActivityFallback::Silent,
            emoji: true,
        }
    }
}

/// kpm home directory: `$KPM_HOME`, or `~/.kpm`.
pub fn try_kpm_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("KPM_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".kpm"))
}

/// Default config location: `<kpm home>/console.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    try_kpm_home().map(|home| home.join("console.toml"))
}

impl ConsoleConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConsoleError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else defaults. Environment overrides are applied last.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match default_config_path() {
                Some(default) if default.exists() => Self::load(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `KPM_*` overrides from the process environment.
    ///
    /// Variables whose name or value is not UTF-8 are skipped.
    pub fn apply_env(&mut self) {
        self.apply_env_from(utf8_vars(std::env::vars_os()));
    }

    /// Apply overrides from `(name, value)` pairs.
    ///
    /// Recognised: `KPM_SPINNER_INTERVAL_MS`, `KPM_COLUMNS`, `KPM_ACTIVITY`
    /// (`silent`/`plain`), `KPM_NO_EMOJI` (any non-empty value). Unparseable
    /// values are ignored.
    pub fn apply_env_from<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in vars {
            let value = value.as_ref();
            match name.as_ref() {
                "KPM_SPINNER_INTERVAL_MS" => {
                    if let Ok(ms) = value.trim().parse() {
                        self.spinner_interval_ms = ms;
                    }
                }
                "KPM_COLUMNS" => {
                    if let Ok(columns) = value.trim().parse() {
                        self.fallback_columns = columns;
                    }
                }
                "KPM_ACTIVITY" => {
                    if let Some(fallback) = ActivityFallback::parse(value) {
                        self.activity_fallback = fallback;
                    } else {
                        tracing::debug!(value, "ignoring unknown KPM_ACTIVITY");
                    }
                }
                "KPM_NO_EMOJI" if !value.is_empty() => self.emoji = false,
                _ => {}
            }
        }
    }

    /// Spinner frame delay, never zero.
    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms.max(1))
    }
}

/// Keep only pairs where both name and value are valid UTF-8.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
}
