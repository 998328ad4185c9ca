//! Configuration management for the wikitext markup engine.
//!
//! Parses `wikitext.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [html]
//! xhtml = true
//! native_font = false
//!
//! [markup]
//! directives = ["image"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override self-closing void elements.
    pub xhtml: Option<bool>,
    /// Override native `<font>` emission for styled spans.
    pub native_font: Option<bool>,
    /// Override the enabled directive list.
    pub directives: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wikitext.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML output configuration.
    pub html: HtmlConfig,
    /// Markup recognition configuration.
    pub markup: MarkupConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Write void elements in XML form (`<img .../>`).
    pub xhtml: bool,
    /// Re-express styled spans as native `<font>` elements.
    pub native_font: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            xhtml: true,
            native_font: true,
        }
    }
}

/// Markup recognition configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Names of the directives recognized in phrase content, in match priority order.
    pub directives: Vec<String>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            directives: vec!["image".to_owned()],
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wikitext.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and take precedence over config
    /// file values. Validation runs on the final result.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(xhtml) = settings.xhtml {
            self.html.xhtml = xhtml;
        }
        if let Some(native_font) = settings.native_font {
            self.html.native_font = native_font;
        }
        if let Some(directives) = &settings.directives {
            self.markup.directives.clone_from(directives);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file starting at `start` and walking up to the root.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a directive name is empty or listed twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let directives = &self.markup.directives;
        for (idx, name) in directives.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "markup.directives cannot contain empty names".to_owned(),
                ));
            }
            if directives[..idx].contains(name) {
                return Err(ConfigError::Validation(format!(
                    "markup.directives lists {name:?} more than once"
                )));
            }
        }
        Ok(())
    }
}
