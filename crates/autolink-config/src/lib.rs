//! Configuration management for autolink.
//!
//! Parses `autolink.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! URL bases support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ## Example
//!
//! ```toml
//! [classes]
//! url = "external"
//!
//! [url_bases]
//! username = "https://${SOCIAL_HOST:-twitter.com}/"
//!
//! [links]
//! no_follow = false
//! url_target = "_blank"
//! ```

mod expand;

use autolink_renderer::{
    DEFAULT_CASHTAG_CLASS, DEFAULT_CASHTAG_URL_BASE, DEFAULT_HASHTAG_CLASS,
    DEFAULT_HASHTAG_URL_BASE, DEFAULT_INVISIBLE_TAG_ATTRS, DEFAULT_LIST_CLASS,
    DEFAULT_LIST_URL_BASE, DEFAULT_USERNAME_CLASS, DEFAULT_USERNAME_URL_BASE,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the `rel="nofollow"` flag.
    pub no_follow: Option<bool>,
    /// Override the `target` attribute for URL links.
    pub url_target: Option<String>,
    /// Override whether mentions keep `@` inside the link.
    pub username_include_symbol: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "autolink.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSS classes per link type.
    pub classes: ClassesConfig,
    /// Href bases per link type.
    pub url_bases: UrlBasesConfig,
    /// Link markup options.
    pub links: LinksConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// CSS classes applied to generated links.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClassesConfig {
    /// Class for URL links (omitted when unset or empty).
    pub url: Option<String>,
    /// Class for list links.
    pub list: String,
    /// Class for username links.
    pub username: String,
    /// Class for hashtag links.
    pub hashtag: String,
    /// Class for cashtag links.
    pub cashtag: String,
}

impl Default for ClassesConfig {
    fn default() -> Self {
        Self {
            url: None,
            list: DEFAULT_LIST_CLASS.to_owned(),
            username: DEFAULT_USERNAME_CLASS.to_owned(),
            hashtag: DEFAULT_HASHTAG_CLASS.to_owned(),
            cashtag: DEFAULT_CASHTAG_CLASS.to_owned(),
        }
    }
}

/// Href bases; the entity value is appended to each.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UrlBasesConfig {
    /// Base for username links.
    pub username: String,
    /// Base for list links.
    pub list: String,
    /// Base for hashtag links.
    pub hashtag: String,
    /// Base for cashtag links.
    pub cashtag: String,
}

impl Default for UrlBasesConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME_URL_BASE.to_owned(),
            list: DEFAULT_LIST_URL_BASE.to_owned(),
            hashtag: DEFAULT_HASHTAG_URL_BASE.to_owned(),
            cashtag: DEFAULT_CASHTAG_URL_BASE.to_owned(),
        }
    }
}

/// Link markup options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Add `rel="nofollow"` to every link.
    pub no_follow: bool,
    /// Keep `@` inside mention links.
    pub username_include_symbol: bool,
    /// Tag wrapped around symbols (e.g. `"b"`).
    pub symbol_tag: Option<String>,
    /// Tag wrapped around the text after a symbol.
    pub text_with_symbol_tag: Option<String>,
    /// `target` attribute for URL links.
    pub url_target: Option<String>,
    /// Raw attribute string for invisible spans in shortened URLs.
    pub invisible_tag_attrs: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            no_follow: true,
            username_include_symbol: false,
            symbol_tag: None,
            text_with_symbol_tag: None,
            url_target: None,
            invisible_tag_attrs: DEFAULT_INVISIBLE_TAG_ATTRS.to_owned(),
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`url_bases.username`").
        field: String,
        /// Error message (e.g., "${`SOCIAL_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require an optional tag name to be a bare ASCII alphanumeric element name.
fn require_tag_name(tag: Option<&str>, field: &str) -> Result<(), ConfigError> {
    match tag {
        Some(tag) if !tag.is_empty() && !tag.chars().all(|c| c.is_ascii_alphanumeric()) => Err(
            ConfigError::Validation(format!("{field} must be a bare tag name like \"b\"")),
        ),
        _ => Ok(()),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `autolink.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(no_follow) = settings.no_follow {
            self.links.no_follow = no_follow;
        }
        if let Some(url_target) = &settings.url_target {
            self.links.url_target = Some(url_target.clone());
        }
        if let Some(include_symbol) = settings.username_include_symbol {
            self.links.username_include_symbol = include_symbol;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_url_bases()?;
        require_tag_name(self.links.symbol_tag.as_deref(), "links.symbol_tag")?;
        require_tag_name(
            self.links.text_with_symbol_tag.as_deref(),
            "links.text_with_symbol_tag",
        )?;
        Ok(())
    }

    /// Validate href bases.
    fn validate_url_bases(&self) -> Result<(), ConfigError> {
        for (value, field) in [
            (&self.url_bases.username, "url_bases.username"),
            (&self.url_bases.list, "url_bases.list"),
            (&self.url_bases.hashtag, "url_bases.hashtag"),
            (&self.url_bases.cashtag, "url_bases.cashtag"),
        ] {
            require_non_empty(value, field)?;
            require_http_url(value, field)?;
        }
        Ok(())
    }

    /// Expand environment variable references in URL bases.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let bases = &mut self.url_bases;
        bases.username = expand::expand_env(&bases.username, "url_bases.username")?;
        bases.list = expand::expand_env(&bases.list, "url_bases.list")?;
        bases.hashtag = expand::expand_env(&bases.hashtag, "url_bases.hashtag")?;
        bases.cashtag = expand::expand_env(&bases.cashtag, "url_bases.cashtag")?;
        Ok(())
    }
}
