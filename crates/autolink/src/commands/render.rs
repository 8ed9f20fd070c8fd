//! `autolink render` command implementation.

use std::path::PathBuf;

use autolink_config::{CliSettings, Config};
use autolink_renderer::{AutolinkOptions, Autolinker, Entity, EntityType};
use clap::{Args, ValueEnum};
use serde::Deserialize;

use crate::error::CliError;
use crate::output::Output;

/// Entity type filter for `--only`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OnlyKind {
    Url,
    Hashtag,
    Mention,
    Cashtag,
}

impl From<OnlyKind> for EntityType {
    fn from(kind: OnlyKind) -> Self {
        match kind {
            OnlyKind::Url => EntityType::Url,
            OnlyKind::Hashtag => EntityType::Hashtag,
            OnlyKind::Mention => EntityType::Mention,
            OnlyKind::Cashtag => EntityType::Cashtag,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document with `text` and `entities` (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover autolink.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only link entities of this type.
    #[arg(long, value_enum)]
    only: Option<OnlyKind>,

    /// Add rel="nofollow" to links (overrides config).
    #[arg(long)]
    no_follow: Option<bool>,

    /// Target attribute for URL links (overrides config).
    #[arg(long)]
    target: Option<String>,

    /// Keep the @ inside mention links (overrides config).
    #[arg(long)]
    include_at: Option<bool>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Input document: defused text plus entities located in it.
#[derive(Debug, Deserialize)]
struct RenderInput {
    text: String,
    #[serde(default)]
    entities: Vec<Entity>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input parsing or rendering fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            no_follow: self.no_follow,
            url_target: self.target,
            username_include_symbol: self.include_at,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let raw = super::read_input(self.input.as_deref())?;
        let input: RenderInput = serde_json::from_str(&raw)?;
        tracing::info!(
            entities = input.entities.len(),
            config = ?config.config_path,
            "Rendering input"
        );

        let autolinker = Autolinker::new(options_from_config(&config));
        let html = render_input(&autolinker, &input, self.only.map(EntityType::from))?;

        output.result(&html)?;
        Ok(())
    }
}

fn render_input(
    autolinker: &Autolinker,
    input: &RenderInput,
    only: Option<EntityType>,
) -> Result<String, CliError> {
    let html = match only {
        Some(kind) => autolinker.render_only(&input.text, &input.entities, kind)?,
        None => autolinker.render(&input.text, &input.entities)?,
    };
    Ok(html)
}

/// Build renderer options from loaded configuration.
pub(crate) fn options_from_config(config: &Config) -> AutolinkOptions {
    let mut options = AutolinkOptions::default();

    options.url_class.clone_from(&config.classes.url);
    options.list_class.clone_from(&config.classes.list);
    options.username_class.clone_from(&config.classes.username);
    options.hashtag_class.clone_from(&config.classes.hashtag);
    options.cashtag_class.clone_from(&config.classes.cashtag);

    options.username_url_base.clone_from(&config.url_bases.username);
    options.list_url_base.clone_from(&config.url_bases.list);
    options.hashtag_url_base.clone_from(&config.url_bases.hashtag);
    options.cashtag_url_base.clone_from(&config.url_bases.cashtag);

    options
        .invisible_tag_attrs
        .clone_from(&config.links.invisible_tag_attrs);
    options.no_follow = config.links.no_follow;
    options.username_include_symbol = config.links.username_include_symbol;
    options.symbol_tag.clone_from(&config.links.symbol_tag);
    options
        .text_with_symbol_tag
        .clone_from(&config.links.text_with_symbol_tag);
    options.url_target.clone_from(&config.links.url_target);

    options
}
