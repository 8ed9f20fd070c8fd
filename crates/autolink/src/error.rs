//! CLI error types.

use autolink_config::ConfigError;
use autolink_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Render(#[from] RenderError),
}
