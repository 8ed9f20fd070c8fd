//! `autolink defuse` command implementation.

use std::path::PathBuf;

use autolink_renderer::escape_brackets;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the defuse command.
#[derive(Args)]
pub(crate) struct DefuseArgs {
    /// Raw text file (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl DefuseArgs {
    /// Execute the defuse command.
    ///
    /// Entity offsets for `render` must be computed against this output.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let text = super::read_input(self.input.as_deref())?;
        let text = text.strip_suffix('\n').unwrap_or(&text);
        output.result(&escape_brackets(text))?;
        Ok(())
    }
}
