//! CLI command implementations.

pub(crate) mod defuse;
pub(crate) mod render;

use std::io::Read;
use std::path::Path;

pub(crate) use defuse::DefuseArgs;
pub(crate) use render::RenderArgs;

/// Read command input from a file, or stdin when `path` is `None` or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
