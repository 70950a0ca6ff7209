//! Command handlers for the earthview binary.
//!
//! Each command lives in its own submodule and exposes a `handle_*` entry
//! point plus a `display_help` used by `earthview help <command>`.

pub mod help;
pub mod render;
pub mod times;

use anyhow::Result;

use crate::Instant;
use crate::config::{self, Config};

/// Load the configuration and report where it came from.
pub(crate) fn load_config(debug_enabled: bool) -> Result<Config> {
    let path = config::get_config_path()?;
    let config = Config::load()?;

    if debug_enabled {
        let source = if path.exists() {
            format!("configuration from {}", config::loading::private_path(&path))
        } else {
            "built-in defaults".to_string()
        };
        config.log_config(&source);
    }

    Ok(config)
}

/// The instant given with `--at`, or the current UTC time.
pub(crate) fn resolve_instant(at: Option<&str>) -> Result<Instant> {
    match at {
        Some(text) => Instant::parse(text),
        None => Ok(Instant::now_utc()),
    }
}
