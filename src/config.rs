//! Resolution of the key file's location: `--key-file` flag, then the
//! `GITSEAL_KEY` env var, then the platform config dir. This keeps the
//! path out of `keystore`/`engine` entirely — they only ever see a `&Path`.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const KEY_ENV: &str = "GITSEAL_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine the platform configuration directory; pass --key-file explicitly")]
    KeyDirUnavailable,
}

/// Resolves the key-file path in priority order: an explicit CLI flag,
/// then `GITSEAL_KEY`, then `<config dir>/gitseal/master.key`.
pub fn resolve_key_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    if let Ok(path) = env::var(KEY_ENV) {
        return Ok(PathBuf::from(path));
    }

    crate::keystore::default_key_path().ok_or(ConfigError::KeyDirUnavailable)
}
