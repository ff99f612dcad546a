//! Configuration utility functions
//!
//! Helpers for reading configuration values from environment variables.
//! Every helper takes a lookup function so callers decide where values come
//! from; [`process_env`] reads the real process environment.

use std::path::PathBuf;

/// Reads `key` from the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a non-empty string value
pub fn env_string<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|val| !val.trim().is_empty())
}

/// Get a path value
pub fn env_path<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env_string(lookup, key).map(PathBuf::from)
}

/// Get a usize value; values that do not parse are treated as unset
pub fn env_usize<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match env_string(lookup, key) {
        Some(val) => match val.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a non-negative integer", key, val);
                None
            }
        },
        None => None,
    }
}
