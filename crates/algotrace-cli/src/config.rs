//! Limits resolved from flags, then environment, then built-in defaults.
//!
//! Environment variables:
//! - `ALGOTRACE_MAX_DEPTH`: recursion depth limit for `record`
//! - `ALGOTRACE_MAX_STEPS`: step limit for `record`
//! - `ALGOTRACE_MAX_ATTEMPTS`: retry cap for `generate`

use algotrace_engine::generator::DEFAULT_MAX_ATTEMPTS;
use algotrace_engine::RecorderConfig;

pub const ENV_MAX_DEPTH: &str = "ALGOTRACE_MAX_DEPTH";
pub const ENV_MAX_STEPS: &str = "ALGOTRACE_MAX_STEPS";
pub const ENV_MAX_ATTEMPTS: &str = "ALGOTRACE_MAX_ATTEMPTS";

/// Picks the flag value, else the parsed environment variable, else `default`.
/// An environment value that does not parse is an error, not a silent default.
pub fn layered<T: std::str::FromStr>(
    flag: Option<T>,
    var: &str,
    default: T,
) -> Result<T, String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{var}={raw:?} is not a valid number")),
        Err(_) => Ok(default),
    }
}

pub fn recorder_config(
    max_depth: Option<usize>,
    max_steps: Option<usize>,
) -> Result<RecorderConfig, String> {
    let defaults = RecorderConfig::default();
    Ok(RecorderConfig {
        max_depth: layered(max_depth, ENV_MAX_DEPTH, defaults.max_depth)?,
        max_steps: layered(max_steps, ENV_MAX_STEPS, defaults.max_steps)?,
    })
}

pub fn max_attempts(flag: Option<u32>) -> Result<u32, String> {
    layered(flag, ENV_MAX_ATTEMPTS, DEFAULT_MAX_ATTEMPTS)
}
