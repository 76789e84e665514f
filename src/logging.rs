// SPDX-License-Identifier: MPL-2.0
//! Structured logging setup.
//!
//! The filter comes from `REPLAY_REPEAT_LOG`, then `RUST_LOG`, and otherwise
//! defaults to `info` (`debug` with `--verbose`).

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter directive.
pub const ENV_LOG_FILTER: &str = "REPLAY_REPEAT_LOG";

/// Installs the global subscriber. Later calls only report that one is
/// already installed.
pub fn init(verbose: bool) {
    let directive = std::env::var(ENV_LOG_FILTER)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    match directive {
        Some(value) => EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        None if verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("info"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init(false);
        init(true);
    }

    #[test]
    fn verbose_defaults_to_debug() {
        assert_eq!(build_filter(None, true).to_string(), "debug");
        assert_eq!(build_filter(None, false).to_string(), "info");
    }

    #[test]
    fn explicit_directive_wins_over_verbose() {
        let filter = build_filter(Some("replay_repeat=trace"), false);
        assert_eq!(filter.to_string(), "replay_repeat=trace");
    }

    #[test]
    fn invalid_directive_falls_back_to_info() {
        assert_eq!(build_filter(Some("replay_repeat=loud"), true).to_string(), "info");
    }
}
