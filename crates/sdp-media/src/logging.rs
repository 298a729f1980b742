//! Subscriber helpers for hosts that want to see negotiation logs.
//!
//! The crate only emits `tracing` events under the `rvoip_sdp_media` target.
//! [`negotiation_filter`] turns a level into a filter for that target on top
//! of `RUST_LOG`, and [`init_negotiation_logging`] installs a subscriber
//! with it.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, SdpMediaError};

/// Target used by every event this crate emits
pub const LOG_TARGET: &str = "rvoip_sdp_media";

/// Build a filter enabling `level` for negotiation events.
///
/// Directives from `RUST_LOG` are kept; the negotiation target directive is
/// added last so it wins for this crate.
pub fn negotiation_filter(level: Level) -> Result<EnvFilter> {
    let directive: Directive = format!("{}={}", LOG_TARGET, level.as_str().to_ascii_lowercase())
        .parse()
        .map_err(|e| SdpMediaError::logging(format!("bad filter directive: {}", e)))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Install a global fmt subscriber showing negotiation events at `level`.
///
/// Returns an error when a global subscriber is already set.
pub fn init_negotiation_logging(level: Level, json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(negotiation_filter(level)?);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| SdpMediaError::logging(e.to_string()))
}

/// Parse a log level name such as `debug` or `WARN`
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level)
        .map_err(|_| SdpMediaError::invalid_config(format!("Invalid log level: {}", level)))
}
