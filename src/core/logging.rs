//! Tracing subscriber setup
//!
//! Both binaries log through `tracing` with bracketed subsystem tags
//! (`[MOVE]`, `[PROMOTION]`, ...). The filter comes from `--log` when given,
//! otherwise from `RUST_LOG`, otherwise [`DEFAULT_FILTER`].

use crate::core::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,wgpu=error,naga=warn";

/// Build the filter for `directive`, falling back to the environment
pub fn build_filter(directive: Option<&str>) -> CoreResult<EnvFilter> {
    match directive {
        Some(filter) => EnvFilter::try_new(filter).map_err(|e| CoreError::LogFilter {
            filter: filter.to_string(),
            message: e.to_string(),
        }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install the global fmt subscriber
pub fn init_tracing(directive: Option<&str>) -> CoreResult<()> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| CoreError::LoggingInit {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_is_parsed() {
        assert!(build_filter(Some("debug,hotseat_board=trace")).is_ok());
    }

    #[test]
    fn test_malformed_filter_is_rejected() {
        let result = build_filter(Some("hotseat_board=notalevel"));
        assert!(matches!(result, Err(CoreError::LogFilter { .. })));
    }
}
