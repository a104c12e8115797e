//! Tracing setup shared by both binaries

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
///
/// Request lines from `actix_web::middleware::Logger` go through the `log`
/// crate and reach the subscriber via the `tracing-log` bridge, so
/// `actix_web` stays at `info`.
pub const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn,actix_server=warn";

/// Installs the global subscriber, honouring `RUST_LOG` and defaulting to [`DEFAULT_FILTER`]
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt().with_env_filter(env_filter).with_target(false).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_default_filter_quiets_server_internals_but_keeps_request_log() {
        assert!(DEFAULT_FILTER.contains("actix_server=warn"));
        assert!(!DEFAULT_FILTER.contains("actix_web="));
    }
}
