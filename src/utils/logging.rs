//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays clean.

use crate::utils::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives added by `--verbose`, on top of whatever else is configured
const VERBOSE_DIRECTIVES: &[&str] = &["vitahealth=debug", "vitahealth_core=debug"];

/// Filter directive for the given settings. `verbose` wins over the config.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        VERBOSE_DIRECTIVES.join(",")
    } else {
        config.level.clone()
    }
}

/// Build the filter: `rust_log` when set, else the config level. `verbose`
/// forces debug for the client crates in both cases.
pub fn build_filter(rust_log: Option<&str>, config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let mut filter = match rust_log.filter(|s| !s.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG: {}", e);
            EnvFilter::new(&config.level)
        }),
        None => EnvFilter::new(filter_directive(config, false)),
    };

    if verbose {
        for directive in VERBOSE_DIRECTIVES {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(e) => eprintln!("Invalid log directive {}: {}", directive, e),
            }
        }
    }
    filter
}

/// Install the global subscriber.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), config, verbose);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_applies_on_top_of_rust_log() {
        let config = LoggingConfig::default();
        let filter = build_filter(Some("warn"), &config, true).to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("vitahealth=debug"));
        assert!(filter.contains("vitahealth_core=debug"));

        let quiet = build_filter(Some("warn"), &config, false).to_string();
        assert!(!quiet.contains("vitahealth=debug"));
    }

    #[test]
    fn test_verbose_overrides_level() {
        let config = LoggingConfig::default();
        assert_eq!(filter_directive(&config, false), "info");
        assert!(filter_directive(&config, true).contains("vitahealth_core=debug"));
    }
}
