//! Tracing setup
//!
//! The library only emits `tracing` events; nothing is printed unless the
//! embedding application installs a subscriber through one of these helpers.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RingConfig;

/// Target prefix of every event emitted by this crate
pub const LOG_TARGET: &str = env!("CARGO_CRATE_NAME");

static INIT: Once = Once::new();

/// Install a subscriber only if `RUST_LOG` is set.
pub fn init_tracing() {
    init_from_config(&RingConfig::default());
}

/// Install a subscriber from `config.log_filter`, falling back to
/// `RUST_LOG`. Does nothing when neither is set.
pub fn init_from_config(config: &RingConfig) {
    if let Some(directive) = resolve_directive(config, std::env::var("RUST_LOG").ok()) {
        install(build_filter(&directive));
    }
}

/// Install a subscriber with a custom filter. Later calls are ignored.
pub fn init_tracing_with_filter(filter: &str) {
    install(build_filter(filter));
}

/// Directive to install: the configured filter wins over `rust_log`.
pub fn resolve_directive(config: &RingConfig, rust_log: Option<String>) -> Option<String> {
    config
        .log_filter
        .clone()
        .or(rust_log)
        .filter(|d| !d.trim().is_empty())
}

/// A bare level such as `debug` is narrowed to this crate's events
/// (`cbuffer=debug`); directives naming targets are kept as written.
pub fn scoped_directive(directive: &str) -> String {
    let directive = directive.trim();
    if directive.parse::<LevelFilter>().is_ok() {
        format!("{}={}", LOG_TARGET, directive)
    } else {
        directive.to_string()
    }
}

/// Parse `directive`, falling back to warnings from this crate only.
pub fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(scoped_directive(directive))
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", LOG_TARGET)))
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // Buffer events go to stderr so they never mix with sample output.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}

/// Subscriber for tests, captured by the test harness
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
