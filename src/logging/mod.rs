//! Diagnostic logging to stderr, filtered by `RUST_LOG`.
//!
//! Game text goes to stdout; logs never do, so they cannot garble the screen.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Used when `RUST_LOG` is unset or invalid.
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Warn,
            module_filters: Vec::new(),
            show_targets: true,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(show_targets)
            .compact();

        // A test harness may already have installed one
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_string() {
        let config = TracingConfig {
            default_level: LogLevel::Info,
            module_filters: vec![("thousand_rooms::combat".to_string(), LogLevel::Debug)],
            show_targets: false,
        };
        assert_eq!(config.to_env_filter_string(), "info,thousand_rooms::combat=debug");
    }

    #[test]
    fn test_default_is_quiet() {
        assert_eq!(TracingConfig::default().to_env_filter_string(), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(&TracingConfig::default());
        init_tracing(&TracingConfig::default());
    }
}
