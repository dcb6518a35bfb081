//! Logging integration for linguist-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-catalog spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info",
/// "`linguist_rs_ts=trace`"); an unparsable filter falls back to "info". In
/// debug mode a pretty, human-readable format is used; otherwise structured
/// JSON is written.
///
/// Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering work on one catalog.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::logging::catalog_span;
///
/// let span = catalog_span("nl");
/// let _guard = span.enter();
/// tracing::info!("loading catalog");
/// ```
pub fn catalog_span(language: &str) -> tracing::Span {
    tracing::info_span!("catalog", language = language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let settings = Settings {
            log_level: "not a [valid filter".to_string(),
            ..Settings::default()
        };
        setup_logging(&settings);
        setup_logging(&Settings::default());
    }

    #[test]
    fn test_catalog_span_enters() {
        let span = catalog_span("pt_BR");
        let _guard = span.enter();
        tracing::debug!("inside catalog span");
    }
}
