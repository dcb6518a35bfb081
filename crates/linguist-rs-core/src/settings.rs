//! Settings for linguist-rs.
//!
//! This module provides the [`Settings`] struct, which holds the runtime
//! configuration of the translation engine, and [`LazySettings`], a
//! globally-accessible, lazily-initialized settings instance.

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.language_code, "en");
/// assert!(!settings.comment_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (human-readable logs).
    pub debug: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "debug", "`linguist_rs_core=trace`").
    pub log_level: String,

    // ── Internationalization ─────────────────────────────────────────

    /// The target locale to load at startup (e.g. "nl", "`pt_BR`").
    pub language_code: String,
    /// The locale source strings are written in.
    pub source_language_code: String,
    /// Directory holding `<language_code>.ts` catalogs.
    pub catalog_dir: Option<PathBuf>,

    // ── Resolution ───────────────────────────────────────────────────

    /// Retry a lookup without the comment when the exact key is missing.
    pub comment_fallback: bool,
    /// Width used to pick length variants when a request gives none.
    pub default_size_hint: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            source_language_code: "en".to_string(),
            catalog_dir: None,
            comment_fallback: false,
            default_size_hint: None,
        }
    }
}

impl Settings {
    /// Path of the catalog for the configured language, if a catalog
    /// directory is set.
    ///
    /// ```
    /// use linguist_rs_core::settings::Settings;
    ///
    /// let settings = Settings {
    ///     language_code: "nl".into(),
    ///     catalog_dir: Some("nls".into()),
    ///     ..Settings::default()
    /// };
    /// assert_eq!(settings.catalog_path().unwrap(), std::path::Path::new("nls/nl.ts"));
    /// ```
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.ts", self.language_code)))
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` before configuration.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup, then
/// access settings via `SETTINGS.get()` anywhere.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(!s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.language_code, "en");
        assert_eq!(s.source_language_code, "en");
        assert!(s.catalog_dir.is_none());
        assert!(!s.comment_fallback);
        assert!(s.default_size_hint.is_none());
    }

    #[test]
    fn test_catalog_path() {
        let mut s = Settings::default();
        assert!(s.catalog_path().is_none());
        s.catalog_dir = Some(PathBuf::from("/opt/app/nls"));
        s.language_code = "pt_BR".to_string();
        assert_eq!(s.catalog_path().unwrap(), PathBuf::from("/opt/app/nls/pt_BR.ts"));
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());
        assert!(lazy.try_get().is_none());

        let settings = Settings {
            language_code: "nl".to_string(),
            ..Settings::default()
        };

        lazy.configure(settings);
        assert!(lazy.is_configured());
        assert_eq!(lazy.get().language_code, "nl");
    }

    #[test]
    #[should_panic(expected = "already been configured")]
    fn test_lazy_settings_double_configure_panics() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default());
        lazy.configure(Settings::default());
    }

    #[test]
    #[should_panic(expected = "not been configured")]
    fn test_lazy_settings_get_before_configure_panics() {
        let lazy = LazySettings::new();
        let _ = lazy.get();
    }
}
