//! # linguist-rs-ts
//!
//! Loaders that turn translation files into a
//! [`Catalog`](linguist_rs_core::Catalog).
//!
//! - [`load_catalog`] / [`load_catalog_file`] read Qt Linguist `.ts` XML.
//! - [`json`] reads and writes serde snapshots of a catalog.
//!
//! ```
//! let ts = br#"<?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE TS>
//! <TS version="2.1" language="nl">
//! <context>
//!     <name>UIActionPool</name>
//!     <message>
//!         <source>&amp;Close</source>
//!         <translation>&amp;Sluiten</translation>
//!     </message>
//! </context>
//! </TS>"#;
//! let catalog = linguist_rs_ts::load_catalog(ts).unwrap();
//! assert_eq!(catalog.tr("UIActionPool", "&Close"), "&Sluiten");
//! ```

pub mod json;
mod ts;

use std::path::Path;

use linguist_rs_core::logging::catalog_span;
use linguist_rs_core::{Catalog, LinguistError, LinguistResult, Settings};

/// Parses a TS document.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Errors
///
/// - [`LinguistError::ParseError`] for invalid UTF-8, malformed XML, an
///   unknown `type` attribute or a bad `<byte>` value.
/// - [`LinguistError::MissingField`] when a context lacks `<name>` or a
///   message lacks `<source>` / `<translation>`.
/// - [`LinguistError::DuplicateEntry`] when two messages share a key.
pub fn load_catalog(bytes: &[u8]) -> LinguistResult<Catalog> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LinguistError::ParseError(format!("TS document is not valid UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let catalog = ts::parse(text)?;

    let span = catalog_span(catalog.language_code());
    let _guard = span.enter();
    tracing::info!(
        entries = catalog.len(),
        contexts = catalog.contexts().len(),
        "Loaded TS catalog"
    );
    Ok(catalog)
}

/// Reads and parses a TS file.
///
/// # Errors
///
/// Returns [`LinguistError::IoError`] if the file cannot be read, or any
/// error of [`load_catalog`].
pub fn load_catalog_file(path: impl AsRef<Path>) -> LinguistResult<Catalog> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading TS file");
    let bytes = std::fs::read(path)?;
    load_catalog(&bytes)
}

/// Loads the catalog configured by `settings` (`<catalog_dir>/<language_code>.ts`).
///
/// # Errors
///
/// Returns [`LinguistError::ConfigurationError`] when no catalog directory
/// is configured, or any error of [`load_catalog_file`].
pub fn load_configured_catalog(settings: &Settings) -> LinguistResult<Catalog> {
    let path = settings.catalog_path().ok_or_else(|| {
        LinguistError::ConfigurationError("catalog_dir is not set".to_string())
    })?;
    let catalog = load_catalog_file(&path)?;
    for (field, configured, declared) in language_mismatches(&catalog, settings) {
        tracing::warn!(
            field,
            configured,
            declared,
            path = %path.display(),
            "Catalog declares a different language than configured"
        );
    }
    Ok(catalog)
}

/// `(setting, configured, declared)` for each language the catalog header
/// disagrees with.
fn language_mismatches<'a>(
    catalog: &'a Catalog,
    settings: &'a Settings,
) -> Vec<(&'static str, &'a str, &'a str)> {
    [
        ("language_code", settings.language_code.as_str(), catalog.language_code()),
        (
            "source_language_code",
            settings.source_language_code.as_str(),
            catalog.source_language_code(),
        ),
    ]
    .into_iter()
    .filter(|(_, configured, declared)| configured != declared)
    .collect()
}
