//! Core error types for linguist-rs.
//!
//! Resolution never fails: a missing or unusable translation degrades to the
//! source text. The errors here are raised only while a catalog is being
//! built or loaded, or while settings are read.

use thiserror::Error;

/// The primary error type for linguist-rs.
#[derive(Error, Debug)]
pub enum LinguistError {
    // ── Catalog construction ─────────────────────────────────────────

    /// Two entries share the same `(context, source, comment)` key.
    #[error("Duplicate entry in context '{context}' for source '{source_text}' (comment: '{comment}')")]
    DuplicateEntry {
        /// The context name of the clashing entry.
        context: String,
        /// The source text of the clashing entry.
        source_text: String,
        /// The disambiguating comment (empty when absent).
        comment: String,
    },

    /// A required element or attribute is absent.
    #[error("Missing required field '{field}' in <{element}>")]
    MissingField {
        /// The element that should have carried the field.
        element: String,
        /// The missing child element or attribute.
        field: String,
    },

    /// An entry is structurally invalid (e.g. a finished plural message
    /// without any forms).
    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    // ── Loading ──────────────────────────────────────────────────────

    /// The catalog source could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A locale identifier was empty or malformed.
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LinguistError {
    /// Returns `true` if the error indicates a corrupt catalog resource
    /// rather than an environment or configuration problem.
    pub const fn is_corrupt_catalog(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEntry { .. }
                | Self::MissingField { .. }
                | Self::MalformedEntry(_)
                | Self::ParseError(_)
        )
    }
}

/// A convenience type alias for `Result<T, LinguistError>`.
pub type LinguistResult<T> = Result<T, LinguistError>;
