//! # linguist-rs-core
//!
//! Catalog model and runtime resolution for Qt Linguist translations.
//! This crate knows nothing about file formats; loaders such as
//! `linguist-rs-ts` build a [`Catalog`] through [`CatalogBuilder`].
//!
//! ## Modules
//!
//! - [`catalog`] - Entries, lifecycle states and the immutable catalog
//! - [`resolver`] - Message lookup with source-text fallback
//! - [`plural`] - Per-locale plural rules and form selection
//! - [`substitute`] - `%1`, `%n` and `%%` expansion
//! - [`variant`] - Length-variant selection
//! - [`translator`] - Atomic publication of the active catalog
//! - [`lazy`] - Messages resolved at display time
//! - [`checks`] - Catalog diagnostics
//! - [`settings`] / [`settings_loader`] - Configuration
//! - [`logging`] - Tracing-based logging integration
//! - [`error`] - Error types and result aliases

pub mod catalog;
pub mod checks;
pub mod error;
pub mod lazy;
pub mod logging;
pub mod plural;
pub mod resolver;
pub mod settings;
pub mod settings_loader;
pub mod substitute;
pub mod translator;
pub mod variant;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, CatalogBuilder, CatalogStats, TranslationEntry, TranslationStatus};
pub use error::{LinguistError, LinguistResult};
pub use lazy::LazyMessage;
pub use resolver::{resolve, MessageRequest, ResolveOptions};
pub use settings::{Settings, SETTINGS};
pub use translator::Translator;
