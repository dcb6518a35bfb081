//! Translation catalog for one target locale.
//!
//! A [`Catalog`] is built once through a [`CatalogBuilder`], which rejects
//! duplicate keys and structurally invalid entries, and is immutable
//! afterwards. Entries are keyed by `(context, source text, comment)` and
//! iterate in the order they were inserted (document order for catalogs
//! loaded from a TS file).
//!
//! ## Examples
//!
//! ```
//! use linguist_rs_core::catalog::{Catalog, TranslationEntry};
//!
//! let mut builder = Catalog::builder("nl");
//! builder.insert(TranslationEntry::new("UIMessageCenter", "Close", "Sluiten")).unwrap();
//! builder.insert(TranslationEntry::plural(
//!     "UIMediumList",
//!     "%n disk(s)",
//!     vec!["%n schijf".into(), "%n schijven".into()],
//! )).unwrap();
//! let catalog = builder.build();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.tr("UIMessageCenter", "Close"), "Sluiten");
//! assert_eq!(catalog.trn("UIMediumList", "%n disk(s)", 3), "3 schijven");
//! assert_eq!(catalog.tr("UIMessageCenter", "Missing"), "Missing");
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LinguistError, LinguistResult};
use crate::resolver::{self, MessageRequest, ResolveOptions};

/// Context name reserved for catalog metadata (language names and similar).
pub const METADATA_CONTEXT: &str = "@@@";

/// Source language assumed when a catalog does not declare one.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Lifecycle state of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Reviewed and authoritative.
    #[default]
    Finished,
    /// Present but not yet approved by the translator.
    Unfinished,
    /// The source string no longer exists in the application.
    Vanished,
}

impl TranslationStatus {
    /// Returns `true` if the translation may be shown to users.
    pub const fn is_authoritative(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => write!(f, "finished"),
            Self::Unfinished => write!(f, "unfinished"),
            Self::Vanished => write!(f, "vanished"),
        }
    }
}

impl FromStr for TranslationStatus {
    type Err = LinguistError;

    /// Parses a TS `type` attribute. An empty value means finished;
    /// `obsolete` is the legacy spelling of `vanished`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "finished" => Ok(Self::Finished),
            "unfinished" => Ok(Self::Unfinished),
            "vanished" | "obsolete" => Ok(Self::Vanished),
            other => Err(LinguistError::ParseError(format!(
                "unknown translation type '{other}'"
            ))),
        }
    }
}

/// A source-code location where a message is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Source file, relative to the catalog.
    pub file: String,
    /// Line number, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// A single translatable message and its translation(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// The UI component the message belongs to.
    pub context: String,
    /// The original-language text.
    pub source_text: String,
    /// Disambiguates identical source texts within a context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// One string, N plural forms, or the length variants (longest first).
    pub translations: Vec<String>,
    /// Whether forms are selected by quantity.
    #[serde(default)]
    pub is_plural: bool,
    /// Whether a non-plural message stores length variants.
    #[serde(default)]
    pub has_variants: bool,
    /// Lifecycle state.
    #[serde(default)]
    pub status: TranslationStatus,
    /// Developer note for translators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    /// Translator's own note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    /// Source text of the previous revision, kept for reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Where the message is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl TranslationEntry {
    /// Creates a finished, non-plural entry with a single translation.
    pub fn new(
        context: impl Into<String>,
        source_text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self::with_translations(context, source_text, vec![translation.into()])
    }

    /// Creates a finished plural entry from its forms in locale order.
    pub fn plural(
        context: impl Into<String>,
        source_text: impl Into<String>,
        forms: Vec<String>,
    ) -> Self {
        let mut entry = Self::with_translations(context, source_text, forms);
        entry.is_plural = true;
        entry
    }

    /// Creates a finished entry with length variants (longest first).
    pub fn variants(
        context: impl Into<String>,
        source_text: impl Into<String>,
        variants: Vec<String>,
    ) -> Self {
        let mut entry = Self::with_translations(context, source_text, variants);
        entry.has_variants = entry.translations.len() > 1;
        entry
    }

    fn with_translations(
        context: impl Into<String>,
        source_text: impl Into<String>,
        translations: Vec<String>,
    ) -> Self {
        Self {
            context: context.into(),
            source_text: source_text.into(),
            comment: None,
            translations,
            is_plural: false,
            has_variants: false,
            status: TranslationStatus::Finished,
            extra_comment: None,
            translator_comment: None,
            old_source: None,
            locations: Vec::new(),
        }
    }

    /// Sets the disambiguating comment. An empty comment is stored as `None`.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    /// Sets the lifecycle state.
    #[must_use]
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a usage location.
    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: Option<u32>) -> Self {
        self.locations.push(Location {
            file: file.into(),
            line,
        });
        self
    }

    /// The comment as a key component (`""` when absent).
    pub fn comment_key(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Returns `true` if every stored translation is empty.
    pub fn is_blank(&self) -> bool {
        self.translations.iter().all(String::is_empty)
    }

    fn key(&self) -> EntryKey {
        entry_key(&self.context, &self.source_text, self.comment.as_deref())
    }
}

/// Lookup key: `(context, source, comment)`, with an absent comment stored
/// as `""`. Kept as separate fields so no field value can alias another
/// key.
type EntryKey = (String, String, String);

fn entry_key(context: &str, source_text: &str, comment: Option<&str>) -> EntryKey {
    (
        context.to_string(),
        source_text.to_string(),
        comment.unwrap_or("").to_string(),
    )
}

// ── Catalog ──────────────────────────────────────────────────────────────

/// An immutable set of translations for one target locale.
///
/// `Catalog` is `Send + Sync`; share it behind an `Arc` (see
/// [`Translator`](crate::translator::Translator)) for concurrent use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogSnapshot", into = "CatalogSnapshot")]
pub struct Catalog {
    language_code: String,
    source_language_code: String,
    entries: Vec<TranslationEntry>,
    index: HashMap<EntryKey, usize>,
}

impl Catalog {
    /// Starts building a catalog for `language_code`.
    pub fn builder(language_code: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder::new(language_code)
    }

    /// Creates a catalog with no entries.
    pub fn empty(language_code: impl Into<String>) -> Self {
        CatalogBuilder::new(language_code).build()
    }

    /// The target locale (e.g. `"nl"`, `"pt_BR"`).
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// The source locale (defaults to `"en"`).
    pub fn source_language_code(&self) -> &str {
        &self.source_language_code
    }

    /// Looks up the entry for the exact `(context, source, comment)` key.
    ///
    /// An absent comment matches only entries without a comment.
    pub fn lookup(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
    ) -> Option<&TranslationEntry> {
        self.index
            .get(&entry_key(context, source_text, comment))
            .map(|&i| &self.entries[i])
    }

    /// Returns the stored value of a metadata entry (context `@@@`).
    ///
    /// Metadata is keyed by source text alone: an entry without a comment
    /// wins, otherwise the first one in document order. Unlike resolution,
    /// blank values are returned as-is since metadata fields may be empty on
    /// purpose. Unfinished and vanished entries are ignored.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.lookup(METADATA_CONTEXT, key, None)
            .into_iter()
            .chain(
                self.entries
                    .iter()
                    .filter(|entry| entry.context == METADATA_CONTEXT && entry.source_text == key),
            )
            .find(|entry| entry.status.is_authoritative())
            .map(|entry| entry.translations.first().map_or("", String::as_str))
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.iter()
    }

    /// Distinct context names in order of first appearance.
    pub fn contexts(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.context.as_str())
            .filter(|context| seen.insert(*context))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts entries per lifecycle state.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.entries.len(),
            ..CatalogStats::default()
        };
        for entry in &self.entries {
            match entry.status {
                TranslationStatus::Finished => stats.finished += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Vanished => stats.vanished += 1,
            }
            if entry.is_plural {
                stats.plural += 1;
            }
            if entry.has_variants {
                stats.with_variants += 1;
            }
        }
        stats
    }

    /// Resolves a message against this catalog with default options.
    ///
    /// See [`resolver::resolve`] for the fallback rules.
    pub fn resolve<S: AsRef<str>>(
        &self,
        context: &str,
        source_text: &str,
        comment: Option<&str>,
        quantity: Option<i64>,
        args: &[S],
        size_hint: Option<usize>,
    ) -> String {
        let request = MessageRequest {
            context,
            source: source_text,
            comment,
            quantity,
            args: args.iter().map(|a| Cow::Borrowed(a.as_ref())).collect(),
            size_hint,
        };
        resolver::resolve(self, &request, &ResolveOptions::default())
    }

    /// Translates a simple message.
    pub fn tr(&self, context: &str, source_text: &str) -> String {
        resolver::resolve(
            self,
            &MessageRequest::new(context, source_text),
            &ResolveOptions::default(),
        )
    }

    /// Translates a plural message for `quantity`.
    pub fn trn(&self, context: &str, source_text: &str, quantity: i64) -> String {
        resolver::resolve(
            self,
            &MessageRequest::new(context, source_text).with_quantity(quantity),
            &ResolveOptions::default(),
        )
    }
}

/// Entry counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// All entries.
    pub total: usize,
    /// Entries usable as translations.
    pub finished: usize,
    /// Entries awaiting review.
    pub unfinished: usize,
    /// Entries whose source no longer exists.
    pub vanished: usize,
    /// Plural entries (any state).
    pub plural: usize,
    /// Entries with length variants (any state).
    pub with_variants: usize,
}

impl CatalogStats {
    /// Finished entries as a percentage of live (non-vanished) entries.
    /// An empty catalog is 100% complete.
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_percent(&self) -> f64 {
        let live = self.total - self.vanished;
        if live == 0 {
            100.0
        } else {
            self.finished as f64 / live as f64 * 100.0
        }
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries: {} finished, {} unfinished, {} vanished ({:.1}% complete)",
            self.total,
            self.finished,
            self.unfinished,
            self.vanished,
            self.completion_percent()
        )
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Validating builder for [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    language_code: String,
    source_language_code: String,
    entries: Vec<TranslationEntry>,
    index: HashMap<EntryKey, usize>,
}

impl CatalogBuilder {
    /// Creates a builder for `language_code` with `"en"` as source language.
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            source_language_code: DEFAULT_SOURCE_LANGUAGE.to_string(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Sets the source language. An empty code keeps the default.
    #[must_use]
    pub fn source_language(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        if !code.is_empty() {
            self.source_language_code = code;
        }
        self
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// - [`LinguistError::DuplicateEntry`] if the key is already present.
    /// - [`LinguistError::MalformedEntry`] if a finished entry carries no
    ///   translation at all.
    pub fn insert(&mut self, entry: TranslationEntry) -> LinguistResult<()> {
        if entry.translations.is_empty() && entry.status == TranslationStatus::Finished {
            let kind = if entry.is_plural { "plural" } else { "simple" };
            return Err(LinguistError::MalformedEntry(format!(
                "finished {kind} message '{}' in context '{}' has no translation",
                entry.source_text, entry.context
            )));
        }

        let key = entry.key();
        if self.index.contains_key(&key) {
            return Err(LinguistError::DuplicateEntry {
                context: entry.context,
                source_text: entry.source_text,
                comment: entry.comment.unwrap_or_default(),
            });
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Adds every entry, stopping at the first error.
    pub fn extend(
        &mut self,
        entries: impl IntoIterator<Item = TranslationEntry>,
    ) -> LinguistResult<()> {
        entries.into_iter().try_for_each(|entry| self.insert(entry))
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finishes the catalog.
    pub fn build(self) -> Catalog {
        tracing::debug!(
            language = %self.language_code,
            entries = self.entries.len(),
            "built translation catalog"
        );
        Catalog {
            language_code: self.language_code,
            source_language_code: self.source_language_code,
            entries: self.entries,
            index: self.index,
        }
    }
}

// ── Serialization ────────────────────────────────────────────────────────

/// Serialized form of a [`Catalog`]: language codes plus the entry list.
///
/// Deserializing a snapshot re-runs the builder's validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Target locale.
    pub language: String,
    /// Source locale.
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Entries in document order.
    #[serde(default)]
    pub messages: Vec<TranslationEntry>,
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

impl TryFrom<CatalogSnapshot> for Catalog {
    type Error = LinguistError;

    fn try_from(snapshot: CatalogSnapshot) -> Result<Self, Self::Error> {
        let mut builder =
            CatalogBuilder::new(snapshot.language).source_language(snapshot.source_language);
        builder.extend(snapshot.messages)?;
        Ok(builder.build())
    }
}

impl From<Catalog> for CatalogSnapshot {
    fn from(catalog: Catalog) -> Self {
        Self {
            language: catalog.language_code,
            source_language: catalog.source_language_code,
            messages: catalog.entries,
        }
    }
}
