//! Catalog diagnostics.
//!
//! Loading accepts any well-formed catalog; the checks here report content
//! that loads fine but will render poorly at runtime, such as a plural entry
//! with the wrong number of forms or a translation that drops a `%1`.
//!
//! ## Overview
//!
//! - [`CheckMessage`]: A diagnostic message (level, message, hint, object, id).
//! - [`CheckLevel`]: Severity level (Debug, Info, Warning, Error, Critical).
//! - [`CheckRegistry`]: Registry for check functions with tag-based filtering.
//!
//! ## Built-in checks
//!
//! | Id | Level | Condition |
//! |---|---|---|
//! | `catalog.E001` | Error | the catalog has no language code |
//! | `catalog.W001` | Warning | plural form count differs from the locale rule |
//! | `catalog.W002` | Warning | a finished translation drops a `%N` placeholder of its source |
//! | `catalog.W003` | Warning/Info | a plural form omits `%n` although the source uses it |
//! | `catalog.W004` | Warning | plural entries exist but the locale has no plural rule |
//! | `catalog.I001` | Info | the catalog has unfinished entries |
//!
//! ## Examples
//!
//! ```
//! use linguist_rs_core::catalog::{Catalog, TranslationEntry};
//! use linguist_rs_core::checks::CheckRegistry;
//!
//! let mut builder = Catalog::builder("nl");
//! builder.insert(TranslationEntry::new("UIVMInfo", "Name: %1", "Naam")).unwrap();
//! let catalog = builder.build();
//!
//! let messages = CheckRegistry::with_builtins().run_checks(None, &catalog);
//! assert_eq!(messages[0].id.as_deref(), Some("catalog.W002"));
//! ```

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::{Catalog, TranslationEntry, TranslationStatus, METADATA_CONTEXT};
use crate::plural::{self, PluralRule};
use crate::variant;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Debugging information.
    Debug = 0,
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
    /// The catalog is unusable.
    Critical = 4,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A diagnostic message produced by a catalog check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// The human-readable message describing the issue.
    pub msg: String,
    /// An optional hint on how to fix the issue.
    pub hint: Option<String>,
    /// The entry the issue relates to, as `context::source`.
    pub obj: Option<String>,
    /// A unique identifier for this check message (e.g. "catalog.W001").
    pub id: Option<String>,
}

impl CheckMessage {
    /// Creates a new `CheckMessage` with the given level and details.
    pub fn new(
        level: CheckLevel,
        msg: impl Into<String>,
        hint: Option<&str>,
        obj: Option<&str>,
        id: Option<&str>,
    ) -> Self {
        Self {
            level,
            msg: msg.into(),
            hint: hint.map(String::from),
            obj: obj.map(String::from),
            id: id.map(String::from),
        }
    }

    /// Creates an info-level message.
    pub fn info(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Info, msg, hint, obj, id)
    }

    /// Creates a warning-level message.
    pub fn warning(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Warning, msg, hint, obj, id)
    }

    /// Creates an error-level message.
    pub fn error(msg: impl Into<String>, hint: Option<&str>, obj: Option<&str>, id: Option<&str>) -> Self {
        Self::new(CheckLevel::Error, msg, hint, obj, id)
    }

    /// Returns `true` if this is a warning or higher severity.
    pub fn is_serious(&self) -> bool {
        self.level >= CheckLevel::Warning
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref id) = self.id {
            write!(f, "({id}) ")?;
        }
        write!(f, "{}: {}", self.level, self.msg)?;
        if let Some(ref obj) = self.obj {
            write!(f, "\n\tEntry: {obj}")?;
        }
        if let Some(ref hint) = self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        Ok(())
    }
}

/// A check function that inspects a catalog and returns diagnostic messages.
pub type CheckFn = fn(&Catalog) -> Vec<CheckMessage>;

struct RegisteredCheck {
    func: CheckFn,
    tags: Vec<String>,
}

/// Registry for catalog check functions.
///
/// Check functions can be registered with tags, and then run all at once
/// or filtered by tag.
pub struct CheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl CheckRegistry {
    /// Creates a new empty check registry.
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Creates a new check registry pre-loaded with built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(check_language_code, &["catalog", "metadata"]);
        registry.register(check_plural_form_count, &["catalog", "plural"]);
        registry.register(check_plural_rule_known, &["catalog", "plural"]);
        registry.register(check_placeholders, &["catalog", "placeholders"]);
        registry.register(check_quantity_marker, &["catalog", "plural", "placeholders"]);
        registry.register(check_unfinished, &["catalog", "progress"]);
        registry
    }

    /// Registers a check function with the given tags.
    pub fn register(&mut self, func: CheckFn, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs all registered checks (or only those carrying one of `tags`)
    /// and collects the messages, most severe first.
    pub fn run_checks(&self, tags: Option<&[&str]>, catalog: &Catalog) -> Vec<CheckMessage> {
        let mut messages: Vec<CheckMessage> = self
            .checks
            .iter()
            .filter(|check| {
                tags.map_or(true, |wanted| {
                    wanted.iter().any(|t| check.tags.iter().any(|own| own == t))
                })
            })
            .flat_map(|check| (check.func)(catalog))
            .collect();

        // Stable, so entries keep catalog order within a level.
        messages.sort_by(|a, b| b.level.cmp(&a.level));
        tracing::debug!(
            language = catalog.language_code(),
            count = messages.len(),
            "Catalog checks finished"
        );
        messages
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================
// Built-in checks
// ============================================================

fn entry_label(entry: &TranslationEntry) -> String {
    format!("{}::{}", entry.context, entry.source_text)
}

/// Entries whose translations are rendered at runtime.
fn live_entries(catalog: &Catalog) -> impl Iterator<Item = &TranslationEntry> {
    catalog.entries().filter(|entry| {
        entry.status == TranslationStatus::Finished
            && entry.context != METADATA_CONTEXT
            && !entry.is_blank()
    })
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%(%|L?(\d+)|L?n)").expect("placeholder pattern is valid"))
}

/// Positional indices used in `text`, ignoring `%%` escapes.
fn positional_placeholders(text: &str) -> BTreeSet<usize> {
    placeholder_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(2))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Whether `text` contains a `%n` / `%Ln` marker outside `%%` escapes.
fn has_quantity_marker(text: &str) -> bool {
    placeholder_regex()
        .captures_iter(text)
        .any(|caps| caps.get(1).is_some_and(|m| m.as_str().ends_with('n')))
}

/// Whether the category stored at `index` covers exactly one quantity
/// (e.g. English `one`), in which case the form may spell the number out.
fn is_single_value_form(rule: &PluralRule, index: usize) -> bool {
    (0..=1000).filter(|q| rule.form_index(*q) == index).take(2).count() == 1
}

/// `catalog.E001`
fn check_language_code(catalog: &Catalog) -> Vec<CheckMessage> {
    if catalog.language_code().trim().is_empty() {
        vec![CheckMessage::error(
            "Catalog has no language code; English plural rules will be used.",
            Some("Set the `language` attribute of the <TS> element."),
            None,
            Some("catalog.E001"),
        )]
    } else {
        Vec::new()
    }
}

/// `catalog.W001`
fn check_plural_form_count(catalog: &Catalog) -> Vec<CheckMessage> {
    let rule = plural::rule_for(catalog.language_code());
    live_entries(catalog)
        .filter(|entry| entry.is_plural && entry.translations.len() != rule.form_count())
        .map(|entry| {
            CheckMessage::warning(
                format!(
                    "Plural entry has {} form(s) but '{}' uses {} ({}).",
                    entry.translations.len(),
                    catalog.language_code(),
                    rule.form_count(),
                    rule.name(),
                ),
                Some("Out-of-range quantities will use the last stored form."),
                Some(&entry_label(entry)),
                Some("catalog.W001"),
            )
        })
        .collect()
}

/// `catalog.W004`
fn check_plural_rule_known(catalog: &Catalog) -> Vec<CheckMessage> {
    let language = catalog.language_code();
    let has_plurals = catalog.entries().any(|entry| entry.is_plural);
    if has_plurals && !language.trim().is_empty() && !plural::builtin_registry().is_known(language)
    {
        vec![CheckMessage::warning(
            format!("No plural rule is registered for '{language}'; English rules apply."),
            None,
            None,
            Some("catalog.W004"),
        )]
    } else {
        Vec::new()
    }
}

/// `catalog.W002`
fn check_placeholders(catalog: &Catalog) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    for entry in live_entries(catalog) {
        let expected = positional_placeholders(&entry.source_text);
        if expected.is_empty() {
            continue;
        }

        // Shorter length variants may legitimately drop arguments, so only
        // the primary phrasing of each form is checked.
        let forms: Vec<&str> = if entry.is_plural {
            entry.translations.iter().map(String::as_str).collect()
        } else {
            entry.translations.iter().take(1).map(String::as_str).collect()
        };

        for form in forms.into_iter().filter(|f| !f.is_empty()) {
            let primary = variant::split_variants(form)[0];
            let found = positional_placeholders(primary);
            let missing: Vec<String> = expected
                .difference(&found)
                .map(|i| format!("%{i}"))
                .collect();
            if !missing.is_empty() {
                messages.push(CheckMessage::warning(
                    format!("Translation drops {}.", missing.join(", ")),
                    Some("The argument will not appear in the translated text."),
                    Some(&entry_label(entry)),
                    Some("catalog.W002"),
                ));
                break;
            }
        }
    }
    messages
}

/// `catalog.W003`
fn check_quantity_marker(catalog: &Catalog) -> Vec<CheckMessage> {
    let rule = plural::rule_for(catalog.language_code());
    let mut messages = Vec::new();
    for entry in live_entries(catalog).filter(|entry| entry.is_plural) {
        if !has_quantity_marker(&entry.source_text) {
            continue;
        }
        for (index, form) in entry.translations.iter().enumerate() {
            if form.is_empty() || has_quantity_marker(form) {
                continue;
            }
            let msg = format!("Plural form {index} does not contain %n.");
            let label = entry_label(entry);
            messages.push(if is_single_value_form(rule, index) {
                CheckMessage::info(msg, None, Some(&label), Some("catalog.W003"))
            } else {
                CheckMessage::warning(
                    msg,
                    Some("This form covers several quantities; the number will be lost."),
                    Some(&label),
                    Some("catalog.W003"),
                )
            });
        }
    }
    messages
}

/// `catalog.I001`
fn check_unfinished(catalog: &Catalog) -> Vec<CheckMessage> {
    let stats = catalog.stats();
    if stats.unfinished == 0 {
        return Vec::new();
    }
    vec![CheckMessage::info(
        format!(
            "{} of {} entries are unfinished and will show source text.",
            stats.unfinished, stats.total
        ),
        None,
        None,
        Some("catalog.I001"),
    )]
}
