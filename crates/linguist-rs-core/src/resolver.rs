//! Message resolution.
//!
//! [`resolve`] turns a [`MessageRequest`] into display text:
//!
//! 1. Look up `(context, source, comment)` in the catalog.
//! 2. Missing, unfinished, vanished, or blank entries resolve to the source
//!    text verbatim.
//! 3. Plural entries select a form with the catalog locale's plural rule
//!    (quantity 0 when the caller gave none), clamped to the stored forms.
//! 4. Entries with length variants pick one with the size hint.
//! 5. Placeholders are substituted into the chosen template.
//!
//! Resolution never fails and never mutates the catalog, so the same request
//! always yields the same string.

use std::borrow::Cow;

use crate::catalog::{Catalog, TranslationEntry, METADATA_CONTEXT};
use crate::plural;
use crate::settings::Settings;
use crate::substitute::substitute;
use crate::variant;

/// A message to resolve, with its runtime arguments.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::resolver::MessageRequest;
///
/// let request = MessageRequest::new("UIMediumManager", "Remove %1 from %n machine(s)?")
///     .with_quantity(2)
///     .with_arg("disk.vdi");
/// assert_eq!(request.args.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRequest<'a> {
    /// UI component the message belongs to.
    pub context: &'a str,
    /// Original-language text.
    pub source: &'a str,
    /// Disambiguating comment.
    pub comment: Option<&'a str>,
    /// Quantity for plural selection and `%n`.
    pub quantity: Option<i64>,
    /// Values for `%1`, `%2`, ...
    pub args: Vec<Cow<'a, str>>,
    /// Available display width for length variants.
    pub size_hint: Option<usize>,
}

impl<'a> MessageRequest<'a> {
    /// Creates a request without comment, quantity, arguments or size hint.
    pub const fn new(context: &'a str, source: &'a str) -> Self {
        Self {
            context,
            source,
            comment: None,
            quantity: None,
            args: Vec::new(),
            size_hint: None,
        }
    }

    /// Sets the disambiguating comment.
    #[must_use]
    pub fn with_comment(mut self, comment: &'a str) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<Cow<'a, str>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several positional arguments.
    #[must_use]
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Cow<'a, str>>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the available display width.
    #[must_use]
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = Some(size_hint);
        self
    }
}

/// Tunables for [`resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// When the exact key misses and a comment was given, retry without the
    /// comment.
    pub comment_fallback: bool,
    /// Size hint used for length variants when the request carries none.
    pub default_size_hint: Option<usize>,
}

impl From<&Settings> for ResolveOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            comment_fallback: settings.comment_fallback,
            default_size_hint: settings.default_size_hint,
        }
    }
}

/// Resolves `request` against `catalog`.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::catalog::{Catalog, TranslationEntry};
/// use linguist_rs_core::resolver::{resolve, MessageRequest, ResolveOptions};
///
/// let mut builder = Catalog::builder("nl");
/// builder.insert(TranslationEntry::new("UIVMInfo", "Name: %1", "Naam: %1")).unwrap();
/// let catalog = builder.build();
///
/// let request = MessageRequest::new("UIVMInfo", "Name: %1").with_arg("Ubuntu");
/// assert_eq!(resolve(&catalog, &request, &ResolveOptions::default()), "Naam: Ubuntu");
/// ```
pub fn resolve(catalog: &Catalog, request: &MessageRequest<'_>, options: &ResolveOptions) -> String {
    if request.context == METADATA_CONTEXT {
        return catalog
            .metadata(request.source)
            .unwrap_or(request.source)
            .to_string();
    }

    let Some(entry) = find_entry(catalog, request, options) else {
        tracing::trace!(
            context = request.context,
            source = request.source,
            "no catalog entry; using source text"
        );
        return request.source.to_string();
    };

    if !entry.status.is_authoritative() {
        tracing::trace!(
            context = request.context,
            source = request.source,
            status = %entry.status,
            "translation not authoritative; using source text"
        );
        return request.source.to_string();
    }

    if entry.is_blank() {
        tracing::trace!(
            context = request.context,
            source = request.source,
            "translation is empty; using source text"
        );
        return request.source.to_string();
    }

    let size_hint = request.size_hint.or(options.default_size_hint);

    let (template, quantity) = if entry.is_plural {
        let quantity = request.quantity.unwrap_or_else(|| {
            tracing::debug!(
                context = request.context,
                source = request.source,
                "plural message resolved without a quantity; using 0"
            );
            0
        });
        let Some(form) = plural_form(catalog, entry, quantity) else {
            return request.source.to_string();
        };
        (form, Some(quantity))
    } else if entry.translations.len() > 1 {
        (
            variant::select_variant(&entry.translations, size_hint),
            request.quantity,
        )
    } else {
        (entry.translations[0].as_str(), request.quantity)
    };

    let template = if variant::has_variants(template) {
        let variants = variant::split_variants(template);
        variant::select_variant_index(&variants, size_hint).map_or(template, |i| variants[i])
    } else {
        template
    };

    substitute(template, &request.args, quantity)
}

fn find_entry<'c>(
    catalog: &'c Catalog,
    request: &MessageRequest<'_>,
    options: &ResolveOptions,
) -> Option<&'c TranslationEntry> {
    catalog
        .lookup(request.context, request.source, request.comment)
        .or_else(|| {
            let has_comment = request.comment.is_some_and(|c| !c.is_empty());
            if options.comment_fallback && has_comment {
                tracing::trace!(
                    context = request.context,
                    source = request.source,
                    "retrying lookup without comment"
                );
                catalog.lookup(request.context, request.source, None)
            } else {
                None
            }
        })
}

/// Picks the plural form for `quantity`, clamped to the stored forms.
/// Returns `None` when the selected form is empty.
fn plural_form<'c>(catalog: &Catalog, entry: &'c TranslationEntry, quantity: i64) -> Option<&'c str> {
    let wanted = plural::select_form(catalog.language_code(), quantity);
    let index = wanted.min(entry.translations.len().saturating_sub(1));
    if index != wanted {
        tracing::debug!(
            context = %entry.context,
            source = %entry.source_text,
            language = catalog.language_code(),
            wanted,
            stored = entry.translations.len(),
            "plural form out of range; clamped to last stored form"
        );
    }

    let form = entry.translations.get(index)?.as_str();
    (!form.is_empty()).then_some(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TranslationStatus;

    const PASSWORD_SOURCE: &str =
        "This virtual machine is password protected. Please enter the %n encryption password(s) below.";

    fn dutch() -> Catalog {
        let mut builder = Catalog::builder("nl");
        builder
            .extend([
                TranslationEntry::plural(
                    "UIAddDiskEncryptionPasswordDialog",
                    PASSWORD_SOURCE,
                    vec![
                        "Deze virtuele machine is beveiligd met een wachtwoord. Voer hieronder het %n encryptiewachtwoord in.".into(),
                        "Deze virtuele machine is beveiligd met een wachtwoord. Voer hieronder de %n encryptiewachtwoorden in.".into(),
                    ],
                ),
                TranslationEntry::new("UIMachineSettingsGeneral", "Name: %1 (%2)", "Naam: %1 (%2)"),
                TranslationEntry::new("UIMessageCenter", "Cancel", "Annuleren")
                    .with_comment("dialog"),
                TranslationEntry::variants("QIMessageBox", "OK", vec!["OK".into(), String::new()]),
                TranslationEntry::new("UIWizard", "&Back", "&Terug")
                    .with_status(TranslationStatus::Unfinished),
                TranslationEntry::new("UIWizard", "&Old", "&Oud")
                    .with_status(TranslationStatus::Vanished),
                TranslationEntry::new("UIWizard", "Blank", ""),
                TranslationEntry::plural(
                    "UIPartial",
                    "%n snapshot(s)",
                    vec!["%n momentopname".into(), String::new()],
                ),
                TranslationEntry::plural(
                    "UIVariants",
                    "%n machine(s) selected",
                    vec![
                        "%n machine geselecteerd\u{9c}%n gesel.".into(),
                        "%n machines geselecteerd\u{9c}%n gesel.".into(),
                    ],
                ),
                TranslationEntry::new(METADATA_CONTEXT, "--", ""),
            ])
            .unwrap();
        builder.build()
    }

    fn resolve_default(catalog: &Catalog, request: &MessageRequest<'_>) -> String {
        resolve(catalog, request, &ResolveOptions::default())
    }

    #[test]
    fn test_plural_singular_and_plural() {
        let catalog = dutch();
        let one = catalog.resolve(
            "UIAddDiskEncryptionPasswordDialog",
            PASSWORD_SOURCE,
            None,
            Some(1),
            &[] as &[&str],
            None,
        );
        assert!(one.contains("het 1 encryptiewachtwoord in"));

        let five = catalog.resolve(
            "UIAddDiskEncryptionPasswordDialog",
            PASSWORD_SOURCE,
            None,
            Some(5),
            &[] as &[&str],
            None,
        );
        assert!(five.contains("de 5 encryptiewachtwoorden in"));
    }

    #[test]
    fn test_plural_without_quantity_uses_zero() {
        let catalog = dutch();
        let request = MessageRequest::new("UIAddDiskEncryptionPasswordDialog", PASSWORD_SOURCE);
        let text = resolve_default(&catalog, &request);
        assert!(text.contains("de 0 encryptiewachtwoorden"));
    }

    #[test]
    fn test_simple_message_with_arguments() {
        let catalog = dutch();
        let request = MessageRequest::new("UIMachineSettingsGeneral", "Name: %1 (%2)")
            .with_args(["Ubuntu", "64-bit"]);
        assert_eq!(resolve_default(&catalog, &request), "Naam: Ubuntu (64-bit)");
    }

    #[test]
    fn test_missing_entry_returns_source_verbatim() {
        let catalog = dutch();
        let request = MessageRequest::new("UIMachineSettingsGeneral", "Not there %1").with_arg("x");
        assert_eq!(resolve_default(&catalog, &request), "Not there %1");
    }

    #[test]
    fn test_unfinished_and_vanished_fall_back() {
        let catalog = dutch();
        assert_eq!(catalog.tr("UIWizard", "&Back"), "&Back");
        assert_eq!(catalog.tr("UIWizard", "&Old"), "&Old");
    }

    #[test]
    fn test_blank_translation_falls_back() {
        let catalog = dutch();
        assert_eq!(catalog.tr("UIWizard", "Blank"), "Blank");
    }

    #[test]
    fn test_empty_plural_form_falls_back() {
        let catalog = dutch();
        assert_eq!(catalog.trn("UIPartial", "%n snapshot(s)", 1), "1 momentopname");
        assert_eq!(catalog.trn("UIPartial", "%n snapshot(s)", 3), "%n snapshot(s)");
    }

    #[test]
    fn test_comment_must_match() {
        let catalog = dutch();
        assert_eq!(catalog.tr("UIMessageCenter", "Cancel"), "Cancel");
        let request = MessageRequest::new("UIMessageCenter", "Cancel").with_comment("dialog");
        assert_eq!(resolve_default(&catalog, &request), "Annuleren");
    }

    #[test]
    fn test_comment_fallback_option() {
        let mut builder = Catalog::builder("nl");
        builder
            .insert(TranslationEntry::new("UIMessageCenter", "Cancel", "Annuleren"))
            .unwrap();
        let catalog = builder.build();
        let request = MessageRequest::new("UIMessageCenter", "Cancel").with_comment("button");

        assert_eq!(resolve_default(&catalog, &request), "Cancel");
        let options = ResolveOptions {
            comment_fallback: true,
            ..ResolveOptions::default()
        };
        assert_eq!(resolve(&catalog, &request, &options), "Annuleren");
    }

    #[test]
    fn test_length_variants_use_size_hint() {
        let catalog = dutch();
        let wide = MessageRequest::new("QIMessageBox", "OK");
        assert_eq!(resolve_default(&catalog, &wide), "OK");
        let narrow = MessageRequest::new("QIMessageBox", "OK").with_size_hint(1);
        assert_eq!(resolve_default(&catalog, &narrow), "");
    }

    #[test]
    fn test_default_size_hint_option() {
        let catalog = dutch();
        let options = ResolveOptions {
            default_size_hint: Some(1),
            ..ResolveOptions::default()
        };
        let request = MessageRequest::new("QIMessageBox", "OK");
        assert_eq!(resolve(&catalog, &request, &options), "");
        let explicit = MessageRequest::new("QIMessageBox", "OK").with_size_hint(5);
        assert_eq!(resolve(&catalog, &explicit, &options), "OK");
    }

    #[test]
    fn test_plural_forms_with_embedded_variants() {
        let catalog = dutch();
        let full = MessageRequest::new("UIVariants", "%n machine(s) selected").with_quantity(3);
        assert_eq!(resolve_default(&catalog, &full), "3 machines geselecteerd");
        let short = full.clone().with_size_hint(10);
        assert_eq!(resolve_default(&catalog, &short), "3 gesel.");
    }

    #[test]
    fn test_plural_index_clamped_for_locale_mismatch() {
        // Russian needs three forms; this catalog stores only two.
        let mut builder = Catalog::builder("ru");
        builder
            .insert(TranslationEntry::plural(
                "Ctx",
                "%n file(s)",
                vec!["%n файл".into(), "%n файла".into()],
            ))
            .unwrap();
        let catalog = builder.build();
        assert_eq!(catalog.trn("Ctx", "%n file(s)", 1), "1 файл");
        assert_eq!(catalog.trn("Ctx", "%n file(s)", 3), "3 файла");
        assert_eq!(catalog.trn("Ctx", "%n file(s)", 5), "5 файла");
    }

    #[test]
    fn test_plural_forms_for_every_quantity_in_bounds() {
        let catalog = dutch();
        for q in -50..200 {
            let text = catalog.trn("UIAddDiskEncryptionPasswordDialog", PASSWORD_SOURCE, q);
            assert!(text.contains(&q.to_string()));
            let expected_singular = q.unsigned_abs() == 1;
            assert_eq!(text.contains("het "), expected_singular, "q={q}");
        }
    }

    #[test]
    fn test_metadata_context_keeps_blank_values() {
        let catalog = dutch();
        assert_eq!(catalog.tr(METADATA_CONTEXT, "--"), "");
        assert_eq!(catalog.tr(METADATA_CONTEXT, "Unknown"), "Unknown");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = dutch();
        let request = MessageRequest::new("UIMachineSettingsGeneral", "Name: %1 (%2)")
            .with_args(["a", "b"]);
        let first = resolve_default(&catalog, &request);
        let second = resolve_default(&catalog, &request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_options_from_settings() {
        let settings = Settings {
            comment_fallback: true,
            default_size_hint: Some(12),
            ..Settings::default()
        };
        let options = ResolveOptions::from(&settings);
        assert!(options.comment_fallback);
        assert_eq!(options.default_size_hint, Some(12));
    }
}
