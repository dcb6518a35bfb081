//! Deferred translations.
//!
//! [`LazyMessage`] records a message request and resolves it when it is
//! displayed, against whichever catalog is active at that moment. Use it for
//! labels built before the user's locale is known.

use std::borrow::Cow;
use std::fmt;

use crate::resolver::MessageRequest;
use crate::translator::{self, Translator};

/// A message resolved at display time.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::lazy::LazyMessage;
///
/// let label = LazyMessage::new("UIMachineSettingsStorage", "%n controller(s)").quantity(2);
/// // Nothing is active yet, so the source text comes back.
/// assert_eq!(label.to_string(), "%n controller(s)");
/// ```
#[derive(Clone)]
pub struct LazyMessage {
    context: String,
    source: String,
    comment: Option<String>,
    quantity: Option<i64>,
    args: Vec<String>,
    size_hint: Option<usize>,
}

impl LazyMessage {
    /// Creates a deferred message for `source` in `context`.
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            comment: None,
            quantity: None,
            args: Vec::new(),
            size_hint: None,
        }
    }

    /// Sets the disambiguating comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the plural quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the available display width.
    #[must_use]
    pub fn size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = Some(size_hint);
        self
    }

    /// The untranslated text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The context the message belongs to.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Borrows this message as a resolver request.
    pub fn request(&self) -> MessageRequest<'_> {
        MessageRequest {
            context: &self.context,
            source: &self.source,
            comment: self.comment.as_deref(),
            quantity: self.quantity,
            args: self.args.iter().map(|a| Cow::Borrowed(a.as_str())).collect(),
            size_hint: self.size_hint,
        }
    }

    /// Resolves against the global translator.
    pub fn evaluate(&self) -> String {
        translator::resolve(&self.request())
    }

    /// Resolves against a specific translator.
    pub fn evaluate_with(&self, translator: &Translator) -> String {
        translator.resolve(&self.request())
    }
}

impl fmt::Display for LazyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.evaluate())
    }
}

impl fmt::Debug for LazyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyMessage")
            .field("context", &self.context)
            .field("source", &self.source)
            .field("comment", &self.comment)
            .field("quantity", &self.quantity)
            .finish_non_exhaustive()
    }
}

impl PartialEq for LazyMessage {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context
            && self.source == other.source
            && self.comment == other.comment
            && self.quantity == other.quantity
            && self.args == other.args
            && self.size_hint == other.size_hint
    }
}

impl Eq for LazyMessage {}

impl From<LazyMessage> for String {
    fn from(lazy: LazyMessage) -> Self {
        lazy.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, TranslationEntry};

    fn translator() -> Translator {
        let mut builder = Catalog::builder("nl");
        builder
            .insert(TranslationEntry::new("UIVMInfo", "Name: %1", "Naam: %1"))
            .unwrap();
        builder
            .insert(
                TranslationEntry::new("UIVMInfo", "Open", "Openen (map)").with_comment("folder"),
            )
            .unwrap();
        builder
            .insert(TranslationEntry::plural(
                "UIVMInfo",
                "%n CPU(s)",
                vec!["%n processor".to_string(), "%n processoren".to_string()],
            ))
            .unwrap();
        let translator = Translator::new();
        translator.set_active_catalog(builder.build());
        translator
    }

    #[test]
    fn test_evaluate_with_translator() {
        let translator = translator();
        let name = LazyMessage::new("UIVMInfo", "Name: %1").arg("Fedora");
        assert_eq!(name.evaluate_with(&translator), "Naam: Fedora");

        let cpus = LazyMessage::new("UIVMInfo", "%n CPU(s)").quantity(4);
        assert_eq!(cpus.evaluate_with(&translator), "4 processoren");

        let open = LazyMessage::new("UIVMInfo", "Open").comment("folder");
        assert_eq!(open.evaluate_with(&translator), "Openen (map)");
    }

    #[test]
    fn test_resolution_follows_active_catalog() {
        let translator = translator();
        let label = LazyMessage::new("UIVMInfo", "Name: %1").arg("Arch");
        assert_eq!(label.evaluate_with(&translator), "Naam: Arch");
        translator.clear_active_catalog();
        assert_eq!(label.evaluate_with(&translator), "Name: %1");
    }

    #[test]
    fn test_display_uses_global_translator() {
        let label = LazyMessage::new("LazyMessageDisplayTest", "Untranslated %1").arg("x");
        // No global entry exists for this context.
        assert_eq!(label.to_string(), "Untranslated %1");
        let s: String = label.into();
        assert_eq!(s, "Untranslated %1");
    }

    #[test]
    fn test_accessors_and_request() {
        let lazy = LazyMessage::new("UIVMInfo", "%n CPU(s)")
            .quantity(2)
            .size_hint(8)
            .arg("a");
        assert_eq!(lazy.context(), "UIVMInfo");
        assert_eq!(lazy.source(), "%n CPU(s)");
        let request = lazy.request();
        assert_eq!(request.quantity, Some(2));
        assert_eq!(request.size_hint, Some(8));
        assert_eq!(request.args, vec![Cow::Borrowed("a")]);
    }

    #[test]
    fn test_equality_and_debug() {
        let a = LazyMessage::new("C", "same");
        let b = LazyMessage::new("C", "same");
        let c = LazyMessage::new("C", "same").comment("other");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let debug = format!("{c:?}");
        assert!(debug.contains("LazyMessage"));
        assert!(debug.contains("other"));
    }
}
