//! The active-catalog holder.
//!
//! A [`Translator`] publishes one immutable [`Catalog`] snapshot at a time.
//! Switching locale stores a new `Arc<Catalog>` atomically; a resolution
//! that already loaded the previous snapshot finishes against it, so readers
//! never observe a half-built catalog and never take a lock.
//!
//! ```
//! use linguist_rs_core::catalog::{Catalog, TranslationEntry};
//! use linguist_rs_core::translator::Translator;
//!
//! let translator = Translator::new();
//! assert_eq!(translator.tr("UIActionPool", "&Close"), "&Close");
//!
//! let mut builder = Catalog::builder("nl");
//! builder.insert(TranslationEntry::new("UIActionPool", "&Close", "&Sluiten")).unwrap();
//! translator.set_active_catalog(builder.build());
//! assert_eq!(translator.tr("UIActionPool", "&Close"), "&Sluiten");
//! ```

use std::sync::{Arc, OnceLock};

use arc_swap::{ArcSwap, ArcSwapOption};

use crate::catalog::Catalog;
use crate::logging::catalog_span;
use crate::resolver::{self, MessageRequest, ResolveOptions};
use crate::settings::SETTINGS;

/// Holds the active catalog and the options used to resolve against it.
pub struct Translator {
    active: ArcSwapOption<Catalog>,
    options: ArcSwap<ResolveOptions>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language_code())
            .field("options", &**self.options.load())
            .finish()
    }
}

impl Translator {
    /// Creates a translator with no active catalog and default options.
    pub fn new() -> Self {
        Self::with_options(ResolveOptions::default())
    }

    /// Creates a translator with no active catalog.
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            active: ArcSwapOption::empty(),
            options: ArcSwap::from_pointee(options),
        }
    }

    /// Publishes `catalog` as the active snapshot and returns the previous one.
    pub fn set_active_catalog(&self, catalog: Catalog) -> Option<Arc<Catalog>> {
        self.set_active_arc(Arc::new(catalog))
    }

    /// Publishes an already shared catalog.
    pub fn set_active_arc(&self, catalog: Arc<Catalog>) -> Option<Arc<Catalog>> {
        let span = catalog_span(catalog.language_code());
        let _guard = span.enter();
        tracing::info!(entries = catalog.len(), "Activating catalog");
        self.active.swap(Some(catalog))
    }

    /// Removes the active catalog; lookups then return source text.
    pub fn clear_active_catalog(&self) -> Option<Arc<Catalog>> {
        let previous = self.active.swap(None);
        if let Some(previous) = &previous {
            tracing::info!(language = previous.language_code(), "Deactivating catalog");
        }
        previous
    }

    /// Returns the current snapshot, if any.
    pub fn active(&self) -> Option<Arc<Catalog>> {
        self.active.load_full()
    }

    /// Language code of the active catalog.
    pub fn language_code(&self) -> Option<String> {
        let guard = self.active.load();
        (*guard)
            .as_ref()
            .map(|catalog| catalog.language_code().to_string())
    }

    /// Current resolution options.
    pub fn options(&self) -> ResolveOptions {
        **self.options.load()
    }

    /// Replaces the resolution options for subsequent lookups.
    pub fn set_options(&self, options: ResolveOptions) {
        self.options.store(Arc::new(options));
    }

    /// Resolves `request` against the active snapshot.
    ///
    /// Without an active catalog the source text is returned unchanged.
    pub fn resolve(&self, request: &MessageRequest<'_>) -> String {
        let guard = self.active.load();
        match &*guard {
            Some(catalog) => resolver::resolve(catalog, request, &self.options.load()),
            None => {
                tracing::trace!(context = request.context, "No active catalog");
                request.source.to_string()
            }
        }
    }

    /// Translates a simple message.
    pub fn tr(&self, context: &str, source_text: &str) -> String {
        self.resolve(&MessageRequest::new(context, source_text))
    }

    /// Translates a plural message for `quantity`.
    pub fn trn(&self, context: &str, source_text: &str, quantity: i64) -> String {
        self.resolve(&MessageRequest::new(context, source_text).with_quantity(quantity))
    }
}

static GLOBAL: OnceLock<Translator> = OnceLock::new();

/// The process-wide translator.
///
/// Its options come from [`SETTINGS`] when they are configured before the
/// first call; otherwise the defaults apply until
/// [`Translator::set_options`] is used.
pub fn global() -> &'static Translator {
    GLOBAL.get_or_init(|| {
        let options = SETTINGS
            .try_get()
            .map(ResolveOptions::from)
            .unwrap_or_default();
        Translator::with_options(options)
    })
}

/// Publishes `catalog` on the global translator.
pub fn set_active_catalog(catalog: Catalog) -> Option<Arc<Catalog>> {
    global().set_active_catalog(catalog)
}

/// Clears the global translator's catalog.
pub fn clear_active_catalog() -> Option<Arc<Catalog>> {
    global().clear_active_catalog()
}

/// Resolves `request` with the global translator.
pub fn resolve(request: &MessageRequest<'_>) -> String {
    global().resolve(request)
}

/// Translates a simple message with the global translator.
pub fn tr(context: &str, source_text: &str) -> String {
    global().tr(context, source_text)
}

/// Translates a plural message with the global translator.
pub fn trn(context: &str, source_text: &str, quantity: i64) -> String {
    global().trn(context, source_text, quantity)
}
