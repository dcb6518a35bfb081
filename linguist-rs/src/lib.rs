//! # linguist-rs
//!
//! Runtime message resolution for Qt Linguist translation catalogs.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `linguist-rs` to get the loaders and the resolver
//! together, or on individual crates for finer-grained control.
//!
//! ```
//! # #[cfg(feature = "ts")] {
//! use linguist_rs::prelude::*;
//!
//! let ts = br#"<TS version="2.1" language="nl"><context><name>UIWizard</name>
//!     <message numerus="yes"><source>%n disk(s)</source><translation>
//!         <numerusform>%n schijf</numerusform><numerusform>%n schijven</numerusform>
//!     </translation></message>
//! </context></TS>"#;
//!
//! let translator = Translator::new();
//! translator.set_active_catalog(linguist_rs::ts::load_catalog(ts).unwrap());
//! assert_eq!(translator.trn("UIWizard", "%n disk(s)", 3), "3 schijven");
//! # }
//! ```

/// Catalog model, plural rules, resolution, settings and error types.
pub use linguist_rs_core as core;

/// TS and JSON snapshot loaders.
#[cfg(feature = "ts")]
pub use linguist_rs_ts as ts;

/// Command framework and built-in commands.
#[cfg(feature = "cli")]
pub use linguist_rs_cli as cli;

/// The types most applications need.
pub mod prelude {
    pub use linguist_rs_core::lazy::LazyMessage;
    pub use linguist_rs_core::resolver::{resolve, MessageRequest, ResolveOptions};
    pub use linguist_rs_core::translator::{self, Translator};
    pub use linguist_rs_core::{
        Catalog, CatalogBuilder, LinguistError, LinguistResult, Settings, TranslationEntry,
        TranslationStatus, SETTINGS,
    };
}
