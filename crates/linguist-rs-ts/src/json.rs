//! JSON snapshots of catalogs.
//!
//! A snapshot is the serde form of [`Catalog`]: the two language codes and
//! the entry list in document order. Loading a snapshot runs the same
//! validation as building a catalog by hand, so duplicate keys are rejected.

use linguist_rs_core::{Catalog, LinguistError, LinguistResult};

/// Loads a catalog from a JSON snapshot.
///
/// # Errors
///
/// Returns [`LinguistError::SerializationError`] for malformed JSON or an
/// invalid entry set.
///
/// # Examples
///
/// ```
/// let json = r#"{
///     "language": "nl",
///     "messages": [
///         {"context": "UIActionPool", "source_text": "&Close", "translations": ["&Sluiten"]}
///     ]
/// }"#;
/// let catalog = linguist_rs_ts::json::load_catalog_json(json).unwrap();
/// assert_eq!(catalog.tr("UIActionPool", "&Close"), "&Sluiten");
/// ```
pub fn load_catalog_json(json: &str) -> LinguistResult<Catalog> {
    let catalog: Catalog = serde_json::from_str(json)
        .map_err(|e| LinguistError::SerializationError(format!("Invalid catalog snapshot: {e}")))?;
    tracing::debug!(
        language = catalog.language_code(),
        entries = catalog.len(),
        "Loaded catalog snapshot"
    );
    Ok(catalog)
}

/// Writes `catalog` as a pretty-printed JSON snapshot.
///
/// # Errors
///
/// Returns [`LinguistError::SerializationError`] if serialization fails.
pub fn to_json(catalog: &Catalog) -> LinguistResult<String> {
    serde_json::to_string_pretty(catalog)
        .map_err(|e| LinguistError::SerializationError(format!("Failed to write snapshot: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguist_rs_core::{TranslationEntry, TranslationStatus};

    #[test]
    fn test_snapshot_round_trip_preserves_behaviour() {
        let mut builder = Catalog::builder("ru");
        builder
            .insert(TranslationEntry::plural(
                "UIWizard",
                "%n file(s)",
                vec!["%n файл".into(), "%n файла".into(), "%n файлов".into()],
            ))
            .unwrap();
        builder
            .insert(
                TranslationEntry::new("UIWizard", "Draft", "Черновик")
                    .with_status(TranslationStatus::Unfinished),
            )
            .unwrap();
        let json = to_json(&builder.build()).unwrap();
        assert!(json.contains("\"unfinished\""));

        let loaded = load_catalog_json(&json).unwrap();
        assert_eq!(loaded.language_code(), "ru");
        assert_eq!(loaded.trn("UIWizard", "%n file(s)", 22), "22 файла");
        assert_eq!(loaded.tr("UIWizard", "Draft"), "Draft");
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        let json = r#"{"language": "nl", "messages": [
            {"context": "C", "source_text": "S", "translations": ["a"]},
            {"context": "C", "source_text": "S", "translations": ["b"]}
        ]}"#;
        let err = load_catalog_json(json).unwrap_err();
        assert!(matches!(err, LinguistError::SerializationError(_)));
        assert!(err.to_string().contains("Duplicate entry"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(load_catalog_json("{\"language\": ").is_err());
        assert!(load_catalog_json("[]").is_err());
    }
}
