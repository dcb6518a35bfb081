//! Integration tests for loading TS catalogs and resolving against them.
//!
//! Tests cover: document structure, plural and variant resolution, comment
//! disambiguation, lifecycle states, metadata, locations, diagnostics, file
//! loading, JSON snapshots and catalog swaps.

use std::path::PathBuf;

use linguist_rs_core::checks::CheckRegistry;
use linguist_rs_core::resolver::{resolve, MessageRequest, ResolveOptions};
use linguist_rs_core::translator::Translator;
use linguist_rs_core::{LinguistError, Settings, TranslationStatus};
use linguist_rs_ts::{json, load_catalog, load_catalog_file, load_configured_catalog};

const DUTCH: &[u8] = include_bytes!("fixtures/nl.ts");

const PASSWORD_CONTEXT: &str = "UIAddDiskEncryptionPasswordDialog";
const PASSWORD_SOURCE: &str =
    "This virtual machine is password protected. Please enter the %n encryption password(s) below.";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/nl.ts")
}

// ═════════════════════════════════════════════════════════════════════
// 1. Document structure
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_fixture_loads_all_contexts() {
    let catalog = load_catalog(DUTCH).unwrap();
    assert_eq!(catalog.language_code(), "nl");
    assert_eq!(catalog.source_language_code(), "en");
    assert_eq!(
        catalog.contexts(),
        vec!["@@@", "UIActionPool", PASSWORD_CONTEXT, "UIVMListView"]
    );
    assert_eq!(catalog.len(), 14);
}

#[test]
fn test_fixture_stats() {
    let stats = load_catalog(DUTCH).unwrap().stats();
    assert_eq!(stats.total, 14);
    assert_eq!(stats.finished, 12);
    assert_eq!(stats.unfinished, 1);
    assert_eq!(stats.vanished, 1);
    assert_eq!(stats.plural, 2);
    assert_eq!(stats.with_variants, 2);
}

// ═════════════════════════════════════════════════════════════════════
// 2. Resolution
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_dutch_plural_password_prompt() {
    let catalog = load_catalog(DUTCH).unwrap();
    assert_eq!(
        catalog.trn(PASSWORD_CONTEXT, PASSWORD_SOURCE, 1),
        "Deze virtuele machine is beveiligd met een wachtwoord. Voer het 1 coderingswachtwoord hieronder in."
    );
    assert_eq!(
        catalog.trn(PASSWORD_CONTEXT, PASSWORD_SOURCE, 5),
        "Deze virtuele machine is beveiligd met een wachtwoord. Voer de 5 coderingswachtwoorden hieronder in."
    );
}

#[test]
fn test_entities_and_arguments() {
    let catalog = load_catalog(DUTCH).unwrap();
    let request = MessageRequest::new(
        PASSWORD_CONTEXT,
        "Disk encryption password for <b>%1</b> is invalid.",
    )
    .with_arg("ubuntu.vdi");
    assert_eq!(
        resolve(&catalog, &request, &ResolveOptions::default()),
        "Het coderingswachtwoord van de schijf <b>ubuntu.vdi</b> is ongeldig."
    );

    let reordered = MessageRequest::new(PASSWORD_CONTEXT, "Copy %1 to %2").with_args(["a.vdi", "b.vdi"]);
    assert_eq!(
        resolve(&catalog, &reordered, &ResolveOptions::default()),
        "Kopieer b.vdi naar a.vdi"
    );
}

#[test]
fn test_comment_disambiguation() {
    let catalog = load_catalog(DUTCH).unwrap();
    let options = ResolveOptions::default();
    let window = MessageRequest::new("UIActionPool", "Close").with_comment("window");
    let machine = MessageRequest::new("UIActionPool", "Close").with_comment("machine");
    assert_eq!(resolve(&catalog, &window, &options), "Venster sluiten");
    assert_eq!(resolve(&catalog, &machine, &options), "Machine afsluiten");
    assert_eq!(catalog.tr("UIActionPool", "Close"), "Close");
}

#[test]
fn test_unfinished_and_vanished_fall_back() {
    let catalog = load_catalog(DUTCH).unwrap();
    let unfinished = catalog.lookup("UIActionPool", "Show &Log...", None).unwrap();
    assert_eq!(unfinished.status, TranslationStatus::Unfinished);
    assert_eq!(unfinished.extra_comment.as_deref(), Some("Opens the VM log viewer"));
    assert_eq!(catalog.tr("UIActionPool", "Show &Log..."), "Show &Log...");
    assert_eq!(catalog.tr("UIActionPool", "Discard"), "Discard");
}

#[test]
fn test_length_variants_by_width() {
    let catalog = load_catalog(DUTCH).unwrap();
    let options = ResolveOptions::default();
    let request = |hint: Option<usize>| {
        let request = MessageRequest::new("UIActionPool", "&Preferences...");
        match hint {
            Some(width) => request.with_size_hint(width),
            None => request,
        }
    };
    assert_eq!(resolve(&catalog, &request(None), &options), "&Voorkeuren...");
    assert_eq!(resolve(&catalog, &request(Some(11)), &options), "&Voorkeuren");
    assert_eq!(resolve(&catalog, &request(Some(3)), &options), "Voork.");

    assert_eq!(catalog.tr("UIVMListView", "Start"), "Starten");
    let narrow = MessageRequest::new("UIVMListView", "Start").with_size_hint(5);
    assert_eq!(resolve(&catalog, &narrow, &options), "Start");
}

#[test]
fn test_plural_form_with_length_variants() {
    let catalog = load_catalog(DUTCH).unwrap();
    let wide = MessageRequest::new("UIVMListView", "%n machine(s) selected").with_quantity(1);
    let narrow = wide.clone().with_size_hint(10);
    let options = ResolveOptions::default();
    assert_eq!(resolve(&catalog, &wide, &options), "1 machine geselecteerd");
    assert_eq!(resolve(&catalog, &narrow, &options), "1 gesel.");
    assert_eq!(
        catalog.trn("UIVMListView", "%n machine(s) selected", 3),
        "3 machines geselecteerd"
    );
}

#[test]
fn test_metadata_context() {
    let catalog = load_catalog(DUTCH).unwrap();
    assert_eq!(catalog.metadata("English"), Some("Nederlands"));
    assert_eq!(catalog.metadata("--"), Some(""));
    assert_eq!(catalog.tr("@@@", "English"), "Nederlands");
    assert_eq!(catalog.tr("@@@", "--"), "");
    assert_eq!(catalog.tr("@@@", "Translators"), "Jan Jansen");
}

#[test]
fn test_locations_continue_across_messages() {
    let catalog = load_catalog(DUTCH).unwrap();
    let first = catalog.lookup("UIActionPool", "&Close...", None).unwrap();
    assert_eq!(first.locations[0].line, Some(207));
    let relative = catalog.lookup("UIActionPool", "Close", Some("window")).unwrap();
    assert_eq!(relative.locations[0].file, "../src/globals/UIActionPool.cpp");
    assert_eq!(relative.locations[0].line, Some(219));
}

// ═════════════════════════════════════════════════════════════════════
// 3. Diagnostics
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_fixture_diagnostics() {
    let catalog = load_catalog(DUTCH).unwrap();
    let messages = CheckRegistry::with_builtins().run_checks(None, &catalog);
    let ids: Vec<_> = messages.iter().filter_map(|m| m.id.as_deref()).collect();
    assert_eq!(ids, vec!["catalog.I001"]);
}

#[test]
fn test_single_form_languages_pass_plural_checks() {
    const SOURCE: &str = "announced %n section(s), each %1 byte(s), exceed file size";
    let cases = [
        ("tr", "%n bölüm ilan edildi, her %1 bayt dosya boyutunu aştı"),
        ("hu_HU", "%n szakasz bejelentve, mindegyik %1 bájt, túllépi a fájlméretet"),
        ("fa_IR", "%n بخش اعلام شد، هر کدام %1 بایت، از اندازه فایل بیشتر است"),
    ];
    for (language, form) in cases {
        let ts = format!(
            r#"<TS version="2.1" language="{language}"><context><name>QLibrary</name>
            <message numerus="yes"><source>{SOURCE}</source>
            <translation><numerusform>{form}</numerusform></translation></message>
            </context></TS>"#
        );
        let catalog = load_catalog(ts.as_bytes()).unwrap();
        let messages = CheckRegistry::with_builtins().run_checks(Some(&["plural"]), &catalog);
        assert!(messages.is_empty(), "{language}: {messages:?}");

        let request = MessageRequest::new("QLibrary", SOURCE)
            .with_quantity(5)
            .with_args(["4096"]);
        let expected = form.replace("%n", "5").replace("%1", "4096");
        assert_eq!(resolve(&catalog, &request, &ResolveOptions::default()), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════
// 4. Errors
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_duplicate_messages_fail() {
    let ts = br#"<TS version="2.1" language="nl"><context><name>C</name>
        <message><source>S</source><translation>a</translation></message>
        <message><source>S</source><translation>b</translation></message>
    </context></TS>"#;
    let err = load_catalog(ts).unwrap_err();
    assert!(err.is_corrupt_catalog());
    assert!(matches!(err, LinguistError::DuplicateEntry { ref context, .. } if context == "C"));
}

#[test]
fn test_same_source_in_other_context_is_fine() {
    let ts = br#"<TS version="2.1" language="nl">
        <context><name>A</name><message><source>S</source><translation>a</translation></message></context>
        <context><name>B</name><message><source>S</source><translation>b</translation></message></context>
    </TS>"#;
    let catalog = load_catalog(ts).unwrap();
    assert_eq!(catalog.tr("A", "S"), "a");
    assert_eq!(catalog.tr("B", "S"), "b");
}

#[test]
fn test_encoding_errors() {
    let err = load_catalog(&[0x3c, 0x54, 0x53, 0xff]).unwrap_err();
    assert!(matches!(err, LinguistError::ParseError(ref msg) if msg.contains("UTF-8")));

    let mut with_bom = "\u{feff}".as_bytes().to_vec();
    with_bom.extend_from_slice(DUTCH);
    assert_eq!(load_catalog(&with_bom).unwrap().len(), 14);
}

// ═════════════════════════════════════════════════════════════════════
// 5. Files and settings
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_load_catalog_file() {
    let catalog = load_catalog_file(fixture_path()).unwrap();
    assert_eq!(catalog.len(), 14);

    let err = load_catalog_file("/nonexistent/nls/xx.ts").unwrap_err();
    assert!(matches!(err, LinguistError::IoError(_)));
    assert!(!err.is_corrupt_catalog());
}

#[test]
fn test_load_configured_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("nl.ts"), DUTCH).unwrap();

    let settings = Settings {
        language_code: "nl".to_string(),
        catalog_dir: Some(dir.path().to_path_buf()),
        ..Settings::default()
    };
    let catalog = load_configured_catalog(&settings).unwrap();
    assert_eq!(catalog.language_code(), "nl");

    let unset = load_configured_catalog(&Settings::default()).unwrap_err();
    assert!(matches!(unset, LinguistError::ConfigurationError(_)));
}

#[test]
fn test_json_snapshot_matches_ts() {
    let catalog = load_catalog(DUTCH).unwrap();
    let snapshot = json::load_catalog_json(&json::to_json(&catalog).unwrap()).unwrap();
    assert_eq!(snapshot.stats(), catalog.stats());
    assert_eq!(
        snapshot.trn(PASSWORD_CONTEXT, PASSWORD_SOURCE, 2),
        catalog.trn(PASSWORD_CONTEXT, PASSWORD_SOURCE, 2)
    );
    assert_eq!(snapshot.metadata("English"), Some("Nederlands"));
}

// ═════════════════════════════════════════════════════════════════════
// 6. Catalog swaps
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_translator_switches_between_loaded_catalogs() {
    let german = br#"<TS version="2.1" language="de"><context><name>UIActionPool</name>
        <message><source>&amp;Close...</source><translation>&amp;Schlie&#223;en...</translation></message>
    </context></TS>"#;

    let translator = Translator::new();
    translator.set_active_catalog(load_catalog(DUTCH).unwrap());
    assert_eq!(translator.tr("UIActionPool", "&Close..."), "&Sluiten...");

    translator.set_active_catalog(load_catalog(german).unwrap());
    assert_eq!(translator.tr("UIActionPool", "&Close..."), "&Schließen...");
    assert_eq!(translator.language_code().as_deref(), Some("de"));
}
