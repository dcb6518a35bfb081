//! Plural rules for numerus messages.
//!
//! A TS catalog stores one `numerusform` per plural category of the target
//! language, in a fixed per-language order. [`PluralRule`] maps a quantity to
//! a [`PluralCategory`] and then to the index of the stored form.
//!
//! Rules are registered per language in a [`PluralRuleRegistry`]. The
//! process-wide [`builtin_registry`] covers the common language families and
//! falls back to the English two-form rule for anything it does not know.
//!
//! ## Examples
//!
//! ```
//! use linguist_rs_core::plural;
//!
//! assert_eq!(plural::select_form("nl", 1), 0);
//! assert_eq!(plural::select_form("nl", 5), 1);
//! assert_eq!(plural::select_form("ru_RU", 3), 1);
//! assert_eq!(plural::select_form("ja", 7), 0);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// CLDR plural categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::One => write!(f, "one"),
            Self::Two => write!(f, "two"),
            Self::Few => write!(f, "few"),
            Self::Many => write!(f, "many"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Maps an absolute quantity to a plural category.
pub type SelectFn = fn(u64) -> PluralCategory;

/// A language family's plural rule.
///
/// `categories` lists the categories in the order the catalog stores the
/// corresponding forms; the form index of a quantity is the position of its
/// category in that list.
#[derive(Clone, Copy)]
pub struct PluralRule {
    name: &'static str,
    categories: &'static [PluralCategory],
    select: SelectFn,
}

impl PluralRule {
    /// Creates a rule from its form order and selection function.
    pub const fn new(
        name: &'static str,
        categories: &'static [PluralCategory],
        select: SelectFn,
    ) -> Self {
        Self {
            name,
            categories,
            select,
        }
    }

    /// The rule's family name (e.g. `"east-slavic"`).
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The categories in stored form order.
    pub const fn categories(&self) -> &'static [PluralCategory] {
        self.categories
    }

    /// Number of plural forms a catalog entry should carry under this rule.
    pub const fn form_count(&self) -> usize {
        self.categories.len()
    }

    /// Determines the plural category of `quantity`. Negative quantities are
    /// categorized by their absolute value.
    pub fn categorize(&self, quantity: i64) -> PluralCategory {
        (self.select)(quantity.unsigned_abs())
    }

    /// Returns the stored form index for `quantity`.
    ///
    /// A category the rule does not list maps to the last form.
    pub fn form_index(&self, quantity: i64) -> usize {
        let category = self.categorize(quantity);
        self.categories
            .iter()
            .position(|c| *c == category)
            .unwrap_or_else(|| self.categories.len().saturating_sub(1))
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("name", &self.name)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PluralRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.categories == other.categories
    }
}

// ── Built-in rules ───────────────────────────────────────────────────────

use PluralCategory::{Few, Many, One, Other, Two, Zero};

/// `one` for 1, `other` for everything else.
pub const ENGLISH: PluralRule = PluralRule::new("english", &[One, Other], english_rule);
/// `one` for 0 and 1.
pub const FRENCH: PluralRule = PluralRule::new("french", &[One, Other], french_rule);
/// Russian, Ukrainian, Belarusian, Serbian, Croatian, Bosnian.
pub const EAST_SLAVIC: PluralRule =
    PluralRule::new("east-slavic", &[One, Few, Many], east_slavic_rule);
pub const POLISH: PluralRule = PluralRule::new("polish", &[One, Few, Many], polish_rule);
/// Czech and Slovak.
pub const CZECH: PluralRule = PluralRule::new("czech", &[One, Few, Other], czech_rule);
pub const LITHUANIAN: PluralRule =
    PluralRule::new("lithuanian", &[One, Few, Other], lithuanian_rule);
/// The zero form is stored last.
pub const LATVIAN: PluralRule = PluralRule::new("latvian", &[One, Other, Zero], latvian_rule);
pub const ROMANIAN: PluralRule = PluralRule::new("romanian", &[One, Few, Other], romanian_rule);
pub const SLOVENIAN: PluralRule =
    PluralRule::new("slovenian", &[One, Two, Few, Other], slovenian_rule);
pub const IRISH: PluralRule = PluralRule::new("irish", &[One, Two, Other], irish_rule);
pub const WELSH: PluralRule = PluralRule::new("welsh", &[One, Two, Many, Other], welsh_rule);
pub const MALTESE: PluralRule = PluralRule::new("maltese", &[One, Few, Many, Other], maltese_rule);
pub const ARABIC: PluralRule =
    PluralRule::new("arabic", &[Zero, One, Two, Few, Many, Other], arabic_rule);
/// Icelandic and Macedonian: `one` for numbers ending in 1 except 11.
pub const ICELANDIC: PluralRule = PluralRule::new("icelandic", &[One, Other], icelandic_rule);
/// Languages without grammatical number.
pub const NO_PLURAL: PluralRule = PluralRule::new("none", &[Other], no_plural_rule);

const fn english_rule(n: u64) -> PluralCategory {
    if n == 1 {
        One
    } else {
        Other
    }
}

const fn french_rule(n: u64) -> PluralCategory {
    if n <= 1 {
        One
    } else {
        Other
    }
}

fn east_slavic_rule(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;

    if mod10 == 1 && mod100 != 11 {
        One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        Few
    } else {
        Many
    }
}

fn polish_rule(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;

    if n == 1 {
        One
    } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
        Few
    } else {
        Many
    }
}

fn czech_rule(n: u64) -> PluralCategory {
    match n {
        1 => One,
        2..=4 => Few,
        _ => Other,
    }
}

fn lithuanian_rule(n: u64) -> PluralCategory {
    let mod10 = n % 10;
    let mod100 = n % 100;
    let teen = (11..=19).contains(&mod100);

    if mod10 == 1 && !teen {
        One
    } else if (2..=9).contains(&mod10) && !teen {
        Few
    } else {
        Other
    }
}

const fn latvian_rule(n: u64) -> PluralCategory {
    if n % 10 == 1 && n % 100 != 11 {
        One
    } else if n != 0 {
        Other
    } else {
        Zero
    }
}

fn romanian_rule(n: u64) -> PluralCategory {
    if n == 1 {
        One
    } else if n == 0 || (1..=19).contains(&(n % 100)) {
        Few
    } else {
        Other
    }
}

const fn slovenian_rule(n: u64) -> PluralCategory {
    match n % 100 {
        1 => One,
        2 => Two,
        3 | 4 => Few,
        _ => Other,
    }
}

const fn irish_rule(n: u64) -> PluralCategory {
    match n {
        1 => One,
        2 => Two,
        _ => Other,
    }
}

const fn welsh_rule(n: u64) -> PluralCategory {
    match n {
        1 => One,
        2 => Two,
        8 | 11 => Many,
        _ => Other,
    }
}

fn maltese_rule(n: u64) -> PluralCategory {
    let mod100 = n % 100;
    if n == 1 {
        One
    } else if n == 0 || (1..=10).contains(&mod100) {
        Few
    } else if (11..=19).contains(&mod100) {
        Many
    } else {
        Other
    }
}

fn arabic_rule(n: u64) -> PluralCategory {
    let mod100 = n % 100;
    match n {
        0 => Zero,
        1 => One,
        2 => Two,
        _ if (3..=10).contains(&mod100) => Few,
        _ if (11..=99).contains(&mod100) => Many,
        _ => Other,
    }
}

const fn icelandic_rule(n: u64) -> PluralCategory {
    if n % 10 == 1 && n % 100 != 11 {
        One
    } else {
        Other
    }
}

const fn no_plural_rule(_n: u64) -> PluralCategory {
    Other
}

/// Language codes served by each built-in rule.
const BUILTIN_LANGUAGES: &[(PluralRule, &[&str])] = &[
    (
        ENGLISH,
        &[
            "en", "de", "nl", "sv", "da", "no", "nb", "nn", "it", "es", "pt", "el", "fi",
            "et", "he", "bg", "ca", "eu", "gl", "af", "sq", "eo", "fo", "fy", "ka", "kk",
            "az", "ur", "ta", "te", "ml", "mn", "sw",
        ],
    ),
    (FRENCH, &["fr", "pt_br", "hi", "bn", "ln", "fil", "tl"]),
    (EAST_SLAVIC, &["ru", "uk", "be", "sr", "hr", "bs"]),
    (POLISH, &["pl"]),
    (CZECH, &["cs", "sk"]),
    (LITHUANIAN, &["lt"]),
    (LATVIAN, &["lv"]),
    (ROMANIAN, &["ro", "mo"]),
    (SLOVENIAN, &["sl"]),
    (IRISH, &["ga"]),
    (WELSH, &["cy"]),
    (MALTESE, &["mt"]),
    (ARABIC, &["ar"]),
    (ICELANDIC, &["is", "mk"]),
    (
        NO_PLURAL,
        &[
            "ja", "zh", "ko", "vi", "th", "id", "ms", "lo", "km", "my", "hu", "tr", "fa",
        ],
    ),
];

// ── Registry ─────────────────────────────────────────────────────────────

/// Maps locale codes to plural rules, with an explicit default.
///
/// Lookups normalize the locale (`"pt-BR"`, `"pt_BR.UTF-8"` and `"PT_br"`
/// are all `pt_br`) and try the full tag before its primary language
/// subtag.
#[derive(Debug, Clone)]
pub struct PluralRuleRegistry {
    rules: HashMap<String, PluralRule>,
    default: PluralRule,
}

impl Default for PluralRuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl PluralRuleRegistry {
    /// Creates an empty registry that answers every locale with `default`.
    pub fn new(default: PluralRule) -> Self {
        Self {
            rules: HashMap::new(),
            default,
        }
    }

    /// Creates a registry pre-loaded with the built-in language families and
    /// [`ENGLISH`] as the default.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new(ENGLISH);
        for (rule, languages) in BUILTIN_LANGUAGES {
            for language in *languages {
                registry.register(language, *rule);
            }
        }
        registry
    }

    /// Registers (or replaces) the rule for a locale code.
    pub fn register(&mut self, locale: &str, rule: PluralRule) {
        self.rules.insert(normalize_locale(locale), rule);
    }

    /// Returns the rule for `locale`, falling back to the registry default.
    pub fn rule_for(&self, locale: &str) -> &PluralRule {
        let full = normalize_locale(locale);
        if let Some(rule) = self.rules.get(&full) {
            return rule;
        }
        let primary = full.split('_').next().unwrap_or(&full);
        self.rules.get(primary).unwrap_or(&self.default)
    }

    /// Returns `true` if `locale` resolves to a registered rule rather than
    /// the default.
    pub fn is_known(&self, locale: &str) -> bool {
        let full = normalize_locale(locale);
        let primary = full.split('_').next().unwrap_or(&full);
        self.rules.contains_key(&full) || self.rules.contains_key(primary)
    }

    /// Returns the form index for `quantity` under `locale`'s rule.
    pub fn select_form(&self, locale: &str, quantity: i64) -> usize {
        self.rule_for(locale).form_index(quantity)
    }

    /// Number of registered locale codes.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no locale codes are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Lowercases a locale tag, unifies `-` to `_`, and drops any `.encoding`
/// or `@modifier` suffix.
fn normalize_locale(locale: &str) -> String {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or(locale)
        .trim();
    base.replace('-', "_").to_ascii_lowercase()
}

/// The process-wide registry of built-in rules.
pub fn builtin_registry() -> &'static PluralRuleRegistry {
    static REGISTRY: OnceLock<PluralRuleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PluralRuleRegistry::with_builtins)
}

/// Returns the plural rule for `locale` from the built-in registry.
pub fn rule_for(locale: &str) -> &'static PluralRule {
    builtin_registry().rule_for(locale)
}

/// Selects the plural form index for `quantity` in `locale`.
///
/// The index is within the locale rule's own form count; use
/// [`select_form_clamped`] when indexing into a stored entry.
pub fn select_form(locale: &str, quantity: i64) -> usize {
    builtin_registry().select_form(locale, quantity)
}

/// Selects the plural form index and clamps it to `available` stored forms.
///
/// Returns 0 when `available` is 0.
pub fn select_form_clamped(locale: &str, quantity: i64, available: usize) -> usize {
    select_form(locale, quantity).min(available.saturating_sub(1))
}

/// Number of plural forms `locale` expects.
pub fn form_count(locale: &str) -> usize {
    rule_for(locale).form_count()
}
