//! Length-variant selection.
//!
//! A message may store several phrasings of the same text ordered from the
//! longest (most descriptive) to the shortest. The selector picks the widest
//! phrasing that fits the space the caller has available.

use unicode_width::UnicodeWidthStr;

/// Separator Qt uses to join length variants inside a single string.
pub const VARIANT_SEPARATOR: char = '\u{9c}';

/// Selects a length variant for the available display width.
///
/// - Without a `size_hint` the first (longest) candidate is returned.
/// - With a hint, the widest candidate whose display width does not exceed
///   the hint wins; on equal widths the earlier candidate is kept.
/// - If nothing fits, the last (shortest) candidate is returned.
/// - An empty candidate list yields `""`.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::variant::select_variant;
///
/// let candidates = ["OK", ""];
/// assert_eq!(select_variant(&candidates, None), "OK");
/// assert_eq!(select_variant(&candidates, Some(1)), "");
/// assert_eq!(select_variant(&candidates, Some(2)), "OK");
/// ```
pub fn select_variant<S: AsRef<str>>(candidates: &[S], size_hint: Option<usize>) -> &str {
    select_variant_index(candidates, size_hint).map_or("", |index| candidates[index].as_ref())
}

/// Index form of [`select_variant`]; `None` only for an empty list.
pub fn select_variant_index<S: AsRef<str>>(
    candidates: &[S],
    size_hint: Option<usize>,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let Some(limit) = size_hint else {
        return Some(0);
    };

    let mut best: Option<(usize, usize)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let width = display_width(candidate.as_ref());
        if width > limit {
            continue;
        }
        if best.map_or(true, |(_, best_width)| width > best_width) {
            best = Some((index, width));
        }
    }

    Some(best.map_or(candidates.len() - 1, |(index, _)| index))
}

/// Splits a string on [`VARIANT_SEPARATOR`]; a string without separators
/// yields a single variant.
pub fn split_variants(joined: &str) -> Vec<&str> {
    joined.split(VARIANT_SEPARATOR).collect()
}

/// Joins variants into a single string with [`VARIANT_SEPARATOR`].
pub fn join_variants<S: AsRef<str>>(variants: &[S]) -> String {
    let mut joined = String::new();
    for (i, variant) in variants.iter().enumerate() {
        if i > 0 {
            joined.push(VARIANT_SEPARATOR);
        }
        joined.push_str(variant.as_ref());
    }
    joined
}

/// Returns `true` if `text` carries more than one length variant.
pub fn has_variants(text: &str) -> bool {
    text.contains(VARIANT_SEPARATOR)
}

/// Rendered width of `text` in terminal/UI columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hint_returns_first() {
        assert_eq!(select_variant(&["OK", ""], None), "OK");
        assert_eq!(select_variant(&["Settings...", "Set..."], None), "Settings...");
    }

    #[test]
    fn test_hint_picks_widest_fitting() {
        let candidates = ["Virtual Machine Manager", "VM Manager", "VMs"];
        assert_eq!(select_variant(&candidates, Some(100)), "Virtual Machine Manager");
        assert_eq!(select_variant(&candidates, Some(12)), "VM Manager");
        assert_eq!(select_variant(&candidates, Some(10)), "VM Manager");
        assert_eq!(select_variant(&candidates, Some(9)), "VMs");
    }

    #[test]
    fn test_nothing_fits_returns_last() {
        assert_eq!(select_variant(&["Cancel", "Esc"], Some(1)), "Esc");
        assert_eq!(select_variant(&["Cancel", "Esc"], Some(0)), "Esc");
    }

    #[test]
    fn test_empty_variant_fits_zero_width() {
        assert_eq!(select_variant(&["OK", ""], Some(1)), "");
        assert_eq!(select_variant(&["OK", ""], Some(0)), "");
    }

    #[test]
    fn test_unordered_candidates_still_prefer_widest() {
        assert_eq!(select_variant(&["ab", "abcd", "abc"], Some(3)), "abc");
    }

    #[test]
    fn test_equal_widths_keep_earlier() {
        assert_eq!(select_variant(&["abc", "xyz"], Some(5)), "abc");
    }

    #[test]
    fn test_wide_characters_use_display_width() {
        // Each CJK ideograph occupies two columns.
        let candidates = ["設定", "設"];
        assert_eq!(select_variant(&candidates, Some(3)), "設");
        assert_eq!(select_variant(&candidates, Some(4)), "設定");
    }

    #[test]
    fn test_empty_candidates() {
        let none: [&str; 0] = [];
        assert_eq!(select_variant(&none, None), "");
        assert_eq!(select_variant(&none, Some(3)), "");
    }

    #[test]
    fn test_select_index() {
        assert_eq!(select_variant_index(&["OK", ""], None), Some(0));
        assert_eq!(select_variant_index(&["OK", ""], Some(1)), Some(1));
        assert_eq!(select_variant_index::<&str>(&[], None), None);
    }

    #[test]
    fn test_split_and_join() {
        let joined = join_variants(&["Long text", "Short"]);
        assert!(has_variants(&joined));
        assert_eq!(split_variants(&joined), vec!["Long text", "Short"]);
        assert_eq!(split_variants("single"), vec!["single"]);
        assert!(!has_variants("single"));
    }
}
