//! Placeholder substitution for resolved templates.
//!
//! Supported markers:
//!
//! | Marker | Replaced by |
//! |---|---|
//! | `%1`, `%2`, ... `%10`, ... | the 1-indexed argument |
//! | `%n` | the quantity, in plain decimal |
//! | `%L1`, `%Ln` | same as `%1` / `%n` (no digit grouping is applied) |
//! | `%%` | a literal `%` |
//!
//! Substitution is a single left-to-right pass: text coming from arguments
//! is copied verbatim and never rescanned. Markers that cannot be satisfied
//! (an index of 0, an index past the last argument, `%n` without a quantity)
//! are left in the output unchanged.

/// Replaces placeholders in `template` with `args` and `quantity`.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::substitute::substitute;
///
/// assert_eq!(substitute("%1 %2", &["a", "b"], None), "a b");
/// assert_eq!(substitute("%1%%", &["x"], None), "x%");
/// assert_eq!(substitute("%3", &["a"], None), "%3");
/// assert_eq!(substitute("%n file(s)", &[] as &[&str], Some(4)), "4 file(s)");
/// ```
pub fn substitute<S: AsRef<str>>(template: &str, args: &[S], quantity: Option<i64>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let marker = &rest[pos..];
        let consumed = expand_marker(marker, args, quantity, &mut out);
        rest = &marker[consumed..];
    }
    out.push_str(rest);
    out
}

/// Expands the marker at the start of `marker` (which begins with `%`) into
/// `out` and returns how many bytes of `marker` were consumed.
fn expand_marker<S: AsRef<str>>(
    marker: &str,
    args: &[S],
    quantity: Option<i64>,
    out: &mut String,
) -> usize {
    let body = &marker[1..];

    if body.starts_with('%') {
        out.push('%');
        return 2;
    }

    let (localized, body) = body
        .strip_prefix('L')
        .map_or((false, body), |stripped| (true, stripped));
    let prefix_len = if localized { 2 } else { 1 };

    if body.starts_with('n') {
        let len = prefix_len + 1;
        match quantity {
            Some(q) => out.push_str(&q.to_string()),
            None => out.push_str(&marker[..len]),
        }
        return len;
    }

    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        // A lone `%` (or `%L` not followed by a marker) is literal text.
        out.push('%');
        return 1;
    }

    let len = prefix_len + digits;
    let arg = body[..digits]
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| args.get(index));
    match arg {
        Some(value) => out.push_str(value.as_ref()),
        None => out.push_str(&marker[..len]),
    }
    len
}

/// Returns the highest positional placeholder index used in `template`
/// (0 when there is none). `%%` escapes are skipped.
pub fn max_placeholder(template: &str) -> usize {
    let mut max = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        let body = &rest[pos + 1..];
        if let Some(after) = body.strip_prefix('%') {
            rest = after;
            continue;
        }
        let body = body.strip_prefix('L').unwrap_or(body);
        let digits = body.bytes().take_while(u8::is_ascii_digit).count();
        if let Ok(index) = body[..digits].parse::<usize>() {
            max = max.max(index);
        }
        rest = &body[digits..];
    }
    max
}
