//! String helpers shared by the filter, sort and search paths.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case folding used for every case-insensitive comparison in the catalog.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Primary collation key: NFD-decomposed, combining marks removed, lowercased.
///
/// "Éclat" and "eclat" share a key, so accented names sort next to their
/// unaccented neighbours the way a Spanish or French reader expects.
pub fn collation_key(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
}

/// Locale-aware comparison: primary key first, raw text as the tiebreaker so
/// that the order stays total.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    collation_key(left).cmp(&collation_key(right)).then_with(|| left.cmp(right))
}

/// Groups thousands with `.` from five digits up, matching `es-ES` number formatting.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() < 5 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
