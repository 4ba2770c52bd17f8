// crates/certmap-core/src/text.rs

use crate::sheet::Cell;

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
/// 3\) Remove all whitespace
///
/// The same function is used to build the city index and to resolve a
/// row's city against it. That symmetry is what makes lookups work
/// despite inconsistent capitalization and spacing in the source data.
///
/// # Examples
///
/// ```rust
/// use certmap_core::fold_key;
///
/// assert_eq!(fold_key("  Navi Mumbai "), "navimumbai");
/// assert_eq!(fold_key("PUNE"), "pune");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s)
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Folded key for an optional cell. The null sentinel maps to the empty
/// key, which the city index never contains, so a row without a city can
/// never accidentally resolve.
pub fn city_key(cell: Option<&Cell>) -> String {
    match cell {
        Some(c) => fold_key(&c.as_text()),
        None => String::new(),
    }
}

/// Compares two strings for equality after folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}
