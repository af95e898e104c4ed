//! Title Collation
//!
//! Case-insensitive, accent-folding comparison following Polish alphabet
//! order: accented Polish letters sort right after their base letter, other
//! diacritics are ignored.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Primary weight of a Polish letter: base letter plus its rank after it
fn polish_letter(c: char) -> Option<(char, u8)> {
    let weight = match c {
        'ą' => ('a', 1),
        'ć' => ('c', 1),
        'ę' => ('e', 1),
        'ł' => ('l', 1),
        'ń' => ('n', 1),
        'ó' => ('o', 1),
        'ś' => ('s', 1),
        'ź' => ('z', 1),
        'ż' => ('z', 2),
        _ => return None,
    };
    Some(weight)
}

fn sort_key(text: &str) -> Vec<(char, u8)> {
    let mut key = Vec::with_capacity(text.len());
    for c in text.nfc().flat_map(char::to_lowercase) {
        if let Some(weight) = polish_letter(c) {
            key.push(weight);
            continue;
        }
        key.extend(
            std::iter::once(c)
                .nfd()
                .filter(|d| !is_combining_mark(*d))
                .map(|d| (d, 0)),
        );
    }
    key
}

/// Compare two titles at base-letter sensitivity
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}
