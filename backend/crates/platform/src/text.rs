//! Text helpers shared by the login and slug pipelines.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Letters that do not decompose into base letter + combining mark
const ACCENT_FOLDS: &[(char, &str)] = &[
    ('ß', "ss"),
    ('ẞ', "SS"),
    ('Æ', "AE"),
    ('æ', "ae"),
    ('Ø', "O"),
    ('ø', "o"),
    ('Œ', "OE"),
    ('œ', "oe"),
    ('Đ', "D"),
    ('đ', "d"),
    ('Ð', "D"),
    ('ð', "d"),
    ('Ł', "L"),
    ('ł', "l"),
    ('Þ', "TH"),
    ('þ', "th"),
    ('ı', "i"),
    ('Ħ', "H"),
    ('ħ', "h"),
];

/// Remove `<...>` markup. An unterminated tag swallows the rest of the input.
pub(crate) fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match (in_tag, ch) {
            (false, '<') => in_tag = true,
            (true, '>') => in_tag = false,
            (false, c) => out.push(c),
            (true, _) => {}
        }
    }
    out
}

/// Fold accented Latin letters to ASCII where a plain equivalent exists.
///
/// Characters without one (CJK, emoji, ...) pass through unchanged; the
/// callers decide whether to keep them.
pub(crate) fn remove_accents(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for ch in input.chars() {
        match ACCENT_FOLDS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => folded.push_str(to),
            None => folded.push(ch),
        }
    }
    folded.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Replace every run of whitespace with `replacement`
pub(crate) fn collapse_whitespace(input: &str, replacement: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(replacement);
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
