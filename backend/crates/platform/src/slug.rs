//! Slug Normalization
//!
//! Turns a title-like string into a lowercase, dash-separated token:
//! `"Jane Doe 2"` becomes `"jane-doe-2"`.

use crate::text::{collapse_whitespace, remove_accents, strip_tags};

/// Normalize text into a slug
///
/// - markup stripped, accents folded, lowercased
/// - `.` and whitespace runs become `-`
/// - anything outside `a-z 0-9 _ -` is dropped
/// - repeated `-` collapsed, leading/trailing `-` trimmed
pub fn sanitize_slug(input: &str) -> String {
    let lowered = remove_accents(&strip_tags(input)).to_lowercase();
    let dotted = lowered.replace('.', "-");

    let kept: String = dotted
        .chars()
        .filter(|&c| is_slug_char(c) || c.is_whitespace())
        .collect();

    let dashed = collapse_whitespace(&kept, '-');

    let mut slug = String::with_capacity(dashed.len());
    for ch in dashed.chars() {
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }

    slug.trim_matches('-').to_string()
}

#[inline]
fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}
