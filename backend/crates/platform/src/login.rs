//! Login Rules
//!
//! What the host user store accepts as a login name.
//!
//! ## Strict sanitization
//! 1. Strip markup
//! 2. Fold accents to ASCII
//! 3. Drop percent-encoded octets (`%3C`) and HTML entities (`&amp;`)
//! 4. Keep only `A-Z a-z 0-9`, space, `_ . - @`
//! 5. Trim and collapse internal whitespace to a single space
//!
//! A login is valid when it is non-empty, no longer than
//! [`MAX_LOGIN_LENGTH`], and already in sanitized form.

use crate::text::{collapse_whitespace, remove_accents, strip_tags};

/// Maximum login length accepted by the user store (in characters)
pub const MAX_LOGIN_LENGTH: usize = 60;

/// Characters besides ASCII alphanumerics that survive strict sanitization
const ALLOWED_LOGIN_SPECIAL_CHARS: &[char] = &[' ', '_', '.', '-', '@'];

/// Sanitize free text into login form (strict mode)
pub fn sanitize_user_login(input: &str) -> String {
    let stripped = strip_tags(input);
    let folded = remove_accents(&stripped);
    let without_escapes = remove_entities(&remove_octets(&folded));

    let kept: String = without_escapes
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_LOGIN_SPECIAL_CHARS.contains(c))
        .collect();

    collapse_whitespace(kept.trim(), ' ')
}

/// Check a login against the user store's rules
pub fn is_valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.chars().count() <= MAX_LOGIN_LENGTH
        && sanitize_user_login(login) == login
}

/// Remove `%XX` hex octets
fn remove_octets(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%'
            && i + 2 < chars.len()
            && chars[i + 1].is_ascii_hexdigit()
            && chars[i + 2].is_ascii_hexdigit()
        {
            i += 3;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Remove `&name;` entities (at least one character between `&` and `;`)
fn remove_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(semi) if semi > 0 => rest = &after[semi + 1..],
            _ => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sanitize {
        use super::*;

        #[test]
        fn test_keeps_case_and_allowed_chars() {
            assert_eq!(sanitize_user_login("Jane.Doe_1@x-y"), "Jane.Doe_1@x-y");
        }

        #[test]
        fn test_drops_disallowed_chars() {
            assert_eq!(sanitize_user_login("O'Brien!#"), "OBrien");
            assert_eq!(sanitize_user_login("Jane’s"), "Janes");
        }

        #[test]
        fn test_folds_accents() {
            assert_eq!(sanitize_user_login("Zoë Ångström"), "Zoe Angstrom");
        }

        #[test]
        fn test_removes_octets_and_entities() {
            assert_eq!(sanitize_user_login("a%3Cb"), "ab");
            assert_eq!(sanitize_user_login("Tom &amp; Jerry"), "Tom Jerry");
            assert_eq!(sanitize_user_login("50% & rising"), "50 rising");
        }

        #[test]
        fn test_trims_and_collapses_whitespace() {
            assert_eq!(sanitize_user_login("  Jane \t  Doe  "), "Jane Doe");
        }

        #[test]
        fn test_non_latin_becomes_empty() {
            assert_eq!(sanitize_user_login("李小龍"), "");
        }
    }

    mod validity {
        use super::*;

        #[test]
        fn test_valid_logins() {
            assert!(is_valid_login("janedoe"));
            assert!(is_valid_login("janedoe-1"));
            assert!(is_valid_login("Jane Doe"));
        }

        #[test]
        fn test_empty_is_invalid() {
            assert!(!is_valid_login(""));
        }

        #[test]
        fn test_unsanitized_is_invalid() {
            assert!(!is_valid_login("o'brien"));
            assert!(!is_valid_login(" janedoe"));
            assert!(!is_valid_login("josé"));
        }

        #[test]
        fn test_length_limit() {
            assert!(is_valid_login(&"a".repeat(MAX_LOGIN_LENGTH)));
            assert!(!is_valid_login(&"a".repeat(MAX_LOGIN_LENGTH + 1)));
        }
    }
}
