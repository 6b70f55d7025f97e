//! Email Address Rules
//!
//! Syntactic check only; it says nothing about deliverability.
//!
//! - at least [`EMAIL_MIN_LENGTH`] characters, `@` not in first position
//! - local part: RFC 5322 `atext` plus `.`
//! - domain: no `..`, no leading/trailing dot, at least two labels
//! - each label: `a-z 0-9 -` (case-insensitive), no leading/trailing `-`

/// Shortest address accepted (`a@b.co`)
pub const EMAIL_MIN_LENGTH: usize = 6;

/// Maximum email length (RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

const LOCAL_PART_SPECIAL_CHARS: &str = "!#$%&'*+/=?^_`{|}~.-";

pub fn is_valid_email(email: &str) -> bool {
    if email.len() < EMAIL_MIN_LENGTH || email.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || !local.chars().all(is_local_part_char) {
        return false;
    }

    if domain.contains("..") || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[inline]
fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || LOCAL_PART_SPECIAL_CHARS.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("Jane.Doe+crm@Example.CO.uk"));
        assert!(is_valid_email("o'brien@mail-host.org"));
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn test_too_short() {
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_at_sign_rules() {
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("jane@@example.com"));
    }

    #[test]
    fn test_domain_rules() {
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email("jane@example..com"));
        assert!(!is_valid_email("jane@.example.com"));
        assert!(!is_valid_email("jane@example.com."));
        assert!(!is_valid_email("jane@-example.com"));
        assert!(!is_valid_email("jane@exa_mple.com"));
    }

    #[test]
    fn test_local_part_rules() {
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email("jane(doe)@example.com"));
    }
}
