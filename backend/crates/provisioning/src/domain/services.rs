//! Domain Services
//!
//! Username generation: display name -> collision-free login candidate.
//!
//! 1. Filter out `.`, space, `-`, `'` and `’`
//! 2. Slugify: strict login sanitization, then slug normalization
//! 3. If the slug is taken, append ` 1`, ` 2`, ... to the filtered name and
//!    slugify again until the oracle reports a free candidate
//!
//! The result is checked against the oracle only at the moment of the call.
//! Nothing is reserved, so a concurrent create can still claim it first; the
//! user store's unique constraint is what finally decides.
//!
//! There is no attempt limit. An oracle that never answers "free" keeps the
//! loop running.

use platform::login::sanitize_user_login;
use platform::slug::sanitize_slug;

use crate::domain::entity::candidate::CandidateContact;
use crate::domain::repository::LoginExistence;
use crate::error::ProvisioningResult;

/// Characters removed from a display name before slugifying
pub const DISPLAY_NAME_BLACKLIST: &[char] = &['.', ' ', '-', '\'', '\u{2019}'];

/// Final say over a generated username, given the candidate it was made for
///
/// Runs after uniqueness resolution. Its result is not re-checked against
/// the oracle; validity is checked by the caller.
pub type UsernameOverrideFn = dyn Fn(String, &CandidateContact) -> String + Send + Sync;

/// Remove blacklisted characters; nothing else is touched
pub fn filter_display_name(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| !DISPLAY_NAME_BLACKLIST.contains(c))
        .collect()
}

/// Login sanitization followed by slug normalization
pub fn slugify(text: &str) -> String {
    sanitize_slug(&sanitize_user_login(text))
}

/// Derive a login for `display_name` that `oracle` reports as free
///
/// Oracle errors are returned unchanged.
pub async fn generate_username<O>(display_name: &str, oracle: &O) -> ProvisioningResult<String>
where
    O: LoginExistence + ?Sized,
{
    let filtered = filter_display_name(display_name);
    let base = slugify(&filtered);

    if !oracle.login_exists(&base).await? {
        return Ok(base);
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = slugify(&format!("{filtered} {suffix}"));
        if !oracle.login_exists(&candidate).await? {
            tracing::debug!(
                base = %base,
                username = %candidate,
                attempts = suffix + 1,
                "Resolved username collision"
            );
            return Ok(candidate);
        }
        suffix += 1;
    }
}
