//! Email Validation

use once_cell::sync::Lazy;
use regex::Regex;

// RFC-approximate: dot-atom local part, LDH labels with no leading/trailing
// hyphen, at least one dot in the domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("valid email pattern")
});

/// Check whether a string is a plausible email address
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
