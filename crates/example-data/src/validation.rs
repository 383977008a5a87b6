//! Field format rules shared with the directory client.
//!
//! The client validates these formats before submission; generated users
//! must pass them so seeded records can be edited without corrections.
//!
//! - Email: `local@domain.tld` where no part is empty and none contains
//!   whitespace or a further `@`.
//! - Phone: one or more digits, spaces, `+`, `-`, `(` or `)`.

/// Returns `true` when `email` has the `local@domain.tld` shape.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(is_valid_email("a@b.c.d"));
/// assert!(!is_valid_email("ada@example"));
/// assert!(!is_valid_email("ada @example.com"));
/// assert!(!is_valid_email("ada@@example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let allowed = |c: char| !c.is_whitespace() && c != '@';
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(allowed) || !domain.chars().all(allowed) {
        return false;
    }
    // The host part needs at least one dot with text on both sides.
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(index, _)| index > 0 && index + 1 < domain.len())
}

/// Returns `true` when `phone` only uses digits and phone punctuation.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_phone;
///
/// assert!(is_valid_phone("+1 (555) 010-2030"));
/// assert!(is_valid_phone("123"));
/// assert!(!is_valid_phone(""));
/// assert!(!is_valid_phone("555-CALL-NOW"));
/// ```
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    !phone.is_empty()
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
}
