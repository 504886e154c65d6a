//! Email normalization and shape validation.

/// Normalize an email for storage and comparison: trim whitespace, lowercase.
/// The auth provider treats emails case-insensitively; we store the canonical
/// lowercase form so lookups against `usuarios.email` stay consistent.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Shape-check an email: exactly one `@`, non-empty local part, domain with a
/// dot, no whitespace. Deliverability is the provider's problem, not ours.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
