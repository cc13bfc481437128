//! Input sanitization for free-text form fields.
//!
//! Sanitization runs before validation, mirroring what the storage layer
//! would otherwise have to defend against: HTML fragments, injection
//! punctuation, runaway payload sizes.

use lazy_static::lazy_static;
use regex::Regex;

/// Hard ceiling applied to every free-text field regardless of its own
/// length limit.
pub const MAX_TEXT_LENGTH: usize = 5000;

lazy_static! {
    /// Pattern to match HTML tag sequences.
    static ref HTML_TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// Characters stripped from free text: markup delimiters, quotes and
    /// bracket/injection punctuation.
    static ref SPECIAL_CHARS: Regex = Regex::new(r#"[<>'"`;(){}\[\]]"#).unwrap();

    /// Whitespace and hyphens people type into phone numbers.
    static ref PHONE_NOISE: Regex = Regex::new(r"[\s-]").unwrap();
}

/// Clean a free-text field: strip HTML tag sequences, remove special
/// characters, cap the length and trim surrounding whitespace.
///
/// The steps run in that order so the function is idempotent: the output
/// contains no tag delimiters, is already within the cap, and carries no
/// surrounding whitespace, so a second pass changes nothing.
pub fn sanitize_text(value: &str) -> String {
    let no_tags = HTML_TAG_PATTERN.replace_all(value, "");
    let no_specials = SPECIAL_CHARS.replace_all(&no_tags, "");
    let capped: String = no_specials.chars().take(MAX_TEXT_LENGTH).collect();
    capped.trim().to_string()
}

/// Sanitize an optional free-text field, dropping it entirely when
/// nothing survives.
pub fn sanitize_text_optional(value: &mut Option<String>) {
    if let Some(ref mut s) = value {
        *s = sanitize_text(s);
        if s.is_empty() {
            *value = None;
        }
    }
}

/// Normalize an email address: trim and lowercase. Format checking is the
/// validator's job.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Strip whitespace and hyphens from a phone number, dropping the field
/// when nothing is left.
pub fn clean_phone_optional(phone: &mut Option<String>) {
    if let Some(ref mut s) = phone {
        *s = PHONE_NOISE.replace_all(s.trim(), "").to_string();
        if s.is_empty() {
            *phone = None;
        }
    }
}

/// Trim an optional field, dropping it when empty. Used for fields that
/// keep their exact content (budget selections).
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(ref mut s) = value {
        *s = s.trim().to_string();
    }
}
