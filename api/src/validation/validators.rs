//! Field validators for the contact form.

use lazy_static::lazy_static;
use regex::Regex;

use shared::BUDGET_RANGES;

lazy_static! {
    /// Strict email grammar: local part, `@`, domain with a TLD of at
    /// least two letters.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();

    /// Indian mobile numbers: optional +91 prefix, then 10 digits
    /// starting 6-9. Applied after whitespace/hyphen stripping.
    static ref PHONE_REGEX: Regex = Regex::new(r"^(\+91)?[6-9]\d{9}$").unwrap();

    /// Letters, spaces and basic name punctuation.
    static ref NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z\s.'-]+$").unwrap();
}

/// Validate that a string is not empty after trimming.
pub fn validate_required(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field_name));
    }
    Ok(())
}

/// Validate string length within bounds (counted in characters).
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min {
        return Err(format!("must be at least {} characters", min));
    }
    if len > max {
        return Err(format!("must be at most {} characters", max));
    }
    Ok(())
}

/// Validate a person's name: letters, spaces and basic punctuation only.
pub fn validate_name_chars(name: &str) -> Result<(), String> {
    if !NAME_REGEX.is_match(name) {
        return Err("can only contain letters, spaces, and basic punctuation".to_string());
    }
    Ok(())
}

/// Validate an email address against the strict grammar.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("email is required".to_string());
    }
    if email.chars().count() > 254 {
        return Err("email must be at most 254 characters".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("must be a valid email address".to_string());
    }
    Ok(())
}

/// Validate an optional phone number. Expects whitespace and hyphens to
/// be stripped already; absent or empty is always valid.
pub fn validate_phone_optional(phone: &Option<String>) -> Result<(), String> {
    match phone {
        Some(value) if !value.is_empty() => {
            if PHONE_REGEX.is_match(value) {
                Ok(())
            } else {
                Err("must be a valid Indian phone number".to_string())
            }
        }
        _ => Ok(()),
    }
}

/// Validate an optional budget selection against the fixed set of ranges.
pub fn validate_budget_optional(budget: &Option<String>) -> Result<(), String> {
    match budget {
        Some(value) if !BUDGET_RANGES.contains(&value.as_str()) => {
            Err("invalid budget range selected".to_string())
        }
        _ => Ok(()),
    }
}

/// Validate an optional source value against the fixed set.
pub fn validate_source_optional(source: &Option<String>) -> Result<(), String> {
    match source {
        Some(value) if !value.is_empty() && shared::SubmissionSource::parse(value).is_none() => {
            Err("invalid source value".to_string())
        }
        _ => Ok(()),
    }
}
