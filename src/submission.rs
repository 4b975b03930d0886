use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 120;
pub const PHONE_MAX_LEN: usize = 40;
pub const SERVICE_MAX_LEN: usize = 80;
pub const MESSAGE_MAX_LEN: usize = 1000;

pub const NAME_MIN_LEN: usize = 2;

pub const NAME_TOO_SHORT: &str = "Name or organization must be at least 2 characters long.";
pub const PHONE_INVALID: &str = "Phone number is invalid. Example: +998 90 123 45 67.";

// Accepts +998 90 123 45 67, 901234567, or similar international formats.
// Anchored at both ends so trailing garbage after a valid prefix is rejected.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d[\d\s()\-]{7,}$").expect("invalid phone pattern"));

/// Trims surrounding whitespace and cuts the value down to at most `max_len`
/// characters. The cutoff can land just past an inner space, so the tail is
/// trimmed again; cleaning an already-clean value changes nothing.
pub fn clean_text(value: &str, max_len: usize) -> String {
    let value = value.trim();
    if value.chars().count() > max_len {
        let cut: String = value.chars().take(max_len).collect();
        cut.trim_end().to_string()
    } else {
        value.to_string()
    }
}

/// Shape check only, the number is stored exactly as the user typed it.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// The cleaned (trimmed and truncated) form fields, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl ContactForm {
    pub fn from_raw(name: &str, phone: &str, service: &str, message: &str) -> Self {
        Self {
            name: clean_text(name, NAME_MAX_LEN),
            phone: clean_text(phone, PHONE_MAX_LEN),
            service: clean_text(service, SERVICE_MAX_LEN),
            message: clean_text(message, MESSAGE_MAX_LEN),
        }
    }

    /// Runs every rule and collects the failures in order: the name rule
    /// first, then the phone rule. An empty list means the form is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.chars().count() < NAME_MIN_LEN {
            errors.push(NAME_TOO_SHORT.to_string());
        }

        if !is_valid_phone(&self.phone) {
            errors.push(PHONE_INVALID.to_string());
        }

        errors
    }

    /// Stamps the acceptance time. Only call on a form that validated.
    pub fn to_submission(&self) -> Submission {
        Submission {
            name: self.name.clone(),
            phone: self.phone.clone(),
            service: self.service.clone(),
            message: self.message.clone(),
            created_at: Utc::now(),
        }
    }
}

/// One accepted contact request, exactly what gets written to both sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
