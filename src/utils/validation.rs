// utils/validation.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, digits and underscores only
pub static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Optional leading `+`, then digits with optional spaces, dashes or parentheses
pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()\-]{5,19}$").unwrap());
