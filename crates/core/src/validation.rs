//! Input validation for employee requests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::CreateEmployeeRequest;

/// Minimum accepted full-name length in characters.
pub const FULL_NAME_MIN_CHARS: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});

/// Checks email shape: local part, `@`, dotted domain with an alphabetic TLD.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks a full name against the blank/length rules, returning a problem
/// description when it fails.
pub fn check_full_name(full_name: &str) -> Option<String> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Some("fullName must not be blank".to_string());
    }
    if trimmed.chars().count() < FULL_NAME_MIN_CHARS {
        return Some(format!(
            "fullName must be at least {FULL_NAME_MIN_CHARS} characters"
        ));
    }
    None
}

/// Validates a create request, returning every problem found.
///
/// An empty vector means the request is acceptable.
pub fn validate_new_employee(req: &CreateEmployeeRequest) -> Vec<String> {
    let mut problems = Vec::new();

    if let Some(problem) = check_full_name(&req.full_name) {
        problems.push(problem);
    }

    if req.email.trim().is_empty() {
        problems.push("email must not be blank".to_string());
    } else if !is_valid_email(&req.email) {
        problems.push("email must be a valid email address".to_string());
    }

    problems
}
