use crate::error::ClassroomError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_REASON_LENGTH: usize = 500;

/// Course statuses the backend filters on.
pub const COURSE_STATUSES: &[&str] = &["draft", "pending", "published", "rejected", "archived"];

/// Quiz statuses the backend filters on.
pub const QUIZ_STATUSES: &[&str] = &["draft", "published"];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, ClassroomError> {
    if input.len() > max_len {
        return Err(ClassroomError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(ClassroomError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, ClassroomError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate a rejection reason sent with a course rejection.
pub fn validate_reason(input: &str) -> Result<String, ClassroomError> {
    sanitize_text(input, MAX_REASON_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, ClassroomError> {
    if page < 1 {
        return Err(ClassroomError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate a resource ID (must be >= 1).
pub fn validate_id(id: i64) -> Result<i64, ClassroomError> {
    if id < 1 {
        return Err(ClassroomError::InvalidInput(format!(
            "invalid id {}: must be >= 1",
            id
        )));
    }
    Ok(id)
}

/// Validate a course status: case-insensitive, checked against known statuses.
pub fn validate_course_status(input: &str) -> Result<String, ClassroomError> {
    validate_choice(input, COURSE_STATUSES, "course status")
}

/// Validate a quiz status: case-insensitive, checked against known statuses.
pub fn validate_quiz_status(input: &str) -> Result<String, ClassroomError> {
    validate_choice(input, QUIZ_STATUSES, "quiz status")
}

fn validate_choice(input: &str, allowed: &[&str], what: &str) -> Result<String, ClassroomError> {
    let lower = input.trim().to_lowercase();
    if allowed.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(ClassroomError::InvalidInput(format!(
            "unknown {} '{}'. Valid values: {}",
            what,
            input,
            allowed.join(", ")
        )))
    }
}
