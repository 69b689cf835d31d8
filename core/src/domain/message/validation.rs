use std::ops::RangeInclusive;

use crate::domain::message::outcome::FieldErrors;

pub const TITLE_FIELD: &str = "Title";
pub const CONTENT_FIELD: &str = "Content";
pub const IS_ACTIVE_FIELD: &str = "IsActive";

pub const TITLE_LENGTH: RangeInclusive<usize> = 3..=200;
pub const CONTENT_LENGTH: RangeInclusive<usize> = 10..=1000;

/// Checks title and content independently; both fields may report errors at once.
pub fn validate_message_fields(title: &str, content: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    validate_text(&mut errors, TITLE_FIELD, title, TITLE_LENGTH);
    validate_text(&mut errors, CONTENT_FIELD, content, CONTENT_LENGTH);
    errors
}

fn validate_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    bounds: RangeInclusive<usize>,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{field} is required."));
        return;
    }

    // Lengths count characters, not bytes
    if !bounds.contains(&trimmed.chars().count()) {
        errors.add(
            field,
            format!(
                "{field} must be between {} and {} characters.",
                bounds.start(),
                bounds.end()
            ),
        );
    }
}

/// Case-insensitive title comparison used for per-organization uniqueness.
pub fn same_title(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
