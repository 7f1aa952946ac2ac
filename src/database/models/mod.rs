pub mod admin;
pub mod article;
pub mod founders_message;
pub mod hero_slide;
pub mod macros;
pub mod media;
pub mod metrics;
pub mod team_member;
pub mod team_member_image;

// Re-export all models for easy importing
pub use admin::*;
pub use article::*;
pub use founders_message::*;
pub use hero_slide::*;
pub use media::*;
pub use metrics::*;
pub use team_member::*;
pub use team_member_image::*;

/// Trims a required text field, rejecting blank values.
pub(crate) fn required(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trims an optional text field, mapping blank values to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
