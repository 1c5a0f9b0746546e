//! Field validators applied before anything reaches the database.
//!
//! SQLite does not enforce `varchar(n)` lengths, so the limits of the
//! persisted layout are checked here for every backend.

use crate::service::error::ServiceError;

pub const USERNAME_MAX_LEN: usize = 150;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const TAG_NAME_MAX_LEN: usize = 50;
pub const VIDEO_TITLE_MAX_LEN: usize = 100;
pub const VIDEO_SLUG_MAX_LEN: usize = 50;
pub const THUMBNAIL_MAX_LEN: usize = 100;
pub const VIDEO_PATH_MAX_LEN: usize = 255;

pub const THUMBNAIL_DIR: &str = "thumbnails/";

pub(crate) fn non_blank(field_name: &'static str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::bad_request(format!(
            "field `{field_name}` must be a non-empty string"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trims `value` and checks it is non-empty and at most `max_len` characters.
pub(crate) fn required_text(
    field_name: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, ServiceError> {
    let trimmed = non_blank(field_name, value)?;
    optional_text(field_name, &trimmed, max_len)
}

pub(crate) fn optional_text(
    field_name: &'static str,
    value: &str,
    max_len: usize,
) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > max_len {
        return Err(ServiceError::bad_request(format!(
            "field `{field_name}` must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn slug(value: &str) -> Result<String, ServiceError> {
    let slug = required_text("slug", value, VIDEO_SLUG_MAX_LEN)?;
    let is_valid = slug
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_'));
    if !is_valid {
        return Err(ServiceError::bad_request(
            "field `slug` may only contain letters, numbers, underscores or hyphens",
        ));
    }
    Ok(slug)
}

/// Normalizes a thumbnail to a relative path under `thumbnails/`.
///
/// A bare file name is placed in the directory; a path that already starts
/// with it is kept as is.
pub(crate) fn thumbnail_path(value: &str) -> Result<String, ServiceError> {
    let raw = required_text("thumbnail", value, THUMBNAIL_MAX_LEN)?;
    if raw.starts_with('/') || raw.contains('\\') || raw.split('/').any(|part| part == "..") {
        return Err(ServiceError::bad_request(
            "field `thumbnail` must be a relative path without `..`",
        ));
    }

    let path = if raw.starts_with(THUMBNAIL_DIR) {
        raw
    } else if raw.contains('/') {
        return Err(ServiceError::bad_request(format!(
            "field `thumbnail` must be stored under `{THUMBNAIL_DIR}`"
        )));
    } else {
        format!("{THUMBNAIL_DIR}{raw}")
    };

    if path.len() == THUMBNAIL_DIR.len() {
        return Err(ServiceError::bad_request(
            "field `thumbnail` must name a file",
        ));
    }
    optional_text("thumbnail", &path, THUMBNAIL_MAX_LEN)
}

pub(crate) fn email(value: &str) -> Result<String, ServiceError> {
    let email = optional_text("email", value, EMAIL_MAX_LEN)?;
    if email.is_empty() {
        return Ok(email);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ServiceError::bad_request("field `email` must be an email address"));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ServiceError::bad_request("field `email` must be an email address"));
    }
    Ok(email)
}

/// Sorts and de-duplicates a list of ids.
pub(crate) fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
