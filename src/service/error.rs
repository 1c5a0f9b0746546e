use sea_orm::{DbErr, SqlErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    /// A delete was refused because dependent rows still reference the record.
    Protected,
    Internal,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    kind: ServiceErrorKind,
    message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Conflict, message)
    }

    pub fn protected(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Protected, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Internal, message)
    }

    pub fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn is_unique_violation(lowered: &str) -> bool {
    lowered.contains("unique constraint failed")
        || lowered.contains("violates unique constraint")
}

fn is_foreign_key_violation(lowered: &str) -> bool {
    lowered.contains("foreign key constraint failed")
        || lowered.contains("violates foreign key constraint")
}

pub(crate) fn map_db_error(error: DbErr) -> ServiceError {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => return ServiceError::conflict(message),
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            return ServiceError::conflict(message);
        }
        _ => {}
    }

    match error {
        DbErr::RecordNotFound(message) => ServiceError::not_found(message),
        DbErr::RecordNotUpdated => ServiceError::not_found("record was not updated"),
        DbErr::Json(message) | DbErr::Type(message) => ServiceError::bad_request(message),
        other => {
            let message = other.to_string();
            let lowered = message.to_ascii_lowercase();

            if is_unique_violation(&lowered) || is_foreign_key_violation(&lowered) {
                ServiceError::conflict(message)
            } else if lowered.contains("not null constraint failed")
                || lowered.contains("check constraint failed")
                || lowered.contains("violates not-null constraint")
                || lowered.contains("violates check constraint")
                || lowered.contains("datatype mismatch")
            {
                ServiceError::bad_request(message)
            } else {
                ServiceError::internal(message)
            }
        }
    }
}

/// Like [`map_db_error`], but a foreign key failure on delete means a
/// `RESTRICT` reference blocked it.
pub(crate) fn map_delete_error(error: DbErr) -> ServiceError {
    if let Some(SqlErr::ForeignKeyConstraintViolation(message)) = error.sql_err() {
        return ServiceError::protected(message);
    }

    let message = error.to_string();
    if is_foreign_key_violation(&message.to_ascii_lowercase()) {
        return ServiceError::protected(message);
    }

    map_db_error(error)
}
