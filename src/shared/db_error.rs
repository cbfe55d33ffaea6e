use sea_orm::{DbErr, SqlErr};

/// Integrity violations raised by PostgreSQL that adapters translate into
/// domain errors instead of generic database failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

impl ConstraintViolation {
    pub fn message(&self) -> &str {
        match self {
            ConstraintViolation::Unique(msg) | ConstraintViolation::ForeignKey(msg) => msg,
        }
    }
}

/// Classify a `DbErr`. The driver error code is checked first; the message
/// fallback covers errors that arrive already stringified.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            return Some(ConstraintViolation::Unique(msg))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return Some(ConstraintViolation::ForeignKey(msg))
        }
        _ => {}
    }

    let text = err.to_string();
    let lowered = text.to_lowercase();

    if lowered.contains("23505")
        || lowered.contains("duplicate key")
        || lowered.contains("unique constraint")
    {
        Some(ConstraintViolation::Unique(text))
    } else if lowered.contains("23503") || lowered.contains("foreign key constraint") {
        Some(ConstraintViolation::ForeignKey(text))
    } else {
        None
    }
}
