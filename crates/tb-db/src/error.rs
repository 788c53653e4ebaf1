//! Maps `sqlx::Error` onto the domain's error vocabulary. Ported from
//! `mqk-db/src/lib.rs`'s `is_unique_constraint_violation` idiom: inspect the
//! Postgres `SQLSTATE` code (and, where it matters which constraint fired,
//! the constraint name) rather than string-matching the message.

use tb_domain::DomainError;

const UNIQUE_VIOLATION: &str = "23505";

pub fn map_sqlx_err(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let what = db_err.constraint().unwrap_or("unique constraint").to_string();
                DomainError::AlreadyExists(what)
            } else {
                DomainError::Transient(db_err.message().to_string())
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => DomainError::Transient(err.to_string()),
        other => DomainError::Internal(other.to_string()),
    }
}

/// True when `err` is a unique-violation on exactly `constraint`. Used where
/// the caller needs to react to one specific constraint (e.g. `users` email
/// uniqueness) rather than any unique violation.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION) && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
