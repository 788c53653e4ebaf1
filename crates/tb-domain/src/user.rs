//! User aggregate — ported from
//! `original_source/auth-service/internal/domain/aggregates.go`. Disjoint
//! from the board/column/task tree; not subject to the ordering invariants.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{Email, UserName};

/// Opaque password hash. Never constructed from a raw password directly —
/// `tb-auth` owns the hashing algorithm and hands back the resulting string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_hashed(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: Email,
    username: UserName,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, username: UserName, password_hash: PasswordHash) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn rehydrate(
        id: Uuid,
        email: Email,
        username: UserName,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
