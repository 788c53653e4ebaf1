//! User repository. Ported from
//! `original_source/auth-service/internal/infrastructure/persistence/users_repo.go`:
//! a unique-email violation on insert is mapped to `DomainError::AlreadyExists`
//! rather than surfacing the raw constraint error, and a missing row on
//! lookup is mapped to `DomainError::NotFound` instead of propagating
//! `RowNotFound`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tb_domain::value_objects::{Email, UserName};
use tb_domain::{DomainError, PasswordHash, User};

use crate::tx::RequestCtx;

const EMAIL_UNIQUE_CONSTRAINT: &str = "ux_users_email";

#[derive(sqlx::FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn into_domain(self) -> Result<User, DomainError> {
        Ok(User::rehydrate(
            self.id,
            Email::new(self.email)?,
            UserName::new(self.username)?,
            PasswordHash::from_hashed(self.password_hash),
            self.created_at,
        ))
    }
}

pub async fn create(ctx: &RequestCtx, user: &User) -> Result<(), DomainError> {
    let query = sqlx::query(
        "insert into users (id, email, username, password_hash, created_at) values ($1, $2, $3, $4, $5)",
    )
    .bind(user.id())
    .bind(user.email().as_str())
    .bind(user.username().as_str())
    .bind(user.password_hash().as_str())
    .bind(user.created_at());

    ctx.execute(query).await.map_err(|e| match &e {
        DomainError::AlreadyExists(constraint) if constraint == EMAIL_UNIQUE_CONSTRAINT => {
            DomainError::AlreadyExists("email already registered".into())
        }
        _ => e,
    })?;
    Ok(())
}

pub async fn get_by_email(ctx: &RequestCtx, email: &Email) -> Result<Option<User>, DomainError> {
    let query = sqlx::query_as::<_, UserRecord>(
        "select id, email, username, password_hash, created_at from users where email = $1",
    )
    .bind(email.as_str());
    match ctx.fetch_optional(query).await? {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}

pub async fn get_by_id(ctx: &RequestCtx, id: Uuid) -> Result<Option<User>, DomainError> {
    let query = sqlx::query_as::<_, UserRecord>(
        "select id, email, username, password_hash, created_at from users where id = $1",
    )
    .bind(id);
    match ctx.fetch_optional(query).await? {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}
