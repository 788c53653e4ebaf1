//! Semantic error kinds for the domain + use-case layers.
//!
//! One flat enum rather than per-module error types, matching
//! `mqk-execution/src/gateway.rs`'s `GateRefusal` pattern: a plain enum with
//! a hand-written `Display` and `std::error::Error` impl, no `thiserror`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    InvalidArgument(String),
    NotFound(String),
    OwnerMismatch,
    AlreadyExists(String),
    InvalidCredentials,
    InvariantViolation(String),
    Transient(String),
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            DomainError::NotFound(msg) => write!(f, "not found: {msg}"),
            DomainError::OwnerMismatch => write!(f, "owner mismatch"),
            DomainError::AlreadyExists(msg) => write!(f, "already exists: {msg}"),
            DomainError::InvalidCredentials => write!(f, "invalid credentials"),
            DomainError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            DomainError::Transient(msg) => write!(f, "transient error: {msg}"),
            DomainError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
