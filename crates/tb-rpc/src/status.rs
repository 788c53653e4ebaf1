//! Wire status mapping (§4.8's error table). `tb-rpc` is the only layer that
//! translates a `DomainError` into something a transport cares about —
//! use-cases and repositories below it only ever speak `DomainError`.

use tb_domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireStatus {
    InvalidArgument,
    NotFound,
    PermissionDenied,
    AlreadyExists,
    Unauthenticated,
    Internal,
}

#[derive(Debug, Clone)]
pub struct WireError {
    pub status: WireStatus,
    pub message: String,
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.status, self.message)
    }
}

impl std::error::Error for WireError {}

impl From<DomainError> for WireError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::InvalidArgument(_) => WireStatus::InvalidArgument,
            DomainError::NotFound(_) => WireStatus::NotFound,
            DomainError::OwnerMismatch => WireStatus::PermissionDenied,
            DomainError::AlreadyExists(_) => WireStatus::AlreadyExists,
            DomainError::InvalidCredentials => WireStatus::Unauthenticated,
            DomainError::InvariantViolation(_) | DomainError::Transient(_) | DomainError::Internal(_) => {
                WireStatus::Internal
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

pub type WireResult<T> = Result<T, WireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_mismatch_maps_to_permission_denied() {
        let err: WireError = DomainError::OwnerMismatch.into();
        assert_eq!(err.status, WireStatus::PermissionDenied);
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err: WireError = DomainError::NotFound("board x".into()).into();
        assert_eq!(err.status, WireStatus::NotFound);
    }

    #[test]
    fn invalid_credentials_maps_to_unauthenticated() {
        let err: WireError = DomainError::InvalidCredentials.into();
        assert_eq!(err.status, WireStatus::Unauthenticated);
    }

    #[test]
    fn transient_and_invariant_violation_map_to_internal() {
        let a: WireError = DomainError::Transient("pool exhausted".into()).into();
        let b: WireError = DomainError::InvariantViolation("empty board".into()).into();
        assert_eq!(a.status, WireStatus::Internal);
        assert_eq!(b.status, WireStatus::Internal);
    }
}
