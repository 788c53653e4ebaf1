//! Auth collaborator internals (C12): Argon2id password hashing and HS256
//! JWT minting/verification. Grounded on
//! `original_source/auth-service/internal/usecase/{register,login,common}.go`
//! semantics — the source hashes with bcrypt; §4.8 calls for "an adaptive
//! cost (≥10) password-hashing primitive" and `argon2`/`jsonwebtoken` are the
//! crates the rest of the retrieval pack (`other_examples/manifests/Plawn-r2e`)
//! reaches for to satisfy exactly that, so this substitutes Argon2id for
//! bcrypt rather than hand-rolling one.
//!
//! `tb-domain::User`/`PasswordHash` never see a raw password; this crate is
//! the only place a plaintext `Password` value object is turned into
//! storage bytes or back.

use std::time::Duration;

use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash as Argon2Hash, PasswordHasher, PasswordVerifier, SaltString};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use tb_domain::value_objects::Password;
use tb_domain::PasswordHash as DomainPasswordHash;

/// `t_cost` (iteration count) of 10 meets the "adaptive cost ≥10" wording of
/// §4.8 directly; `m_cost`/`p_cost` keep the RFC 9106 recommended memory
/// cost for Argon2id rather than loosening it alongside the higher `t_cost`.
const T_COST: u32 = 10;
const M_COST: u32 = 19456;
const P_COST: u32 = 1;

fn hasher() -> Argon2<'static> {
    let params = Params::new(M_COST, T_COST, P_COST, None).expect("static argon2 params are valid");
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

/// Hash a plaintext password for storage. Never fails for a validated
/// `Password` value object — failure here would indicate an Argon2 params
/// bug, not bad input.
pub fn hash_password(password: &Password) -> anyhow::Result<DomainPasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
    Ok(DomainPasswordHash::from_hashed(hash.to_string()))
}

/// Constant-time verification via `argon2`'s own verifier. Returns `false`
/// (not an error) on a malformed stored hash — treated identically to a
/// wrong password by the caller, per §4.8's "never distinguish" rule.
pub fn verify_password(password: &Password, stored: &DomainPasswordHash) -> bool {
    let Ok(parsed) = Argon2Hash::new(stored.as_str()) else {
        return false;
    };
    hasher()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mint a signed access token for `user_id`, valid for `ttl` from now.
pub fn mint_token(user_id: uuid::Uuid, secret: &str, ttl: Duration) -> anyhow::Result<String> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + chrono::Duration::from_std(ttl)?).timestamp(),
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

/// Verify and decode a token minted by [`mint_token`]. `jsonwebtoken`
/// enforces `exp` during decode; an expired or mis-signed token surfaces as
/// an error here, which the gateway maps to unauthenticated.
pub fn verify_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(jsonwebtoken::Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let password = Password::new("correcthorse").unwrap();
        let hash = hash_password(&password).unwrap();
        assert!(verify_password(&password, &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let password = Password::new("correcthorse").unwrap();
        let hash = hash_password(&password).unwrap();
        let wrong = Password::new("wrongpassword").unwrap();
        assert!(!verify_password(&wrong, &hash));
    }

    #[test]
    fn malformed_stored_hash_is_treated_as_mismatch_not_error() {
        let password = Password::new("correcthorse").unwrap();
        let garbage = DomainPasswordHash::from_hashed("not-a-real-hash".to_string());
        assert!(!verify_password(&password, &garbage));
    }

    #[test]
    fn mint_and_verify_token_round_trips() {
        let user_id = uuid::Uuid::new_v4();
        let token = mint_token(user_id, "test-secret", Duration::from_secs(3600)).unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn verify_token_rejects_wrong_secret() {
        let user_id = uuid::Uuid::new_v4();
        let token = mint_token(user_id, "secret-a", Duration::from_secs(3600)).unwrap();
        assert!(verify_token(&token, "secret-b").is_err());
    }
}
