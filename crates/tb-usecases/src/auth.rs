//! Auth use-cases. Ported from
//! `original_source/auth-service/internal/usecase/{register,login}.go`.

use tb_config::JwtConfig;
use tb_db::{users, TxManager};
use tb_domain::value_objects::{Email, Password, UserName};
use tb_domain::{DomainError, DomainResult, User};

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct AuthResult {
    pub user: User,
    pub access_token: String,
}

pub struct AuthUseCases {
    tx: TxManager,
    jwt: JwtConfig,
}

impl AuthUseCases {
    pub fn new(tx: TxManager, jwt: JwtConfig) -> Self {
        Self { tx, jwt }
    }

    pub async fn register(&self, input: RegisterInput) -> DomainResult<AuthResult> {
        let email = Email::new(input.email)?;
        let username = UserName::new(input.username)?;
        let password = Password::new(input.password)?;

        let hash = tb_auth::hash_password(&password)
            .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))?;

        let root = self.tx.root_ctx();
        let user = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let user = User::new(email, username, hash);
                users::create(&ctx, &user).await?;
                Ok(user)
            })
            .await?;

        let access_token = self.mint(&user)?;
        Ok(AuthResult { user, access_token })
    }

    /// Never distinguishes an unknown email from a wrong password — both
    /// surface as `InvalidCredentials` (§4.8).
    pub async fn login(&self, input: LoginInput) -> DomainResult<AuthResult> {
        let email = Email::new(input.email)?;
        let password = Password::new(input.password)?;

        let ctx = self.tx.root_ctx();
        let user = users::get_by_email(&ctx, &email).await?.ok_or(DomainError::InvalidCredentials)?;

        if !tb_auth::verify_password(&password, user.password_hash()) {
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self.mint(&user)?;
        Ok(AuthResult { user, access_token })
    }

    fn mint(&self, user: &User) -> DomainResult<String> {
        tb_auth::mint_token(user.id(), &self.jwt.secret, self.jwt.access_token_ttl)
            .map_err(|e| DomainError::Internal(format!("token minting failed: {e}")))
    }
}
