//! Auth RPC surface (§6, collaborator): `Register`, `Login`.

use async_trait::async_trait;

use tb_schemas::AuthResultDto;
use tb_usecases::auth::{AuthUseCases, LoginInput, RegisterInput};

use crate::dto::user_dto;
use crate::status::WireResult;

#[async_trait]
pub trait Auth: Send + Sync {
    async fn register(&self, email: String, username: String, password: String) -> WireResult<AuthResultDto>;
    async fn login(&self, email: String, password: String) -> WireResult<AuthResultDto>;
}

pub struct AuthService {
    use_cases: AuthUseCases,
}

impl AuthService {
    pub fn new(use_cases: AuthUseCases) -> Self {
        Self { use_cases }
    }
}

#[async_trait]
impl Auth for AuthService {
    async fn register(&self, email: String, username: String, password: String) -> WireResult<AuthResultDto> {
        let result = self
            .use_cases
            .register(RegisterInput {
                email,
                username,
                password,
            })
            .await?;
        Ok(AuthResultDto {
            user: user_dto(&result.user),
            access_token: result.access_token,
        })
    }

    async fn login(&self, email: String, password: String) -> WireResult<AuthResultDto> {
        let result = self.use_cases.login(LoginInput { email, password }).await?;
        Ok(AuthResultDto {
            user: user_dto(&result.user),
            access_token: result.access_token,
        })
    }
}
