//! Axum router and handlers — the illustrative HTTP binding over the RPC
//! adapter (§6). `build_router` is the single entry point, matching
//! `mqk-daemon/src/routes.rs`'s shape; `main.rs` attaches tracing/CORS after
//! this call so tests can exercise the bare router.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tb_rpc::{Auth, Boards, Columns, Tasks, WireError, WireStatus};

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/boards", post(create_board).get(list_boards))
        .route(
            "/v1/boards/:board_id",
            get(get_board).put(update_board).delete(delete_board),
        )
        .route("/v1/boards/:board_id/columns", post(create_column))
        .route("/v1/columns/:column_id", get(get_column).delete(delete_column))
        .route("/v1/columns/:column_id/move", post(move_column))
        .route("/v1/columns/:column_id/tasks", post(create_task))
        .route(
            "/v1/tasks/:task_id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/v1/tasks/:task_id/move", post(move_task))
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}

async fn request_id_layer(req: axum::extract::Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("X-Request-Id", value);
    }
    resp
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WireError {
    fn into_response(self) -> Response {
        let status = match self.status {
            WireStatus::InvalidArgument => StatusCode::BAD_REQUEST,
            WireStatus::NotFound => StatusCode::NOT_FOUND,
            WireStatus::PermissionDenied => StatusCode::FORBIDDEN,
            WireStatus::AlreadyExists => StatusCode::CONFLICT,
            WireStatus::Unauthenticated => StatusCode::UNAUTHORIZED,
            WireStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Pull `requester_id` from the bearer token's `sub` claim, per §6's
/// "populated by the gateway from the bearer token's `sub` claim".
fn requester_id(headers: &HeaderMap, jwt_secret: &str) -> Result<Uuid, WireError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| WireError {
            status: WireStatus::Unauthenticated,
            message: "missing Authorization header".to_string(),
        })?;
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| WireError {
        status: WireStatus::Unauthenticated,
        message: "expected a bearer token".to_string(),
    })?;
    let claims = tb_auth::verify_token(token, jwt_secret).map_err(|_| WireError {
        status: WireStatus::Unauthenticated,
        message: "invalid or expired token".to_string(),
    })?;
    claims.sub.parse::<Uuid>().map_err(|_| WireError {
        status: WireStatus::Unauthenticated,
        message: "token subject is not a valid user id".to_string(),
    })
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CreateBoardBody {
    title: String,
    #[serde(default)]
    description: String,
}

async fn create_board(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateBoardBody>,
) -> Response {
    let Ok(requester_id) = requester_id(&headers, &st.cfg.jwt.secret) else {
        return WireError {
            status: WireStatus::Unauthenticated,
            message: "unauthenticated".into(),
        }
        .into_response();
    };
    match st.boards.create(requester_id, body.title, body.description).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_board(State(st): State<Arc<AppState>>, Path(board_id): Path<Uuid>) -> Response {
    match st.boards.get(board_id).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn list_boards(State(st): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Ok(requester_id) = requester_id(&headers, &st.cfg.jwt.secret) else {
        return WireError {
            status: WireStatus::Unauthenticated,
            message: "unauthenticated".into(),
        }
        .into_response();
    };
    match st.boards.list(requester_id).await {
        Ok(dtos) => Json(dtos).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
struct UpdateBoardBody {
    title: Option<String>,
    description: Option<String>,
}

async fn update_board(
    State(st): State<Arc<AppState>>,
    Path(board_id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<UpdateBoardBody>,
) -> Response {
    let Ok(requester_id) = requester_id(&headers, &st.cfg.jwt.secret) else {
        return WireError {
            status: WireStatus::Unauthenticated,
            message: "unauthenticated".into(),
        }
        .into_response();
    };
    match st
        .boards
        .update(board_id, requester_id, body.title, body.description)
        .await
    {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_board(State(st): State<Arc<AppState>>, Path(board_id): Path<Uuid>) -> Response {
    match st.boards.delete(board_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CreateColumnBody {
    position: i64,
}

async fn create_column(
    State(st): State<Arc<AppState>>,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreateColumnBody>,
) -> Response {
    match st.columns.create(board_id, body.position).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_column(State(st): State<Arc<AppState>>, Path(column_id): Path<Uuid>) -> Response {
    match st.columns.get_full(column_id).await {
        Ok(full) => Json(full).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
struct MoveColumnBody {
    to_position: i64,
}

async fn move_column(
    State(st): State<Arc<AppState>>,
    Path(column_id): Path<Uuid>,
    Json(body): Json<MoveColumnBody>,
) -> Response {
    match st.columns.r#move(column_id, body.to_position).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_column(State(st): State<Arc<AppState>>, Path(column_id): Path<Uuid>) -> Response {
    match st.columns.delete(column_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CreateTaskBody {
    position: i64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    assignee_id: Option<Uuid>,
}

async fn create_task(
    State(st): State<Arc<AppState>>,
    Path(column_id): Path<Uuid>,
    Json(body): Json<CreateTaskBody>,
) -> Response {
    match st
        .tasks
        .create(column_id, body.position, body.title, body.description, body.assignee_id)
        .await
    {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_task(State(st): State<Arc<AppState>>, Path(task_id): Path<Uuid>) -> Response {
    match st.tasks.get(task_id).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
    #[serde(default)]
    assignee_id: Option<Option<Uuid>>,
}

async fn update_task(
    State(st): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<UpdateTaskBody>,
) -> Response {
    match st
        .tasks
        .update(task_id, body.title, body.description, body.assignee_id)
        .await
    {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
struct MoveTaskBody {
    to_column: Uuid,
    to_position: i64,
}

async fn move_task(
    State(st): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<MoveTaskBody>,
) -> Response {
    match st.tasks.r#move(task_id, body.to_column, body.to_position).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_task(State(st): State<Arc<AppState>>, Path(task_id): Path<Uuid>) -> Response {
    match st.tasks.delete(task_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    username: String,
    password: String,
}

async fn register(State(st): State<Arc<AppState>>, Json(body): Json<RegisterBody>) -> Response {
    match st.auth.register(body.email, body.username, body.password).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(st): State<Arc<AppState>>, Json(body): Json<LoginBody>) -> Response {
    match st.auth.login(body.email, body.password).await {
        Ok(dto) => Json(dto).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_mismatch_maps_to_403() {
        let resp = WireError {
            status: WireStatus::PermissionDenied,
            message: "owner mismatch".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn invalid_credentials_maps_to_401() {
        let resp = WireError {
            status: WireStatus::Unauthenticated,
            message: "invalid credentials".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn requester_id_rejects_missing_auth_header() {
        let headers = HeaderMap::new();
        assert!(requester_id(&headers, "secret").is_err());
    }

    #[test]
    fn requester_id_rejects_non_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(requester_id(&headers, "secret").is_err());
    }

    #[test]
    fn requester_id_accepts_a_token_minted_with_the_same_secret() {
        let user_id = Uuid::new_v4();
        let token = tb_auth::mint_token(user_id, "secret", std::time::Duration::from_secs(3600)).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(requester_id(&headers, "secret").unwrap(), user_id);
    }
}
