//! Authentication endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use validator::Validate;
use yatube_common::AppResult;

use crate::{extractors::AuthUser, middleware::AppState};

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub name: Option<String>,
}

/// Signup response.
#[derive(Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// Create a new user account.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<SignupResponse>> {
    req.validate()?;

    let input = yatube_core::CreateUserInput {
        username: req.username,
        password: req.password,
        name: req.name,
    };

    let user = state.user_service.create(input).await?;

    Ok(Json(SignupResponse {
        id: user.id.clone(),
        username: user.username,
        token: user.token.unwrap_or_default(),
    }))
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// Sign in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .user_service
        .authenticate(&req.username, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        id: user.id.clone(),
        username: user.username,
        token: user.token.unwrap_or_default(),
    }))
}

/// Query for the login landing page.
#[derive(Debug, Deserialize)]
struct LoginPageQuery {
    next: Option<String>,
}

/// Login landing page body.
#[derive(Serialize)]
struct LoginPageResponse {
    detail: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

/// Landing page anonymous callers are redirected to. Echoes the `next`
/// destination so a client can resume after signing in.
async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<LoginPageResponse> {
    Json(LoginPageResponse {
        detail: "Authentication required",
        next: query.next,
    })
}

/// Logout response.
#[derive(Serialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Sign out (invalidate the current token by regenerating).
async fn logout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<LogoutResponse>> {
    state.user_service.regenerate_token(&user.id).await?;

    Ok(Json(LogoutResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup/", post(signup))
        .route("/auth/login/", get(login_page).post(login))
        .route("/auth/logout/", post(logout))
}
