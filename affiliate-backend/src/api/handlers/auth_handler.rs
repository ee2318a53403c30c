// affiliate-backend/src/api/handlers/auth_handler.rs

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::api::dto::auth_dto::{
    DetailResponse, ForgotPasswordRequest, MeResponse, ResetPasswordRequest, TokenData,
    TokenRequest,
};
use crate::api::dto::common::ApiEnvelope;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub async fn login_handler(
    State(app_state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> AppResult<ApiEnvelope<TokenData>> {
    app_state.auth_service.login(request).await
}

pub async fn me_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
) -> AppResult<Json<MeResponse>> {
    Ok(Json(app_state.auth_service.me(&user).await?))
}

pub async fn forgot_password_handler(
    State(app_state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> AppResult<Json<DetailResponse>> {
    Ok(Json(app_state.auth_service.forgot_password(request).await?))
}

pub async fn reset_password_handler(
    State(app_state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> AppResult<Json<DetailResponse>> {
    Ok(Json(app_state.auth_service.reset_password(request).await?))
}

/// 認証まわりのルーター
pub fn auth_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/users/me", get(me_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route("/reset-password", post(reset_password_handler))
        .with_state(app_state)
}
