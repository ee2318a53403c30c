// affiliate-backend/src/api/handlers/link_handler.rs

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::api::dto::common::ApiEnvelope;
use crate::api::dto::link_dto::{GenerateLinkRequest, GeneratedLinkData, TrackData};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

/// トラッキングリンクの発行（冪等）
pub async fn generate_link_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<GenerateLinkRequest>,
) -> AppResult<ApiEnvelope<GeneratedLinkData>> {
    app_state.link_service.generate_link(&user, request).await
}

/// クリックの記録とリダイレクト先の解決
///
/// トラッキングリンクを踏んだ訪問者が叩くため認証なし
pub async fn track_link_handler(
    Path(token): Path<String>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<TrackData>> {
    app_state.link_service.track_click(&token).await
}

/// リンク発行・クリック記録のルーター
pub fn link_router(app_state: AppState) -> Router {
    Router::new()
        .route("/Affiliate/GenerateLink", put(generate_link_handler))
        .route("/track/{token}", get(track_link_handler))
        .with_state(app_state)
}
