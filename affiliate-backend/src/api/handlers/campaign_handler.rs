// affiliate-backend/src/api/handlers/campaign_handler.rs

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::dto::campaign_dto::{CampaignCreate, CampaignOut, CampaignQuery};
use crate::api::dto::common::ApiEnvelope;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

/// ローカルキャンペーンの登録（管理者のみ）
pub async fn add_campaign_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<CampaignCreate>,
) -> AppResult<ApiEnvelope<()>> {
    app_state
        .campaign_service
        .create_campaign(&user, request)
        .await
}

/// キャンペーン一覧（商品込み、ロール別スコープ）
pub async fn get_campaigns_handler(
    user: AuthenticatedUser,
    Query(query): Query<CampaignQuery>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<Vec<CampaignOut>>> {
    app_state.campaign_service.list_campaigns(&user, query).await
}

/// キャンペーンのルーター
pub fn campaign_router(app_state: AppState) -> Router {
    Router::new()
        .route("/admin/add-campaign", post(add_campaign_handler))
        .route("/Affiliate/GetCampaigns", get(get_campaigns_handler))
        .with_state(app_state)
}
