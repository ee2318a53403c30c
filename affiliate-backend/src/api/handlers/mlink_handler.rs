// affiliate-backend/src/api/handlers/mlink_handler.rs

//! 外部パートナー（MLink）APIへのプロキシエンドポイント
//!
//! ローカルには何も書かず、パートナーのレスポンスをそのまま返す

use axum::{
    extract::{Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::dto::link_dto::GenerateLinkRequest;
use crate::api::AppState;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;

#[derive(Debug, Default, Deserialize)]
pub struct MlinkCampaignsQuery {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<String>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MlinkReportsQuery {
    #[serde(rename = "InfluencerID")]
    pub influencer_id: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<String>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<String>,
}

pub async fn mlink_campaigns_handler(
    _user: AuthenticatedUser,
    Query(query): Query<MlinkCampaignsQuery>,
    State(app_state): State<AppState>,
) -> AppResult<Json<Value>> {
    let mut params = Vec::new();
    if let Some(name) = query.name {
        params.push(("Name".to_string(), name));
    }
    if let Some(start_date) = query.start_date {
        params.push(("StartDate".to_string(), start_date));
    }
    if let Some(end_date) = query.end_date {
        params.push(("EndDate".to_string(), end_date));
    }

    Ok(Json(app_state.mlink_client.get_campaigns(&params).await?))
}

pub async fn mlink_reports_handler(
    user: AuthenticatedUser,
    Query(query): Query<MlinkReportsQuery>,
    State(app_state): State<AppState>,
) -> AppResult<Json<Value>> {
    if !matches!(user.role, UserRole::Admin | UserRole::Company) {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let mut params = Vec::new();
    if let Some(influencer_id) = query.influencer_id {
        params.push(("InfluencerID".to_string(), influencer_id));
    }
    if let Some(start_date) = query.start_date {
        params.push(("StartDate".to_string(), start_date));
    }
    if let Some(end_date) = query.end_date {
        params.push(("EndDate".to_string(), end_date));
    }

    Ok(Json(app_state.mlink_client.get_report(&params).await?))
}

/// パートナー側でのリンク発行
///
/// インフルエンサー本人の場合はIDと名前を自身のプロフィールで
/// 強制してから中継する
pub async fn mlink_generate_link_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(mut request): Json<GenerateLinkRequest>,
) -> AppResult<Json<Value>> {
    if user.role == UserRole::Influencer {
        let influencer = app_state
            .influencer_repo
            .find_by_user_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Influencer not found".to_string()))?;
        request.influencer_id = influencer.id.to_string();
        request.influencer_name = influencer.username;
    }

    Ok(Json(app_state.mlink_client.generate_link(&request).await?))
}

/// MLinkプロキシのルーター
pub fn mlink_router(app_state: AppState) -> Router {
    Router::new()
        .route("/mlink/campaigns", get(mlink_campaigns_handler))
        .route("/mlink/reports", get(mlink_reports_handler))
        .route("/mlink/generate-link", put(mlink_generate_link_handler))
        .with_state(app_state)
}
