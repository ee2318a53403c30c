// affiliate-backend/src/api/handlers/dashboard_handler.rs

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::api::dto::dashboard_dto::{ActivityOut, DashboardQuery, DashboardSummaryResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

pub async fn dashboard_summary_handler(
    user: AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
    State(app_state): State<AppState>,
) -> AppResult<Json<DashboardSummaryResponse>> {
    Ok(Json(app_state.dashboard_service.summary(&user, query).await?))
}

pub async fn dashboard_activity_handler(
    user: AuthenticatedUser,
    Query(query): Query<DashboardQuery>,
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<ActivityOut>>> {
    Ok(Json(
        app_state.dashboard_service.activity(&user, query).await?,
    ))
}

/// ダッシュボードのルーター
pub fn dashboard_router(app_state: AppState) -> Router {
    Router::new()
        .route("/dashboard/summary", get(dashboard_summary_handler))
        .route("/dashboard/activity", get(dashboard_activity_handler))
        .with_state(app_state)
}
