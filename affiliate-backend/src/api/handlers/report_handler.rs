// affiliate-backend/src/api/handlers/report_handler.rs

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::api::dto::report_dto::{ReportCreate, ReportListResponse, ReportOut, ReportQuery};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

/// レポート作成
pub async fn create_report_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<ReportCreate>,
) -> AppResult<Json<ReportOut>> {
    Ok(Json(
        app_state.report_service.create_report(&user, request).await?,
    ))
}

/// ロール別スコープのレポート一覧と集計
pub async fn get_report_handler(
    user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
    State(app_state): State<AppState>,
) -> AppResult<Json<ReportListResponse>> {
    Ok(Json(
        app_state.report_service.get_reports(&user, query).await?,
    ))
}

/// レポートのルーター
pub fn report_router(app_state: AppState) -> Router {
    Router::new()
        .route("/reports/create", post(create_report_handler))
        .route("/Affiliate/GetReport", get(get_report_handler))
        .with_state(app_state)
}
