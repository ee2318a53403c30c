// affiliate-backend/src/api/handlers/admin_handler.rs

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::api::dto::common::ApiEnvelope;
use crate::api::dto::company_dto::{
    AddCompanyUserQuery, CompanyCreate, CompanyListQuery, CompanyOut, CompanyUpdate, UserCreate,
};
use crate::api::dto::import_dto::{ImportQuery, ImportRequest, ImportResultData};
use crate::api::dto::influencer_dto::{
    AddInfluencerData, CampaignInfluencersQuery, InfluencerCreate, InfluencerDetail,
    InfluencerListQuery, InfluencerOut, InfluencerSummary, InfluencerUpdate,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;

// --- 会社管理 ---

pub async fn create_company_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<CompanyCreate>,
) -> AppResult<Json<CompanyOut>> {
    Ok(Json(
        app_state.company_service.create_company(&user, request).await?,
    ))
}

pub async fn list_companies_handler(
    user: AuthenticatedUser,
    Query(query): Query<CompanyListQuery>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<Vec<CompanyOut>>> {
    let companies = app_state.company_service.list_companies(&user, query).await?;
    Ok(ApiEnvelope::ok(companies))
}

pub async fn get_company_handler(
    user: AuthenticatedUser,
    Path(company_id): Path<i32>,
    State(app_state): State<AppState>,
) -> AppResult<Json<CompanyOut>> {
    Ok(Json(
        app_state.company_service.get_company(&user, company_id).await?,
    ))
}

pub async fn update_company_handler(
    user: AuthenticatedUser,
    Path(company_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(request): Json<CompanyUpdate>,
) -> AppResult<ApiEnvelope<CompanyOut>> {
    let company = app_state
        .company_service
        .update_company(&user, company_id, request)
        .await?;
    Ok(ApiEnvelope::ok_with_message(company, "Company updated"))
}

pub async fn add_company_user_handler(
    user: AuthenticatedUser,
    Query(query): Query<AddCompanyUserQuery>,
    State(app_state): State<AppState>,
    Json(request): Json<UserCreate>,
) -> AppResult<ApiEnvelope<()>> {
    app_state
        .company_service
        .add_company_user(&user, query.company_id, request)
        .await?;
    Ok(ApiEnvelope::ok_with_message((), "User added successfully"))
}

// --- インフルエンサー管理 ---

pub async fn add_influencer_handler(
    user: AuthenticatedUser,
    State(app_state): State<AppState>,
    Json(request): Json<InfluencerCreate>,
) -> AppResult<ApiEnvelope<AddInfluencerData>> {
    let data = app_state
        .influencer_service
        .add_influencer(&user, request)
        .await?;
    Ok(ApiEnvelope::ok_with_message(
        data,
        "Influencer created and password reset link sent",
    ))
}

pub async fn list_influencers_handler(
    user: AuthenticatedUser,
    Query(query): Query<InfluencerListQuery>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<Vec<InfluencerSummary>>> {
    let influencers = app_state
        .influencer_service
        .list_influencers(&user, query.name)
        .await?;
    Ok(ApiEnvelope::ok(influencers))
}

pub async fn get_influencer_handler(
    user: AuthenticatedUser,
    Path(influencer_id): Path<i32>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<InfluencerDetail>> {
    let influencer = app_state
        .influencer_service
        .get_influencer(&user, influencer_id)
        .await?;
    Ok(ApiEnvelope::ok(influencer))
}

pub async fn update_influencer_handler(
    user: AuthenticatedUser,
    Path(influencer_id): Path<i32>,
    State(app_state): State<AppState>,
    Json(request): Json<InfluencerUpdate>,
) -> AppResult<ApiEnvelope<InfluencerDetail>> {
    let influencer = app_state
        .influencer_service
        .update_influencer(&user, influencer_id, request)
        .await?;
    Ok(ApiEnvelope::ok_with_message(influencer, "Influencer updated"))
}

/// キャンペーン参加インフルエンサー、または全件の一覧
pub async fn list_campaign_influencers_handler(
    user: AuthenticatedUser,
    Query(query): Query<CampaignInfluencersQuery>,
    State(app_state): State<AppState>,
) -> AppResult<ApiEnvelope<Vec<InfluencerOut>>> {
    let influencers = app_state
        .influencer_service
        .list_for_campaign(&user, query.campaign_id)
        .await?;
    Ok(ApiEnvelope::ok(influencers))
}

// --- リコンシリエーション ---

/// 外部フィードのキャンペーン配列をローカルへマージ
pub async fn import_mlink_campaigns_handler(
    user: AuthenticatedUser,
    Query(query): Query<ImportQuery>,
    State(app_state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> AppResult<ApiEnvelope<ImportResultData>> {
    app_state
        .import_service
        .import_campaigns(&user, query.company_id, request)
        .await
}

/// 管理系のルーター
pub fn admin_router(app_state: AppState) -> Router {
    Router::new()
        .route("/admin/create_company", post(create_company_handler))
        .route("/admin/list_companies", get(list_companies_handler))
        .route("/admin/companies/{id}", get(get_company_handler))
        .route("/admin/companies/{id}", put(update_company_handler))
        .route("/admin/add-company-user", post(add_company_user_handler))
        .route("/admin/add-influencer", post(add_influencer_handler))
        .route("/admin/list_influencers", get(list_influencers_handler))
        .route("/admin/influencers/{id}", get(get_influencer_handler))
        .route("/admin/influencers/{id}", put(update_influencer_handler))
        .route(
            "/admin/import_mlink_campaigns",
            post(import_mlink_campaigns_handler),
        )
        .route(
            "/list-influencers",
            get(list_campaign_influencers_handler),
        )
        .with_state(app_state)
}
