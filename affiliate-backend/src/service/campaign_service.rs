// affiliate-backend/src/service/campaign_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{Set, TransactionTrait};
use tracing::info;
use validator::Validate;

use crate::api::dto::campaign_dto::{CampaignCreate, CampaignOut, CampaignQuery};
use crate::api::dto::common::ApiEnvelope;
use crate::db::DbPool;
use crate::domain::activity_log_model::NewActivity;
use crate::domain::campaign_model;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::campaign_repository::{CampaignFilter, CampaignRepository};
use crate::repository::user_repository::UserRepository;
use crate::utils::date::parse_ddmmyyyy;

#[derive(Clone)]
pub struct CampaignService {
    db: DbPool,
    campaign_repo: Arc<CampaignRepository>,
    activity_log_repo: Arc<ActivityLogRepository>,
    user_repo: Arc<UserRepository>,
}

impl CampaignService {
    pub fn new(
        db: DbPool,
        campaign_repo: Arc<CampaignRepository>,
        activity_log_repo: Arc<ActivityLogRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            db,
            campaign_repo,
            activity_log_repo,
            user_repo,
        }
    }

    /// ローカルキャンペーンの登録（管理者のみ）
    pub async fn create_campaign(
        &self,
        auth: &AuthenticatedUser,
        campaign_in: CampaignCreate,
    ) -> AppResult<ApiEnvelope<()>> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        campaign_in.validate()?;

        let company_id = campaign_in
            .company_id
            .ok_or_else(|| AppError::BadRequest("Company ID is required".to_string()))?;

        if campaign_in.brand_commission_rate <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "brandCommissionRate must be positive".to_string(),
            ));
        }
        if campaign_in.influencer_commission_rate <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "influencerCommissionRate must be positive".to_string(),
            ));
        }
        if let Some(other_costs_rate) = campaign_in.other_costs_rate {
            if other_costs_rate < Decimal::ZERO {
                return Err(AppError::ValidationError(
                    "otherCostsRate must not be negative".to_string(),
                ));
            }
        }

        let now = chrono::Utc::now();
        let new_campaign = campaign_model::ActiveModel {
            name: Set(campaign_in.name.clone()),
            brief: Set(campaign_in.brief.clone()),
            branding_image: Set(campaign_in.branding_image.clone()),
            brand_commission_rate: Set(Some(campaign_in.brand_commission_rate)),
            influencer_commission_rate: Set(Some(campaign_in.influencer_commission_rate)),
            other_costs_rate: Set(campaign_in.other_costs_rate),
            end_date: Set(Some(campaign_in.end_date)),
            company_id: Set(Some(company_id)),
            source: Set("local".to_string()),
            start_date: Set(now),
            created_at: Set(now),
            ..Default::default()
        };

        // キャンペーンとアクティビティログは同一ユニットオブワーク
        let txn = self.db.begin().await?;

        let campaign = self.campaign_repo.create(&txn, new_campaign).await?;
        self.activity_log_repo
            .create(&txn, NewActivity::campaign_started(company_id, &campaign.name))
            .await?;

        txn.commit().await?;

        info!(campaign_id = campaign.id, "Campaign created");

        Ok(ApiEnvelope::ok_with_message(
            (),
            "Campaign created successfully",
        ))
    }

    /// ロール別スコープのキャンペーン一覧（商品込み）
    ///
    /// 会社は自社のみ、管理者は任意の会社で絞り込み可。
    /// 日付フィルタの形式不正はドメインレベルの失敗として返す
    pub async fn list_campaigns(
        &self,
        auth: &AuthenticatedUser,
        query: CampaignQuery,
    ) -> AppResult<ApiEnvelope<Vec<CampaignOut>>> {
        if !matches!(auth.role, UserRole::Admin | UserRole::Company) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let company_id = match auth.role {
            UserRole::Admin => query.company_id,
            UserRole::Company => {
                let user = self
                    .user_repo
                    .find_by_id(auth.user_id)
                    .await?
                    .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
                user.company_id
            }
            UserRole::Influencer => unreachable!(),
        };

        let mut filter = CampaignFilter {
            company_id,
            name: query.name.clone(),
            ..Default::default()
        };

        if let Some(start) = query.start_date.as_deref().filter(|v| !v.is_empty()) {
            match parse_ddmmyyyy(start) {
                Some(from) => filter.end_date_from = Some(from),
                None => return Ok(ApiEnvelope::failure("Invalid StartDate")),
            }
        }
        if let Some(end) = query.end_date.as_deref().filter(|v| !v.is_empty()) {
            match parse_ddmmyyyy(end) {
                Some(until) => filter.end_date_until = Some(until),
                None => return Ok(ApiEnvelope::failure("Invalid EndDate")),
            }
        }

        let campaigns = self.campaign_repo.find_with_products(filter).await?;

        Ok(ApiEnvelope::ok(
            campaigns
                .into_iter()
                .map(|(campaign, products)| CampaignOut::from_model(campaign, products))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::AccessTokenClaims;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn auth(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::new(
            1,
            role,
            AccessTokenClaims {
                sub: "1".to_string(),
                role: role.as_str().to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        )
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> CampaignService {
        CampaignService::new(
            db.clone(),
            Arc::new(CampaignRepository::new(db.clone())),
            Arc::new(ActivityLogRepository::new(db.clone())),
            Arc::new(UserRepository::new(db)),
        )
    }

    fn campaign_create(company_id: Option<i32>, brand_rate: &str) -> CampaignCreate {
        serde_json::from_value(serde_json::json!({
            "name": "Summer Fashion 2024",
            "brandCommissionRate": brand_rate,
            "influencerCommissionRate": "5.00",
            "otherCostsRate": "1.00",
            "endDate": "2025-12-31T00:00:00Z",
            "company_id": company_id
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_campaign_requires_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let result = service
            .create_campaign(&auth(UserRole::Company), campaign_create(Some(5), "10.00"))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_campaign_requires_company_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let result = service
            .create_campaign(&auth(UserRole::Admin), campaign_create(None, "10.00"))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_non_positive_rate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let result = service
            .create_campaign(&auth(UserRole::Admin), campaign_create(Some(5), "0.00"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_list_campaigns_invalid_date_is_domain_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let query = CampaignQuery {
            start_date: Some("31/12/2025".to_string()),
            ..Default::default()
        };
        let envelope = service
            .list_campaigns(&auth(UserRole::Admin), query)
            .await
            .unwrap();

        assert!(!envelope.is_success);
        assert_eq!(envelope.message.as_deref(), Some("Invalid StartDate"));
    }
}
