// affiliate-backend/src/service/dashboard_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::api::dto::dashboard_dto::{ActivityOut, DashboardQuery, DashboardSummaryResponse};
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::report_repository::ReportRepository;
use crate::repository::user_repository::UserRepository;

/// アクティビティフィードの表示件数
const ACTIVITY_FEED_LIMIT: u64 = 10;

#[derive(Clone)]
pub struct DashboardService {
    report_repo: Arc<ReportRepository>,
    campaign_repo: Arc<CampaignRepository>,
    activity_log_repo: Arc<ActivityLogRepository>,
    user_repo: Arc<UserRepository>,
}

impl DashboardService {
    pub fn new(
        report_repo: Arc<ReportRepository>,
        campaign_repo: Arc<CampaignRepository>,
        activity_log_repo: Arc<ActivityLogRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            report_repo,
            campaign_repo,
            activity_log_repo,
            user_repo,
        }
    }

    /// 会社スコープを解決する。会社は自社固定、管理者は任意
    async fn resolve_scope(
        &self,
        auth: &AuthenticatedUser,
        requested: Option<i32>,
    ) -> AppResult<Option<i32>> {
        match auth.role {
            UserRole::Admin => Ok(requested),
            UserRole::Company => {
                let user = self
                    .user_repo
                    .find_by_id(auth.user_id)
                    .await?
                    .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;
                Ok(user.company_id)
            }
            UserRole::Influencer => Err(AppError::Forbidden("Access denied".to_string())),
        }
    }

    /// レポート合計とアクティブキャンペーン数のサマリ
    pub async fn summary(
        &self,
        auth: &AuthenticatedUser,
        query: DashboardQuery,
    ) -> AppResult<DashboardSummaryResponse> {
        let company_id = self.resolve_scope(auth, query.company_id).await?;

        let totals = self.report_repo.totals(company_id).await?;
        let active_campaigns = self.campaign_repo.count_active(company_id).await?;

        Ok(DashboardSummaryResponse {
            active_campaigns,
            total_clicks: totals.total_clicks.unwrap_or(0),
            total_sales: totals.total_sales.unwrap_or(0),
            total_commission: totals.total_commission.unwrap_or(Decimal::ZERO),
        })
    }

    /// 直近のアクティビティフィード
    pub async fn activity(
        &self,
        auth: &AuthenticatedUser,
        query: DashboardQuery,
    ) -> AppResult<Vec<ActivityOut>> {
        let company_id = self.resolve_scope(auth, query.company_id).await?;

        let logs = self
            .activity_log_repo
            .find_recent(company_id, ACTIVITY_FEED_LIMIT)
            .await?;

        Ok(logs.into_iter().map(ActivityOut::from).collect())
    }
}
