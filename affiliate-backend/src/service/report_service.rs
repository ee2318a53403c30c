// affiliate-backend/src/service/report_service.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{Set, TransactionTrait};
use tracing::info;

use crate::api::dto::report_dto::{ReportCreate, ReportListResponse, ReportOut, ReportQuery};
use crate::db::DbPool;
use crate::domain::activity_log_model::NewActivity;
use crate::domain::report_model;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::influencer_repository::InfluencerRepository;
use crate::repository::report_repository::{ReportFilter, ReportRepository};
use crate::repository::user_repository::UserRepository;
use crate::utils::date::{parse_ddmmyyyy, parse_ddmmyyyy_exclusive_end};

#[derive(Clone)]
pub struct ReportService {
    db: DbPool,
    report_repo: Arc<ReportRepository>,
    campaign_repo: Arc<CampaignRepository>,
    influencer_repo: Arc<InfluencerRepository>,
    activity_log_repo: Arc<ActivityLogRepository>,
    user_repo: Arc<UserRepository>,
}

impl ReportService {
    pub fn new(
        db: DbPool,
        report_repo: Arc<ReportRepository>,
        campaign_repo: Arc<CampaignRepository>,
        influencer_repo: Arc<InfluencerRepository>,
        activity_log_repo: Arc<ActivityLogRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            db,
            report_repo,
            campaign_repo,
            influencer_repo,
            activity_log_repo,
            user_repo,
        }
    }

    /// レポート作成
    ///
    /// 金額は呼び出し側の計算結果をそのまま保存する。
    /// company_id は参照キャンペーンの所属企業を非正規化して刻む
    pub async fn create_report(
        &self,
        auth: &AuthenticatedUser,
        mut report_in: ReportCreate,
    ) -> AppResult<ReportOut> {
        if !matches!(auth.role, UserRole::Admin | UserRole::Influencer) {
            return Err(AppError::Forbidden("Unauthorized role".to_string()));
        }

        // インフルエンサー本人の投稿は、ボディのIDを無視して
        // 自身のプロフィールのIDで上書きする
        let mut influencer_name = None;
        if auth.role == UserRole::Influencer {
            let influencer = self
                .influencer_repo
                .find_by_user_id(auth.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Influencer profile not found".to_string()))?;
            report_in.influencer_id = Some(influencer.id);
            influencer_name = Some(influencer.display_name);
        }

        let influencer_id = report_in
            .influencer_id
            .ok_or_else(|| AppError::BadRequest("influencer id is required".to_string()))?;

        if influencer_name.is_none() {
            influencer_name = self
                .influencer_repo
                .find_by_id(influencer_id)
                .await?
                .map(|influencer| influencer.display_name);
        }

        let campaign = self
            .campaign_repo
            .find_by_id(report_in.campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;

        let new_report = report_model::ActiveModel {
            influencer_id: Set(Some(influencer_id)),
            campaign_id: Set(Some(campaign.id)),
            company_id: Set(campaign.company_id),
            total_clicks: Set(report_in.total_clicks),
            total_sales: Set(report_in.total_sales),
            brand_commission_rate: Set(Some(report_in.brand_commission_rate)),
            brand_commission_amount: Set(Some(report_in.brand_commission_amount)),
            influencer_commission_rate: Set(Some(report_in.influencer_commission_rate)),
            influencer_commission_amount: Set(Some(report_in.influencer_commission_amount)),
            other_costs_rate: Set(Some(report_in.other_costs_rate)),
            mimeda_commission_rate: Set(Some(report_in.mimeda_commission_rate)),
            mimeda_commission_amount: Set(Some(report_in.mimeda_commission_amount)),
            agency_commission_rate: Set(Some(report_in.agency_commission_rate)),
            agency_commission_amount: Set(Some(report_in.agency_commission_amount)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        // レポートとアクティビティログは同一ユニットオブワーク
        let txn = self.db.begin().await?;

        let report = self.report_repo.create(&txn, new_report).await?;

        if let Some(company_id) = campaign.company_id {
            self.activity_log_repo
                .create(&txn, NewActivity::report_created(company_id, &campaign.name))
                .await?;
        }

        txn.commit().await?;

        info!(report_id = report.id, campaign_id = campaign.id, "Report created");

        Ok(ReportOut::from_model(
            report,
            influencer_name,
            Some(campaign.name),
        ))
    }

    /// ロール別スコープのレポート一覧と集計
    pub async fn get_reports(
        &self,
        auth: &AuthenticatedUser,
        query: ReportQuery,
    ) -> AppResult<ReportListResponse> {
        // インフルエンサーは自身のレポートのみ
        if auth.role == UserRole::Influencer {
            let influencer = self
                .influencer_repo
                .find_by_user_id(auth.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Influencer profile not found".to_string()))?;

            let reports = self.report_repo.find_by_influencer(influencer.id).await?;
            let active_influencers = if reports.is_empty() { 0 } else { 1 };
            let total = sum_influencer_commission(&reports);

            let campaign_names = self.campaign_names_for(&reports).await?;
            let data = reports
                .into_iter()
                .map(|report| {
                    let campaign_name = report
                        .campaign_id
                        .and_then(|id| campaign_names.get(&id).cloned());
                    ReportOut::from_model(
                        report,
                        Some(influencer.display_name.clone()),
                        campaign_name,
                    )
                })
                .collect();

            return Ok(ReportListResponse::ok(data, active_influencers, total));
        }

        // 会社は自社スコープ固定、管理者は任意の会社で絞り込み可
        let company_scope = match auth.role {
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

        let mut filter = ReportFilter {
            company_id: company_scope,
            ..Default::default()
        };

        // 数値ならローカルID、そうでなければ外部ID（mlink_id）として扱う
        if let Some(value) = query.influencer_id.as_deref().filter(|v| !v.is_empty()) {
            match value.parse::<i32>() {
                Ok(id) => filter.influencer_id = Some(id),
                Err(_) => filter.influencer_mlink_id = Some(value.to_string()),
            }
        }

        if let Some(start) = query.start_date.as_deref().filter(|v| !v.is_empty()) {
            match parse_ddmmyyyy(start) {
                Some(from) => filter.created_from = Some(from),
                None => return Ok(ReportListResponse::failure("Invalid StartDate")),
            }
        }

        if let Some(end) = query.end_date.as_deref().filter(|v| !v.is_empty()) {
            match parse_ddmmyyyy_exclusive_end(end) {
                Some(until) => filter.created_until = Some(until),
                None => return Ok(ReportListResponse::failure("Invalid EndDate")),
            }
        }

        let reports = self.report_repo.find_with_filters(filter).await?;

        // 集計はフィルタ後の行に対してのみ行う
        let active_influencers = reports
            .iter()
            .map(|report| report.influencer_id)
            .collect::<HashSet<_>>()
            .len() as i64;
        let total = sum_influencer_commission(&reports);

        let influencer_names = self.influencer_names_for(&reports).await?;
        let campaign_names = self.campaign_names_for(&reports).await?;

        let data = reports
            .into_iter()
            .map(|report| {
                let influencer_name = report
                    .influencer_id
                    .and_then(|id| influencer_names.get(&id).cloned());
                let campaign_name = report
                    .campaign_id
                    .and_then(|id| campaign_names.get(&id).cloned());
                ReportOut::from_model(report, influencer_name, campaign_name)
            })
            .collect();

        Ok(ReportListResponse::ok(data, active_influencers, total))
    }

    async fn influencer_names_for(
        &self,
        reports: &[report_model::Model],
    ) -> AppResult<HashMap<i32, String>> {
        let ids: Vec<i32> = reports
            .iter()
            .filter_map(|report| report.influencer_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        Ok(self
            .influencer_repo
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|influencer| (influencer.id, influencer.display_name))
            .collect())
    }

    async fn campaign_names_for(
        &self,
        reports: &[report_model::Model],
    ) -> AppResult<HashMap<i32, String>> {
        let ids: Vec<i32> = reports
            .iter()
            .filter_map(|report| report.campaign_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        Ok(self
            .campaign_repo
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|campaign| (campaign.id, campaign.name))
            .collect())
    }
}

fn sum_influencer_commission(reports: &[report_model::Model]) -> Decimal {
    reports
        .iter()
        .map(|report| report.influencer_commission_amount.unwrap_or(Decimal::ZERO))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{campaign_model, influencer_model};
    use crate::utils::jwt::AccessTokenClaims;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

    fn service(db: DatabaseConnection) -> ReportService {
        ReportService::new(
            db.clone(),
            Arc::new(ReportRepository::new(db.clone())),
            Arc::new(CampaignRepository::new(db.clone())),
            Arc::new(InfluencerRepository::new(db.clone())),
            Arc::new(ActivityLogRepository::new(db.clone())),
            Arc::new(UserRepository::new(db)),
        )
    }

    fn auth(user_id: i32, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::new(
            user_id,
            role,
            AccessTokenClaims {
                sub: user_id.to_string(),
                role: role.as_str().to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        )
    }

    fn influencer(id: i32, user_id: i32) -> influencer_model::Model {
        influencer_model::Model {
            id,
            mlink_id: None,
            user_id: Some(user_id),
            display_name: "Jane Doe".to_string(),
            username: "jane_doe".to_string(),
            email: None,
            phone: None,
            profile_image: None,
            follower_count: 0,
            engagement_rate: None,
            instagram_url: None,
            tiktok_url: None,
            youtube_url: None,
            social_links_json: None,
            source_payload_json: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn campaign(id: i32, company_id: Option<i32>) -> campaign_model::Model {
        campaign_model::Model {
            id,
            company_id,
            name: "Summer".to_string(),
            brief: None,
            brand_commission_rate: None,
            influencer_commission_rate: None,
            other_costs_rate: None,
            start_date: Utc::now(),
            end_date: None,
            branding_image: None,
            mlink_id: None,
            source: "mlink".to_string(),
            source_payload_json: None,
            last_synced_at: None,
            created_at: Utc::now(),
        }
    }

    fn report(id: i32, influencer_id: Option<i32>, amount: &str) -> report_model::Model {
        report_model::Model {
            id,
            influencer_id,
            campaign_id: Some(3),
            company_id: Some(5),
            total_clicks: 10,
            total_sales: 2,
            brand_commission_rate: None,
            brand_commission_amount: None,
            influencer_commission_rate: None,
            influencer_commission_amount: Some(amount.parse().unwrap()),
            other_costs_rate: None,
            mimeda_commission_rate: None,
            mimeda_commission_amount: None,
            agency_commission_rate: None,
            agency_commission_amount: None,
            mlink_id: None,
            source: "mlink".to_string(),
            source_payload_json: None,
            last_synced_at: None,
            created_at: Utc::now(),
        }
    }

    fn report_create(influencer_id: Option<i32>) -> ReportCreate {
        serde_json::from_value(serde_json::json!({
            "influencer_id": influencer_id,
            "campaignId": 3,
            "totalClicks": 120,
            "totalSales": 4,
            "brandCommissionRate": "10.00",
            "brandCommissionAmount": "100.00",
            "influencerCommissionRate": "5.00",
            "influencerCommissionAmount": "50.00",
            "otherCostsRate": "1.00",
            "mimedaCommissionRate": "2.00",
            "mimedaCommissionAmount": "20.00",
            "agencyCommissionRate": "3.00",
            "agencyCommissionAmount": "30.00"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_report_forces_influencer_identity() {
        let mut created = report(1, Some(7), "50.00");
        created.total_clicks = 120;
        created.total_sales = 4;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // 呼び出し側インフルエンサーのプロフィール解決
            .append_query_results([vec![influencer(7, 42)]])
            // キャンペーン検証
            .append_query_results([vec![campaign(3, Some(5))]])
            // レポートINSERT
            .append_query_results([vec![created]])
            // アクティビティログINSERT
            .append_query_results([vec![crate::domain::activity_log_model::Model {
                id: 1,
                company_id: 5,
                activity_type: "Report created.".to_string(),
                label: "Summer".to_string(),
                timestamp: Utc::now(),
            }]])
            .into_connection();

        let service = service(db);
        // ボディには別人のインフルエンサーIDが入っている
        let result = service
            .create_report(&auth(42, UserRole::Influencer), report_create(Some(999)))
            .await
            .unwrap();

        // 投稿者本人のIDで作成される
        assert_eq!(result.influencer_id, Some(7));
        assert_eq!(result.campaign_name.as_deref(), Some("Summer"));
        assert_eq!(result.influencer_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_create_report_rejects_company_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let result = service
            .create_report(&auth(2, UserRole::Company), report_create(Some(7)))
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_report_requires_influencer_id_for_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let result = service
            .create_report(&auth(1, UserRole::Admin), report_create(None))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_get_reports_influencer_scope_and_summary() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![influencer(7, 42)]])
            .append_query_results([vec![report(1, Some(7), "50.00"), report(2, Some(7), "25.50")]])
            // キャンペーン名のバッチ取得
            .append_query_results([vec![campaign(3, Some(5))]])
            .into_connection();

        let service = service(db);
        let response = service
            .get_reports(&auth(42, UserRole::Influencer), ReportQuery::default())
            .await
            .unwrap();

        assert!(response.is_success);
        assert_eq!(response.active_influencers, Some(1));
        assert_eq!(
            response.total_influencer_commission,
            Some("75.50".parse().unwrap())
        );
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].influencer_name.as_deref(), Some("Jane Doe"));
        assert_eq!(response.data[0].campaign_name.as_deref(), Some("Summer"));
    }

    #[tokio::test]
    async fn test_get_reports_invalid_start_date_is_domain_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let query = ReportQuery {
            start_date: Some("2025-12-31".to_string()),
            ..Default::default()
        };
        let response = service
            .get_reports(&auth(1, UserRole::Admin), query)
            .await
            .unwrap();

        assert!(!response.is_success);
        assert_eq!(response.kind, 1);
        assert_eq!(response.message.as_deref(), Some("Invalid StartDate"));
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_get_reports_admin_summary_counts_distinct_influencers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                report(1, Some(7), "50.00"),
                report(2, Some(7), "10.00"),
                report(3, Some(8), "5.00"),
            ]])
            // インフルエンサー名のバッチ取得
            .append_query_results([vec![influencer(7, 42), influencer(8, 43)]])
            // キャンペーン名のバッチ取得
            .append_query_results([vec![campaign(3, Some(5))]])
            .into_connection();

        let service = service(db);
        let response = service
            .get_reports(&auth(1, UserRole::Admin), ReportQuery::default())
            .await
            .unwrap();

        assert_eq!(response.active_influencers, Some(2));
        assert_eq!(
            response.total_influencer_commission,
            Some("65.00".parse().unwrap())
        );
    }
}
