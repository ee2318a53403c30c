// affiliate-backend/src/service/link_service.rs

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{Set, TransactionTrait};
use tracing::info;

use crate::api::dto::common::ApiEnvelope;
use crate::api::dto::link_dto::{GenerateLinkRequest, GeneratedLinkData, TrackData};
use crate::db::DbPool;
use crate::domain::activity_log_model::NewActivity;
use crate::domain::tracking_link_model::{self, SOURCE_LOCAL, STATUS_ACTIVE};
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::influencer_repository::InfluencerRepository;
use crate::repository::link_clicks_daily_repository::LinkClicksDailyRepository;
use crate::repository::tracking_link_repository::TrackingLinkRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::error_helper::internal_server_error;
use crate::utils::jwt::JwtManager;

/// リンク発行直後のランディング先。MLink連携後に差し替わる
const DEFAULT_LANDING_URL: &str = "https://ibb.co/tTRQrDfj";

#[derive(Clone)]
pub struct LinkService {
    db: DbPool,
    campaign_repo: Arc<CampaignRepository>,
    link_repo: Arc<TrackingLinkRepository>,
    daily_repo: Arc<LinkClicksDailyRepository>,
    activity_log_repo: Arc<ActivityLogRepository>,
    user_repo: Arc<UserRepository>,
    influencer_repo: Arc<InfluencerRepository>,
    jwt_manager: Arc<JwtManager>,
    frontend_url: String,
}

impl LinkService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DbPool,
        campaign_repo: Arc<CampaignRepository>,
        link_repo: Arc<TrackingLinkRepository>,
        daily_repo: Arc<LinkClicksDailyRepository>,
        activity_log_repo: Arc<ActivityLogRepository>,
        user_repo: Arc<UserRepository>,
        influencer_repo: Arc<InfluencerRepository>,
        jwt_manager: Arc<JwtManager>,
        frontend_url: String,
    ) -> Self {
        Self {
            db,
            campaign_repo,
            link_repo,
            daily_repo,
            activity_log_repo,
            user_repo,
            influencer_repo,
            jwt_manager,
            frontend_url,
        }
    }

    /// トラッキングリンクの発行（冪等）
    ///
    /// (influencer, campaign, company) につき1本。既存リンクが
    /// あればトークンもURLも再生成せずそのまま返す
    pub async fn generate_link(
        &self,
        auth: &AuthenticatedUser,
        request: GenerateLinkRequest,
    ) -> AppResult<ApiEnvelope<GeneratedLinkData>> {
        // インフルエンサー本人の場合はIDと名前をリクエストから
        // 受け取らず、自身のプロフィールから強制する
        let (influencer_id, influencer_name) = match auth.role {
            UserRole::Influencer => {
                let influencer = self
                    .influencer_repo
                    .find_by_user_id(auth.user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound("Influencer profile not found".to_string())
                    })?;
                (influencer.id, influencer.username)
            }
            UserRole::Company | UserRole::Admin => {
                let influencer_id: i32 = request.influencer_id.parse().map_err(|_| {
                    AppError::ValidationError("Invalid influencer id".to_string())
                })?;
                (influencer_id, request.influencer_name.clone())
            }
        };

        let campaign = match self.campaign_repo.find_by_id(request.campaign_id).await? {
            Some(campaign) => campaign,
            // キャンペーン不在はドメインレベルの失敗としてHTTP 200で返す
            None => return Ok(ApiEnvelope::failure("Campaign not found")),
        };

        if auth.role == UserRole::Company {
            let user = self
                .user_repo
                .find_by_id(auth.user_id)
                .await?
                .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

            if campaign.company_id != user.company_id {
                return Err(AppError::Forbidden(
                    "You are not authorized to modify this campaign".to_string(),
                ));
            }
        }

        // 既存リンクのチェック。ここでの検索は最適化であり、
        // 最終的な一意性はストアの複合一意制約が守る
        if let Some(existing) = self
            .link_repo
            .find_existing(influencer_id, campaign.id, campaign.company_id)
            .await?
        {
            return Ok(ApiEnvelope::ok_with_message(
                GeneratedLinkData {
                    campaign_id: campaign.id,
                    name: campaign.name,
                    end_date: campaign.end_date,
                    url: existing.generated_url,
                },
                "Tracking link already exists.",
            ));
        }

        let token = self
            .jwt_manager
            .create_link_token(influencer_id, &influencer_name, campaign.id)
            .map_err(|e| {
                internal_server_error(e, "link_service::generate_link", "Failed to sign link token")
            })?;
        let generated_url = format!("{}/track?token={}", self.frontend_url, token);

        let new_link = tracking_link_model::ActiveModel {
            influencer_id: Set(Some(influencer_id)),
            campaign_id: Set(Some(campaign.id)),
            company_id: Set(campaign.company_id),
            influencer_name: Set(Some(influencer_name.clone())),
            token: Set(token),
            generated_url: Set(generated_url),
            landing_url: Set(Some(DEFAULT_LANDING_URL.to_string())),
            status: Set(STATUS_ACTIVE.to_string()),
            source: Set(SOURCE_LOCAL.to_string()),
            mlink_id: Set(None),
            mlink_url: Set(None),
            click_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        // リンクとアクティビティログは同一ユニットオブワークで書く。
        // どちらかが失敗したら両方巻き戻す
        let txn = self.db.begin().await?;

        let link = match self.link_repo.insert_if_absent(&txn, new_link).await? {
            Some(link) => {
                if let Some(company_id) = campaign.company_id {
                    self.activity_log_repo
                        .create(&txn, NewActivity::link_generated(company_id, &influencer_name))
                        .await?;
                }
                link
            }
            // 同時発行レースに負けた場合は勝者の行をそのまま使う。
            // ログは勝者側が書いているので追加しない
            None => self
                .link_repo
                .find_by_triple(&txn, influencer_id, campaign.id, campaign.company_id)
                .await?
                .ok_or_else(|| {
                    AppError::InternalServerError("Tracking link insert conflict".to_string())
                })?,
        };

        txn.commit().await?;

        info!(
            influencer_id = influencer_id,
            campaign_id = campaign.id,
            "Tracking link issued"
        );

        Ok(ApiEnvelope::ok(GeneratedLinkData {
            campaign_id: campaign.id,
            name: campaign.name,
            end_date: campaign.end_date,
            url: link.generated_url,
        }))
    }

    /// クリックの記録とリダイレクト先の解決
    ///
    /// 集約カウンタのインクリメントと当日ロールアップ行の upsert を
    /// 同一ユニットオブワークで行う。片方だけのクリック記録は残らない
    pub async fn track_click(&self, token: &str) -> AppResult<ApiEnvelope<TrackData>> {
        let txn = self.db.begin().await?;

        let link = self
            .link_repo
            .find_by_token(&txn, token)
            .await?
            .filter(|link| link.is_active())
            .ok_or_else(|| AppError::NotFound("Link not found".to_string()))?;

        self.link_repo.increment_click_count(&txn, link.id).await?;
        self.daily_repo
            .record_click(&txn, link.id, Utc::now().date_naive())
            .await?;

        txn.commit().await?;

        Ok(ApiEnvelope::ok(TrackData {
            campaign_id: link.campaign_id,
            influencer_id: link.influencer_id,
            url: link.landing_url,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{campaign_model, user_model};
    use crate::utils::jwt::AccessTokenClaims;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn service(db: DatabaseConnection) -> LinkService {
        let jwt_manager = Arc::new(JwtManager::new("link-service-test-secret"));
        LinkService::new(
            db.clone(),
            Arc::new(CampaignRepository::new(db.clone())),
            Arc::new(TrackingLinkRepository::new(db.clone())),
            Arc::new(LinkClicksDailyRepository::new(db.clone())),
            Arc::new(ActivityLogRepository::new(db.clone())),
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(InfluencerRepository::new(db)),
            jwt_manager,
            "http://localhost:5173".to_string(),
        )
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(
            1,
            UserRole::Admin,
            AccessTokenClaims {
                sub: "1".to_string(),
                role: "admin".to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        )
    }

    fn campaign(id: i32, company_id: Option<i32>) -> campaign_model::Model {
        campaign_model::Model {
            id,
            company_id,
            name: "Summer Fashion 2024".to_string(),
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

    fn link(id: i32, token: &str, status: &str) -> tracking_link_model::Model {
        tracking_link_model::Model {
            id,
            influencer_id: Some(7),
            campaign_id: Some(3),
            company_id: Some(5),
            influencer_name: Some("jane_doe".to_string()),
            token: token.to_string(),
            generated_url: format!("http://localhost:5173/track?token={}", token),
            landing_url: Some(DEFAULT_LANDING_URL.to_string()),
            status: status.to_string(),
            source: SOURCE_LOCAL.to_string(),
            mlink_id: None,
            mlink_url: None,
            click_count: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_generate_link_returns_existing_link_unchanged() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // キャンペーン取得
            .append_query_results([vec![campaign(3, Some(5))]])
            // 既存リンク取得
            .append_query_results([vec![link(10, "existing-token", STATUS_ACTIVE)]])
            .into_connection();

        let service = service(db);
        let request = GenerateLinkRequest {
            influencer_id: "7".to_string(),
            influencer_name: "jane_doe".to_string(),
            campaign_id: 3,
        };

        let envelope = service.generate_link(&admin(), request).await.unwrap();

        assert!(envelope.is_success);
        assert_eq!(envelope.kind, 0);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Tracking link already exists.")
        );
        let data = envelope.data.unwrap();
        assert_eq!(data.campaign_id, 3);
        assert!(data.url.contains("existing-token"));
    }

    #[tokio::test]
    async fn test_generate_link_missing_campaign_is_domain_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<campaign_model::Model>::new()])
            .into_connection();

        let service = service(db);
        let request = GenerateLinkRequest {
            influencer_id: "7".to_string(),
            influencer_name: "jane_doe".to_string(),
            campaign_id: 99,
        };

        let envelope = service.generate_link(&admin(), request).await.unwrap();

        assert!(!envelope.is_success);
        assert_eq!(envelope.kind, 1);
        assert_eq!(envelope.message.as_deref(), Some("Campaign not found"));
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn test_generate_link_rejects_foreign_company() {
        let company_user = user_model::Model {
            id: 2,
            company_id: Some(99),
            username: "acme".to_string(),
            password_hash: "x".to_string(),
            role: "company".to_string(),
            created_at: Utc::now(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![campaign(3, Some(5))]])
            .append_query_results([vec![company_user]])
            .into_connection();

        let service = service(db);
        let auth = AuthenticatedUser::new(
            2,
            UserRole::Company,
            AccessTokenClaims {
                sub: "2".to_string(),
                role: "company".to_string(),
                purpose: None,
                iat: 0,
                exp: i64::MAX,
                jti: "test".to_string(),
            },
        );
        let request = GenerateLinkRequest {
            influencer_id: "7".to_string(),
            influencer_name: "jane_doe".to_string(),
            campaign_id: 3,
        };

        let result = service.generate_link(&auth, request).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_track_click_increments_both_counters() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![link(10, "valid-token", STATUS_ACTIVE)]])
            .append_exec_results([
                // 集約カウンタのインクリメント
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                // 日次ロールアップの insert-or-increment
                MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let service = service(db);
        let envelope = service.track_click("valid-token").await.unwrap();

        assert!(envelope.is_success);
        let data = envelope.data.unwrap();
        assert_eq!(data.campaign_id, Some(3));
        assert_eq!(data.influencer_id, Some(7));
        assert_eq!(data.url.as_deref(), Some(DEFAULT_LANDING_URL));
    }

    #[tokio::test]
    async fn test_track_click_unknown_token_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tracking_link_model::Model>::new()])
            .into_connection();

        let service = service(db);
        let result = service.track_click("missing-token").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_track_click_inactive_link_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![link(10, "paused-token", "paused")]])
            .into_connection();

        let service = service(db);
        let result = service.track_click("paused-token").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
