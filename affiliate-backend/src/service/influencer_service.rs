// affiliate-backend/src/service/influencer_service.rs

use std::sync::Arc;

use sea_orm::{IntoActiveModel, Set, TransactionTrait};
use tracing::info;
use validator::Validate;

use crate::api::dto::influencer_dto::{
    AddInfluencerData, InfluencerCreate, InfluencerDetail, InfluencerOut, InfluencerSummary,
    InfluencerUpdate,
};
use crate::config::SmtpConfig;
use crate::db::DbPool;
use crate::domain::influencer_model;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::influencer_repository::InfluencerRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::email::send_password_reset_email;
use crate::utils::jwt::JwtManager;
use crate::utils::password::{generate_temp_password, hash_password};

#[derive(Clone)]
pub struct InfluencerService {
    db: DbPool,
    influencer_repo: Arc<InfluencerRepository>,
    user_repo: Arc<UserRepository>,
    campaign_repo: Arc<CampaignRepository>,
    jwt_manager: Arc<JwtManager>,
    smtp: SmtpConfig,
    frontend_url: String,
}

impl InfluencerService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DbPool,
        influencer_repo: Arc<InfluencerRepository>,
        user_repo: Arc<UserRepository>,
        campaign_repo: Arc<CampaignRepository>,
        jwt_manager: Arc<JwtManager>,
        smtp: SmtpConfig,
        frontend_url: String,
    ) -> Self {
        Self {
            db,
            influencer_repo,
            user_repo,
            campaign_repo,
            jwt_manager,
            smtp,
            frontend_url,
        }
    }

    /// インフルエンサーの登録
    ///
    /// ログインユーザー（仮パスワード）とプロフィールを同一ユニット
    /// オブワークで作成し、コミット後にパスワード設定メールを送る。
    /// メール失敗で作成を巻き戻さない
    pub async fn add_influencer(
        &self,
        auth: &AuthenticatedUser,
        payload: InfluencerCreate,
    ) -> AppResult<AddInfluencerData> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        payload.validate()?;

        // 一意性チェック
        if self
            .user_repo
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }
        if self
            .influencer_repo
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Influencer username already exists".to_string(),
            ));
        }
        if self
            .influencer_repo
            .find_by_email(&payload.email)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Influencer email already exists".to_string(),
            ));
        }

        let temp_password = generate_temp_password();
        let password_hash = hash_password(&temp_password)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let txn = self.db.begin().await?;

        let user = self
            .user_repo
            .create(&txn, &payload.username, &password_hash, UserRole::Influencer, None)
            .await?;

        let now = chrono::Utc::now();
        let influencer = self
            .influencer_repo
            .create(
                &txn,
                influencer_model::ActiveModel {
                    user_id: Set(Some(user.id)),
                    display_name: Set(payload.display_name.clone()),
                    username: Set(payload.username.clone()),
                    email: Set(Some(payload.email.clone())),
                    phone: Set(payload.phone.clone()),
                    profile_image: Set(payload.profile_image.clone()),
                    follower_count: Set(0),
                    active: Set(payload.active),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                },
            )
            .await?;

        txn.commit().await?;

        let reset_url = self.build_reset_url(user.id)?;

        // コミット後に送信。失敗してもユーザー作成は取り消さない
        send_password_reset_email(&self.smtp, &payload.email, &reset_url).await;

        info!(influencer_id = influencer.id, user_id = user.id, "Influencer created");

        Ok(AddInfluencerData {
            influencer_id: influencer.id,
            user_id: user.id,
            reset_url,
        })
    }

    /// 一覧（管理者向け、ユーザー名の部分一致フィルタ付き）
    pub async fn list_influencers(
        &self,
        auth: &AuthenticatedUser,
        name: Option<String>,
    ) -> AppResult<Vec<InfluencerSummary>> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden(
                "You do not have permission to view influencers".to_string(),
            ));
        }

        let influencers = self
            .influencer_repo
            .find_with_name_filter(name.as_deref())
            .await?;

        Ok(influencers.into_iter().map(InfluencerSummary::from).collect())
    }

    pub async fn get_influencer(
        &self,
        auth: &AuthenticatedUser,
        id: i32,
    ) -> AppResult<InfluencerDetail> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let influencer = self
            .influencer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Influencer not found".to_string()))?;

        Ok(InfluencerDetail::from(influencer))
    }

    /// プロフィール更新
    ///
    /// 更新対象は明示的に列挙されたフィールドのみ。resetPassword
    /// 指定時はパスワード再設定URLを発行して応答に含める
    pub async fn update_influencer(
        &self,
        auth: &AuthenticatedUser,
        id: i32,
        update: InfluencerUpdate,
    ) -> AppResult<InfluencerDetail> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let influencer = self
            .influencer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Influencer not found".to_string()))?;
        let user_id = influencer.user_id;

        let mut active = influencer.into_active_model();

        if let Some(display_name) = update.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(email) = update.email {
            active.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(profile_image) = update.profile_image {
            active.profile_image = Set(Some(profile_image));
        }
        if let Some(is_active) = update.active {
            active.active = Set(is_active);
        }
        if let Some(instagram_url) = update.instagram_url {
            active.instagram_url = Set(Some(instagram_url));
        }
        if let Some(tiktok_url) = update.tiktok_url {
            active.tiktok_url = Set(Some(tiktok_url));
        }
        if let Some(youtube_url) = update.youtube_url {
            active.youtube_url = Set(Some(youtube_url));
        }
        active.updated_at = Set(chrono::Utc::now());

        let reset_url = match (update.reset_password, user_id) {
            (true, Some(user_id)) => Some(self.build_reset_url(user_id)?),
            _ => None,
        };

        let updated = self.influencer_repo.update(active).await?;

        let mut detail = InfluencerDetail::from(updated);
        detail.reset_url = reset_url;
        Ok(detail)
    }

    /// キャンペーン参加インフルエンサー、または全件の一覧
    pub async fn list_for_campaign(
        &self,
        auth: &AuthenticatedUser,
        campaign_id: Option<i32>,
    ) -> AppResult<Vec<InfluencerOut>> {
        if !matches!(auth.role, UserRole::Admin | UserRole::Company) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let influencers = match campaign_id {
            Some(campaign_id) => {
                let campaign = self
                    .campaign_repo
                    .find_by_id(campaign_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
                self.influencer_repo.find_by_campaign(&campaign).await?
            }
            None => self.influencer_repo.find_all().await?,
        };

        Ok(influencers.into_iter().map(InfluencerOut::from).collect())
    }

    fn build_reset_url(&self, user_id: i32) -> AppResult<String> {
        let token = self
            .jwt_manager
            .create_access_token(user_id, UserRole::Influencer, Some("password_reset"))
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        Ok(format!(
            "{}/reset-password?token={}",
            self.frontend_url, token
        ))
    }
}
