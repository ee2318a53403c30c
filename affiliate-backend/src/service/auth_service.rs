// affiliate-backend/src/service/auth_service.rs

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::dto::auth_dto::{
    DetailResponse, ForgotPasswordRequest, MeInfo, MeResponse, ResetPasswordRequest, TokenData,
    TokenRequest, UserOut,
};
use crate::api::dto::common::ApiEnvelope;
use crate::api::dto::company_dto::CompanyOut;
use crate::api::dto::influencer_dto::InfluencerOut;
use crate::config::SmtpConfig;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::company_repository::CompanyRepository;
use crate::repository::influencer_repository::InfluencerRepository;
use crate::repository::user_repository::UserRepository;
use crate::utils::email::send_password_reset_email;
use crate::utils::error_helper::internal_server_error;
use crate::utils::jwt::JwtManager;
use crate::utils::password::{hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    company_repo: Arc<CompanyRepository>,
    influencer_repo: Arc<InfluencerRepository>,
    jwt_manager: Arc<JwtManager>,
    smtp: SmtpConfig,
    frontend_url: String,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        company_repo: Arc<CompanyRepository>,
        influencer_repo: Arc<InfluencerRepository>,
        jwt_manager: Arc<JwtManager>,
        smtp: SmtpConfig,
        frontend_url: String,
    ) -> Self {
        Self {
            user_repo,
            company_repo,
            influencer_repo,
            jwt_manager,
            smtp,
            frontend_url,
        }
    }

    /// ユーザー名とパスワードでログインしてアクセストークンを発行
    pub async fn login(&self, request: TokenRequest) -> AppResult<ApiEnvelope<TokenData>> {
        let user = self
            .user_repo
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Invalid username or password".to_string())
            })?;

        if !verify_password(&request.password, &user.password_hash).map_err(|e| {
            internal_server_error(e, "auth_service::login", "Failed to verify password")
        })? {
            warn!(username = %request.username, "Failed login attempt");
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let role = user
            .role()
            .ok_or_else(|| AppError::InternalServerError("Unknown user role".to_string()))?;

        let access_token = self
            .jwt_manager
            .create_access_token(user.id, role, None)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        info!(user_id = user.id, "User logged in");

        Ok(ApiEnvelope::ok(TokenData {
            access_token,
            expiration: None,
        }))
    }

    /// 自分自身のユーザー情報とロール別の付随情報を取得
    pub async fn me(&self, auth: &AuthenticatedUser) -> AppResult<MeResponse> {
        let user = self
            .user_repo
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let info = match auth.role {
            UserRole::Admin => Some(MeInfo::Role("admin".to_string())),
            UserRole::Company => match user.company_id {
                Some(company_id) => self
                    .company_repo
                    .find_by_id(company_id)
                    .await?
                    .map(|company| MeInfo::Company(Box::new(CompanyOut::from(company)))),
                None => None,
            },
            UserRole::Influencer => self
                .influencer_repo
                .find_by_user_id(user.id)
                .await?
                .map(|influencer| MeInfo::Influencer(Box::new(InfluencerOut::from(influencer)))),
        };

        Ok(MeResponse {
            user: UserOut::from(user),
            info,
        })
    }

    /// パスワード再設定リンクの送信
    ///
    /// ユーザー列挙を防ぐため、該当ユーザーの有無にかかわらず
    /// 同じ応答を返す
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> AppResult<DetailResponse> {
        let email = request.email.trim().to_lowercase();

        // 会社のメール、インフルエンサーのメール、ユーザー名の順で
        // アカウントを解決する
        let company = self.company_repo.find_by_email_ilike(&email).await?;
        let influencer = self.influencer_repo.find_by_email_ilike(&email).await?;

        let mut user = None;
        if let Some(company) = company {
            user = self.user_repo.find_first_by_company_id(company.id).await?;
        }
        if user.is_none() {
            if let Some(user_id) = influencer.and_then(|i| i.user_id) {
                user = self.user_repo.find_by_id(user_id).await?;
            }
        }
        if user.is_none() {
            user = self.user_repo.find_by_username_ilike(&email).await?;
        }

        let Some(user) = user else {
            return Ok(DetailResponse::new(
                "If an account exists for this email, a reset link has been sent.",
            ));
        };

        let role = user.role().unwrap_or(UserRole::Company);
        let token = self
            .jwt_manager
            .create_access_token(user.id, role, Some("password_reset"))
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        let reset_url = format!("{}/reset-password?token={}", self.frontend_url, token);

        // 配送失敗は握りつぶす（ログのみ）
        send_password_reset_email(&self.smtp, &email, &reset_url).await;

        Ok(DetailResponse::new("Reset link sent if the email exists."))
    }

    /// トークンを検証してパスワードを再設定
    pub async fn reset_password(&self, request: ResetPasswordRequest) -> AppResult<DetailResponse> {
        if request.new_password != request.confirm_password {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }

        let claims = self
            .jwt_manager
            .verify_access_token(&request.token)
            .map_err(|_| AppError::BadRequest("Invalid or expired token".to_string()))?;

        // purposeのないレガシートークンも受け付ける

        let user_id: i32 = claims
            .sub
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid token payload".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let password_hash = hash_password(&request.new_password).map_err(|e| {
            internal_server_error(e, "auth_service::reset_password", "Failed to hash password")
        })?;
        self.user_repo.update_password(user.id, &password_hash).await?;

        info!(user_id = user.id, "Password reset completed");

        Ok(DetailResponse::new("Password has been reset successfully."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_model;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn service(db: DatabaseConnection) -> AuthService {
        AuthService::new(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(CompanyRepository::new(db.clone())),
            Arc::new(InfluencerRepository::new(db)),
            Arc::new(JwtManager::new("auth-service-test-secret")),
            SmtpConfig {
                host: None,
                port: 587,
                user: None,
                password: None,
                from: "no-reply@example.com".to_string(),
            },
            "http://localhost:5173".to_string(),
        )
    }

    fn user(id: i32, username: &str, password: &str, role: &str) -> user_model::Model {
        user_model::Model {
            id,
            company_id: None,
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_decodable_token() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(42, "jane", "secret-pass", "influencer")]])
            .into_connection();

        let service = service(db);
        let envelope = service
            .login(TokenRequest {
                username: "jane".to_string(),
                password: "secret-pass".to_string(),
            })
            .await
            .unwrap();

        assert!(envelope.is_success);
        let token = envelope.data.unwrap().access_token;
        let claims = JwtManager::new("auth-service-test-secret")
            .verify_access_token(&token)
            .unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "influencer");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(42, "jane", "secret-pass", "influencer")]])
            .into_connection();

        let service = service(db);
        let result = service
            .login(TokenRequest {
                username: "jane".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_reset_password_rejects_mismatched_confirmation() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db);

        let result = service
            .reset_password(ResetPasswordRequest {
                token: "irrelevant".to_string(),
                new_password: "new-pass-1".to_string(),
                confirm_password: "new-pass-2".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reset_password_updates_hash() {
        let jwt = JwtManager::new("auth-service-test-secret");
        let token = jwt
            .create_access_token(42, UserRole::Influencer, Some("password_reset"))
            .unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(42, "jane", "old-pass", "influencer")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service(db);
        let response = service
            .reset_password(ResetPasswordRequest {
                token,
                new_password: "brand-new-pass".to_string(),
                confirm_password: "brand-new-pass".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.detail, "Password has been reset successfully.");
    }

    #[tokio::test]
    async fn test_forgot_password_does_not_reveal_unknown_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // 会社メール照合
            .append_query_results([Vec::<crate::domain::company_model::Model>::new()])
            // インフルエンサーメール照合
            .append_query_results([Vec::<crate::domain::influencer_model::Model>::new()])
            // ユーザー名フォールバック
            .append_query_results([Vec::<user_model::Model>::new()])
            .into_connection();

        let service = service(db);
        let response = service
            .forgot_password(ForgotPasswordRequest {
                email: "nobody@example.com".to_string(),
            })
            .await
            .unwrap();

        assert!(response.detail.contains("reset link has been sent"));
    }
}
