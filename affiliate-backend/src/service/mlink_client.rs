// affiliate-backend/src/service/mlink_client.rs

//! 外部パートナー（MLink）APIクライアント
//!
//! 認証トークンは有効期限の60秒前まで使い回し、切れたら
//! ロック配下で再取得する。呼び出しの失敗は自動リトライせず
//! そのままエラーとして呼び出し元へ伝える

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::dto::link_dto::GenerateLinkRequest;
use crate::config::MlinkConfig;
use crate::error::{AppError, AppResult};

/// 期限情報付きのキャッシュ済みトークン
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

pub struct MlinkClient {
    http: reqwest::Client,
    config: MlinkConfig,
    token: RwLock<Option<CachedToken>>,
}

impl MlinkClient {
    pub fn new(config: MlinkConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        Ok(Self {
            http,
            config,
            token: RwLock::new(None),
        })
    }

    /// 有効なトークンを返す。なければログインして取得する
    async fn ensure_token(&self) -> AppResult<String> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.is_valid() {
                return Ok(cached.token.clone());
            }
        }

        let mut guard = self.token.write().await;
        // 書き込みロック待ちの間に他のリクエストが更新済みかもしれない
        if let Some(cached) = guard.as_ref() {
            if cached.is_valid() {
                return Ok(cached.token.clone());
            }
        }

        let response: Value = self
            .http
            .post(format!("{}/Account/GetTokenV2", self.config.base_url))
            .json(&serde_json::json!({
                "username": self.config.username,
                "password": self.config.password,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

        if !response["isSuccess"].as_bool().unwrap_or(false) {
            let message = response["message"].as_str().unwrap_or("unknown error");
            return Err(AppError::ExternalServiceError(format!(
                "MLink login failed: {}",
                message
            )));
        }

        let token = response["data"]["accessToken"]
            .as_str()
            .ok_or_else(|| {
                AppError::ExternalServiceError("MLink login response missing token".to_string())
            })?
            .to_string();
        let expiration = response["data"]["expiration"]
            .as_str()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok_or_else(|| {
                AppError::ExternalServiceError(
                    "MLink login response missing expiration".to_string(),
                )
            })?;

        info!("MLink token refreshed");

        *guard = Some(CachedToken {
            token: token.clone(),
            // 期限ぎりぎりのトークンで失敗しないよう60秒手前で失効扱い
            expires_at: expiration - Duration::seconds(60),
        });

        Ok(token)
    }

    /// パートナー側のキャンペーン一覧を取得
    pub async fn get_campaigns(&self, params: &[(String, String)]) -> AppResult<Value> {
        let token = self.ensure_token().await?;

        self.http
            .get(format!("{}/Affiliate/GetCampaigns", self.config.base_url))
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))
    }

    /// パートナー側のレポートを取得
    pub async fn get_report(&self, params: &[(String, String)]) -> AppResult<Value> {
        let token = self.ensure_token().await?;

        self.http
            .get(format!("{}/Affiliate/GetReport", self.config.base_url))
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))
    }

    /// パートナー側でのリンク発行
    pub async fn generate_link(&self, body: &GenerateLinkRequest) -> AppResult<Value> {
        let token = self.ensure_token().await?;

        self.http
            .put(format!("{}/Affiliate/GenerateLink", self.config.base_url))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .error_for_status()
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_token_validity() {
        let valid = CachedToken {
            token: "t".to_string(),
            expires_at: Utc::now() + Duration::minutes(5),
        };
        assert!(valid.is_valid());

        let expired = CachedToken {
            token: "t".to_string(),
            expires_at: Utc::now() - Duration::seconds(1),
        };
        assert!(!expired.is_valid());
    }
}
