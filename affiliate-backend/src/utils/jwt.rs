// affiliate-backend/src/utils/jwt.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user_model::UserRole;

/// アクセストークンの有効期限（分）
const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 12;

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    EncodingError(jsonwebtoken::errors::Error),

    #[error("JWT token has expired")]
    TokenExpired,

    #[error("Invalid JWT token")]
    InvalidToken,
}

/// アクセストークンのClaims
///
/// `sub` はユーザーID（文字列）、`role` はユーザーロール。
/// パスワードリセット用トークンは `purpose` で区別する
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// User role
    pub role: String,
    /// Token purpose (e.g. "password_reset")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

/// トラッキングリンクトークンのClaims
///
/// リンクトークンは短命の資格情報ではなく永続的な識別子なので
/// 有効期限を持たない
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LinkTokenClaims {
    /// Subject (influencer ID)
    pub sub: String,
    /// Influencer display name
    pub name: String,
    #[serde(rename = "campaignID")]
    pub campaign_id: i32,
}

/// JWTの発行・検証を担うマネージャ
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// アクセストークンを発行
    pub fn create_access_token(
        &self,
        user_id: i32,
        role: UserRole,
        purpose: Option<&str>,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            purpose: purpose.map(|p| p.to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_EXPIRE_MINUTES)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::EncodingError)
    }

    /// アクセストークンを検証してClaimsを取り出す
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }

    /// リンクトークンを発行（無期限）
    pub fn create_link_token(
        &self,
        influencer_id: i32,
        influencer_name: &str,
        campaign_id: i32,
    ) -> Result<String, JwtError> {
        let claims = LinkTokenClaims {
            sub: influencer_id.to_string(),
            name: influencer_name.to_string(),
            campaign_id,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(JwtError::EncodingError)
    }

    /// リンクトークンを検証してClaimsを取り出す
    ///
    /// expクレームを持たないため、有効期限の検証は無効化する
    pub fn decode_link_token(&self, token: &str) -> Result<LinkTokenClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<LinkTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| JwtError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> JwtManager {
        JwtManager::new("test-secret-key-for-unit-tests")
    }

    #[test]
    fn test_access_token_round_trip() {
        let manager = manager();
        let token = manager
            .create_access_token(42, UserRole::Company, None)
            .unwrap();

        let claims = manager.verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "company");
        assert!(claims.purpose.is_none());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_token_with_purpose() {
        let manager = manager();
        let token = manager
            .create_access_token(7, UserRole::Influencer, Some("password_reset"))
            .unwrap();

        let claims = manager.verify_access_token(&token).unwrap();
        assert_eq!(claims.purpose.as_deref(), Some("password_reset"));
    }

    #[test]
    fn test_access_token_rejects_wrong_secret() {
        let manager = manager();
        let token = manager
            .create_access_token(1, UserRole::Admin, None)
            .unwrap();

        let other = JwtManager::new("a-different-secret");
        assert!(matches!(
            other.verify_access_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_link_token_round_trip() {
        let manager = manager();
        let token = manager.create_link_token(7, "jane_doe", 3).unwrap();

        let claims = manager.decode_link_token(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.name, "jane_doe");
        assert_eq!(claims.campaign_id, 3);
    }

    #[test]
    fn test_link_token_serializes_campaign_id_field() {
        let claims = LinkTokenClaims {
            sub: "7".to_string(),
            name: "jane_doe".to_string(),
            campaign_id: 3,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["campaignID"], 3);
    }

    #[test]
    fn test_link_token_is_not_an_access_token() {
        let manager = manager();
        let token = manager.create_link_token(7, "jane_doe", 3).unwrap();

        // expを持たないリンクトークンはアクセストークンとしては不正
        assert!(manager.verify_access_token(&token).is_err());
    }
}
