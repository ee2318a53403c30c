// affiliate-backend/src/api/dto/auth_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::company_dto::CompanyOut;
use crate::api::dto::influencer_dto::InfluencerOut;
use crate::domain::user_model;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenData {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub company_id: Option<i32>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<user_model::Model> for UserOut {
    fn from(user: user_model::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            company_id: user.company_id,
            created_at: user.created_at,
        }
    }
}

/// `/users/me` のロール別付随情報
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MeInfo {
    Role(String),
    Company(Box<CompanyOut>),
    Influencer(Box<InfluencerOut>),
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserOut,
    pub info: Option<MeInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// forgot/reset 系が返す簡易応答
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
