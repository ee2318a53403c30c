// affiliate-backend/src/api/dto/influencer_dto.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::influencer_model;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InfluencerCreate {
    #[validate(length(min = 3, max = 255, message = "Username must be 3-255 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 255, message = "Display name must not be empty"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// インフルエンサー更新リクエスト
///
/// 可変フィールドを明示的に列挙したオプショナル構造。
/// resetPassword を立てるとパスワード再設定URLを発行して返す
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfluencerUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub active: Option<bool>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    #[serde(rename = "resetPassword", default)]
    pub reset_password: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InfluencerOut {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub active: bool,
}

impl From<influencer_model::Model> for InfluencerOut {
    fn from(influencer: influencer_model::Model) -> Self {
        Self {
            id: influencer.id,
            username: influencer.username,
            display_name: influencer.display_name,
            email: influencer.email,
            phone: influencer.phone,
            profile_image: influencer.profile_image,
            active: influencer.active,
        }
    }
}

/// 管理者向け一覧の簡易表現
#[derive(Debug, Serialize)]
pub struct InfluencerSummary {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub active: bool,
}

impl From<influencer_model::Model> for InfluencerSummary {
    fn from(influencer: influencer_model::Model) -> Self {
        Self {
            id: influencer.id,
            username: influencer.username,
            display_name: influencer.display_name,
            email: influencer.email,
            active: influencer.active,
        }
    }
}

/// 管理者向け詳細表現
#[derive(Debug, Serialize)]
pub struct InfluencerDetail {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
    pub active: bool,
    pub user_id: Option<i32>,
    pub mlink_id: Option<String>,
    /// resetPassword要求時のみ設定される
    #[serde(rename = "resetUrl", skip_serializing_if = "Option::is_none")]
    pub reset_url: Option<String>,
}

impl From<influencer_model::Model> for InfluencerDetail {
    fn from(influencer: influencer_model::Model) -> Self {
        Self {
            id: influencer.id,
            username: influencer.username,
            display_name: influencer.display_name,
            email: influencer.email,
            phone: influencer.phone,
            profile_image: influencer.profile_image,
            active: influencer.active,
            user_id: influencer.user_id,
            mlink_id: influencer.mlink_id,
            reset_url: None,
        }
    }
}

/// インフルエンサー作成結果
#[derive(Debug, Serialize)]
pub struct AddInfluencerData {
    #[serde(rename = "influencerId")]
    pub influencer_id: i32,
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(rename = "resetUrl")]
    pub reset_url: String,
}

/// インフルエンサー一覧クエリパラメータ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfluencerListQuery {
    pub name: Option<String>,
}

/// キャンペーン参加インフルエンサー一覧のクエリ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignInfluencersQuery {
    pub campaign_id: Option<i32>,
}
