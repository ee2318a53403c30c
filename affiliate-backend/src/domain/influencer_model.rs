// affiliate-backend/src/domain/influencer_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "influencers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 外部パートナー（MLink）側の識別子。照合用に文字列で保持
    #[sea_orm(unique)]
    pub mlink_id: Option<String>,
    /// ローカルのログインユーザーへの任意の1対1リンク
    pub user_id: Option<i32>,
    pub display_name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_image: Option<String>,
    pub follower_count: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub engagement_rate: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instagram_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tiktok_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub youtube_url: Option<String>,
    pub social_links_json: Option<Json>,
    pub source_payload_json: Option<Json>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::UserId",
        to = "crate::domain::user_model::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "crate::domain::report_model::Entity")]
    Reports,
    #[sea_orm(has_many = "crate::domain::tracking_link_model::Entity")]
    TrackingLinks,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::report_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

// campaign_influencers 経由の多対多
impl Related<crate::domain::campaign_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::campaign_influencer_model::Relation::Campaign.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            crate::domain::campaign_influencer_model::Relation::Influencer
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
