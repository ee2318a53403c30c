// affiliate-backend/src/domain/tracking_link_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// リンクのライフサイクル状態
pub const STATUS_ACTIVE: &str = "active";

/// ローカル発行リンクの出所タグ
pub const SOURCE_LOCAL: &str = "local";

/// 1インフルエンサー×1キャンペーンのアトリビューション経路
///
/// (influencer_id, campaign_id, company_id) の組につき最大1行。
/// click_count は日次ロールアップの合計と一致することを目標とする
/// 集約カウンタ
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracking_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub influencer_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub company_id: Option<i32>,
    /// 発行時点のインフルエンサー表示名のスナップショット
    pub influencer_name: Option<String>,
    #[sea_orm(unique)]
    pub token: String,
    pub generated_url: String,
    pub landing_url: Option<String>,
    pub status: String,
    pub source: String,
    pub mlink_id: Option<String>,
    pub mlink_url: Option<String>,
    pub click_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::influencer_model::Entity",
        from = "Column::InfluencerId",
        to = "crate::domain::influencer_model::Column::Id"
    )]
    Influencer,
    #[sea_orm(
        belongs_to = "crate::domain::campaign_model::Entity",
        from = "Column::CampaignId",
        to = "crate::domain::campaign_model::Column::Id"
    )]
    Campaign,
    #[sea_orm(
        belongs_to = "crate::domain::company_model::Entity",
        from = "Column::CompanyId",
        to = "crate::domain::company_model::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "crate::domain::link_clicks_daily_model::Entity")]
    DailyClicks,
}

impl Related<crate::domain::campaign_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<crate::domain::influencer_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Influencer.def()
    }
}

impl Related<crate::domain::company_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<crate::domain::link_clicks_daily_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyClicks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}
