// affiliate-backend/src/domain/campaign_influencer_model.rs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// キャンペーンとインフルエンサーの多対多中間テーブル
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_influencers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub campaign_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub influencer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::campaign_model::Entity",
        from = "Column::CampaignId",
        to = "crate::domain::campaign_model::Column::Id"
    )]
    Campaign,
    #[sea_orm(
        belongs_to = "crate::domain::influencer_model::Entity",
        from = "Column::InfluencerId",
        to = "crate::domain::influencer_model::Column::Id"
    )]
    Influencer,
}

impl ActiveModelBehavior for ActiveModel {}
