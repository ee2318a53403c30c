// affiliate-backend/src/domain/campaign_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_id: Option<i32>,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub brief: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub brand_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub influencer_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub other_costs_rate: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[sea_orm(column_type = "Text", nullable)]
    pub branding_image: Option<String>,
    /// 外部パートナー側の識別子。存在する場合のみ一意
    #[sea_orm(unique)]
    pub mlink_id: Option<String>,
    pub source: String,
    pub source_payload_json: Option<Json>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::company_model::Entity",
        from = "Column::CompanyId",
        to = "crate::domain::company_model::Column::Id"
    )]
    Company,
    #[sea_orm(has_many = "crate::domain::product_model::Entity")]
    Products,
    #[sea_orm(has_many = "crate::domain::tracking_link_model::Entity")]
    TrackingLinks,
    #[sea_orm(has_many = "crate::domain::report_model::Entity")]
    Reports,
}

impl Related<crate::domain::company_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<crate::domain::product_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<crate::domain::report_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

// campaign_influencers 経由の多対多
impl Related<crate::domain::influencer_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::campaign_influencer_model::Relation::Influencer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            crate::domain::campaign_influencer_model::Relation::Campaign
                .def()
                .rev(),
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
