// affiliate-backend/src/domain/report_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// コミッション分配レポート
///
/// 作成後は不変の履歴レコード。company_id は作成時点の
/// キャンペーン所属企業を非正規化して保持する。
/// インフルエンサー名とキャンペーン名は保存せず、所有関係から導出する
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub influencer_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub company_id: Option<i32>,
    pub total_clicks: i32,
    pub total_sales: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub brand_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub brand_commission_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub influencer_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub influencer_commission_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub other_costs_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub mimeda_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub mimeda_commission_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub agency_commission_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub agency_commission_amount: Option<Decimal>,
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
}

impl Related<crate::domain::influencer_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Influencer.def()
    }
}

impl Related<crate::domain::campaign_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<crate::domain::company_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
