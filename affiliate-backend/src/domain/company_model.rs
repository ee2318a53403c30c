// affiliate-backend/src/domain/company_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub adres: Option<String>,
    pub telefon: Option<String>,
    pub gsm: Option<String>,
    pub faks: Option<String>,
    pub vergi_dairesi: Option<String>,
    pub vergi_numarasi: Option<String>,
    pub email: Option<String>,
    pub aktiflik_durumu: bool,
    pub yetkili_adi: Option<String>,
    pub yetkili_soyadi: Option<String>,
    pub yetkili_gsm: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::user_model::Entity")]
    Users,
    #[sea_orm(has_many = "crate::domain::campaign_model::Entity")]
    Campaigns,
    #[sea_orm(has_many = "crate::domain::report_model::Entity")]
    Reports,
    #[sea_orm(has_many = "crate::domain::tracking_link_model::Entity")]
    TrackingLinks,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<crate::domain::campaign_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaigns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
