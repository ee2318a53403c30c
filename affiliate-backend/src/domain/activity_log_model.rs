// affiliate-backend/src/domain/activity_log_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_id: i32,
    #[sea_orm(column_name = "type")]
    pub activity_type: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::company_model::Entity",
        from = "Column::CompanyId",
        to = "crate::domain::company_model::Column::Id"
    )]
    Company,
}

impl Related<crate::domain::company_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 新規エントリ用のビルダー。idとtimestampはストア側で採番される
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub company_id: i32,
    pub activity_type: String,
    pub label: String,
}

impl NewActivity {
    pub fn new(company_id: i32, activity_type: &str, label: &str) -> Self {
        Self {
            company_id,
            activity_type: activity_type.to_string(),
            label: label.to_string(),
        }
    }

    /// リンク発行の記録
    pub fn link_generated(company_id: i32, label: &str) -> Self {
        Self::new(company_id, "Link generated", label)
    }

    /// レポート作成の記録
    pub fn report_created(company_id: i32, label: &str) -> Self {
        Self::new(company_id, "Report created.", label)
    }

    /// キャンペーン開始の記録
    pub fn campaign_started(company_id: i32, label: &str) -> Self {
        Self::new(company_id, "Campaign started", label)
    }
}
