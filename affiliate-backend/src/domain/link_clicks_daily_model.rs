// affiliate-backend/src/domain/link_clicks_daily_model.rs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// クリックイベントの日次ロールアップ。(link_id, date) につき1行
///
/// 個々のクリックイベントは保存せず、当日行への
/// insert-or-increment だけを行う。unique_clicks は重複排除を
/// 実装するまでは clicks をミラーする
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "link_clicks_daily")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub link_id: i32,
    pub date: Date,
    pub clicks: i32,
    pub unique_clicks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::tracking_link_model::Entity",
        from = "Column::LinkId",
        to = "crate::domain::tracking_link_model::Column::Id"
    )]
    TrackingLink,
}

impl Related<crate::domain::tracking_link_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackingLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
