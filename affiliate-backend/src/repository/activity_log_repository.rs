// affiliate-backend/src/repository/activity_log_repository.rs

use crate::db::DbPool;
use crate::domain::activity_log_model::{ActiveModel, Column, Entity, Model, NewActivity};
use crate::error::AppResult;
use sea_orm::*;

#[derive(Clone)]
pub struct ActivityLogRepository {
    db: DbPool,
}

impl ActivityLogRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// アクティビティログを作成
    ///
    /// リンク発行・レポート作成と同一のユニットオブワークで書くため、
    /// トランザクションを受け取れるようにしてある
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        activity: NewActivity,
    ) -> AppResult<Model> {
        let log = ActiveModel {
            company_id: Set(activity.company_id),
            activity_type: Set(activity.activity_type),
            label: Set(activity.label),
            timestamp: Set(chrono::Utc::now()),
            ..Default::default()
        };

        Ok(log.insert(conn).await?)
    }

    /// 直近のアクティビティを取得（新しい順）
    pub async fn find_recent(
        &self,
        company_id: Option<i32>,
        limit: u64,
    ) -> AppResult<Vec<Model>> {
        let mut query = Entity::find();

        if let Some(company_id) = company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }

        Ok(query
            .order_by_desc(Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await?)
    }
}
