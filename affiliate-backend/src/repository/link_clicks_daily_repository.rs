// affiliate-backend/src/repository/link_clicks_daily_repository.rs

use crate::db::DbPool;
use crate::domain::link_clicks_daily_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;

#[derive(Clone)]
pub struct LinkClicksDailyRepository {
    db: DbPool,
}

impl LinkClicksDailyRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 当日行への insert-or-increment
    ///
    /// (link_id, date) の一意制約への衝突を「既に行がある」分岐として
    /// 扱い、別個の read-then-write は行わない。同時リクエストでも
    /// カウントを取りこぼさない
    pub async fn record_click<C: ConnectionTrait>(
        &self,
        conn: &C,
        link_id: i32,
        date: NaiveDate,
    ) -> AppResult<()> {
        let row = ActiveModel {
            link_id: Set(link_id),
            date: Set(date),
            clicks: Set(1),
            // 重複排除は未実装。clicksをミラーする
            unique_clicks: Set(1),
            ..Default::default()
        };

        Entity::insert(row)
            .on_conflict(
                OnConflict::columns([Column::LinkId, Column::Date])
                    .value(Column::Clicks, Expr::col(Column::Clicks).add(1))
                    .value(Column::UniqueClicks, Expr::col(Column::UniqueClicks).add(1))
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;

        Ok(())
    }

    pub async fn find_by_link_and_date(
        &self,
        link_id: i32,
        date: NaiveDate,
    ) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::LinkId.eq(link_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_record_click_issues_single_upsert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = LinkClicksDailyRepository::new(db.clone());
        let date = chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        repo.record_click(&db, 10, date).await.unwrap();

        let statements = format!("{:?}", db.into_transaction_log());
        assert!(statements.contains("ON CONFLICT"));
        assert!(statements.contains("link_clicks_daily"));
    }

    #[tokio::test]
    async fn test_find_by_link_and_date() {
        let row = Model {
            id: 1,
            link_id: 10,
            date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            clicks: 3,
            unique_clicks: 3,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let repo = LinkClicksDailyRepository::new(db);
        let found = repo
            .find_by_link_and_date(10, chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.clicks, 3);
        assert_eq!(found.unique_clicks, 3);
    }
}
