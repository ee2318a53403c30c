// affiliate-backend/src/repository/campaign_repository.rs

use crate::db::DbPool;
use crate::domain::campaign_model::{ActiveModel, Column, Entity, Model};
use crate::domain::product_model;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::*;

/// キャンペーン一覧用フィルタ
///
/// 日付境界は end_date に対して適用する
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub company_id: Option<i32>,
    pub name: Option<String>,
    pub end_date_from: Option<DateTime<Utc>>,
    pub end_date_until: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct CampaignRepository {
    db: DbPool,
}

impl CampaignRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    /// 外部ID×会社でキャンペーンを引く（リコンシリエーションのマージキー）
    pub async fn find_by_mlink_and_company<C: ConnectionTrait>(
        &self,
        conn: &C,
        mlink_id: &str,
        company_id: i32,
    ) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::MlinkId.eq(mlink_id))
            .filter(Column::CompanyId.eq(company_id))
            .one(conn)
            .await?)
    }

    /// フィルタ付き一覧を商品とあわせて取得
    pub async fn find_with_products(
        &self,
        filter: CampaignFilter,
    ) -> AppResult<Vec<(Model, Vec<product_model::Model>)>> {
        let mut query = Entity::find();

        if let Some(company_id) = filter.company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }
        if let Some(name) = filter.name {
            query = query.filter(Expr::col((Entity, Column::Name)).ilike(format!("%{}%", name)));
        }
        if let Some(from) = filter.end_date_from {
            query = query.filter(Column::EndDate.gte(from));
        }
        if let Some(until) = filter.end_date_until {
            query = query.filter(Column::EndDate.lte(until));
        }

        Ok(query
            .order_by_asc(Column::Id)
            .find_with_related(product_model::Entity)
            .all(&self.db)
            .await?)
    }

    /// IDの集合からまとめて取得
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> AppResult<Vec<Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Entity::find()
            .filter(Column::Id.is_in(ids))
            .all(&self.db)
            .await?)
    }

    /// 終了日が未来のキャンペーン数（ダッシュボード用）
    pub async fn count_active(&self, company_id: Option<i32>) -> AppResult<u64> {
        let mut query = Entity::find().filter(Column::EndDate.gte(Utc::now()));

        if let Some(company_id) = company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }

        Ok(query.count(&self.db).await?)
    }

    /// キャンペーンを作成。トランザクション内からも呼べる
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        campaign: ActiveModel,
    ) -> AppResult<Model> {
        Ok(campaign.insert(conn).await?)
    }

    /// 既存キャンペーンを更新。トランザクション内からも呼べる
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        campaign: ActiveModel,
    ) -> AppResult<Model> {
        Ok(campaign.update(conn).await?)
    }
}
