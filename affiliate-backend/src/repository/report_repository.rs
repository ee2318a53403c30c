// affiliate-backend/src/repository/report_repository.rs

use crate::db::DbPool;
use crate::domain::influencer_model;
use crate::domain::report_model::{ActiveModel, Column, Entity, Model, Relation};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::*;

/// レポート検索用フィルタ
///
/// インフルエンサーは内部IDまたは外部ID（mlink_id）のどちらかで
/// 絞り込める。日付はcreated_atに対する [from, until) の半開区間
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub company_id: Option<i32>,
    pub influencer_id: Option<i32>,
    pub influencer_mlink_id: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_until: Option<DateTime<Utc>>,
}

/// ダッシュボード用の集計値
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ReportTotals {
    pub total_clicks: Option<i64>,
    pub total_sales: Option<i64>,
    pub total_commission: Option<Decimal>,
}

#[derive(Clone)]
pub struct ReportRepository {
    db: DbPool,
}

impl ReportRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// レポートを作成。トランザクション内からも呼べる
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        report: ActiveModel,
    ) -> AppResult<Model> {
        Ok(report.insert(conn).await?)
    }

    /// インフルエンサー自身のレポート一覧
    pub async fn find_by_influencer(&self, influencer_id: i32) -> AppResult<Vec<Model>> {
        Ok(Entity::find()
            .filter(Column::InfluencerId.eq(influencer_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?)
    }

    /// フィルタ付き検索
    pub async fn find_with_filters(&self, filter: ReportFilter) -> AppResult<Vec<Model>> {
        let mut query = Entity::find();

        if let Some(company_id) = filter.company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }
        if let Some(influencer_id) = filter.influencer_id {
            query = query.filter(Column::InfluencerId.eq(influencer_id));
        }
        if let Some(mlink_id) = filter.influencer_mlink_id {
            // 外部IDはインフルエンサー経由で解決する
            query = query
                .join(JoinType::InnerJoin, Relation::Influencer.def())
                .filter(influencer_model::Column::MlinkId.eq(mlink_id));
        }
        if let Some(from) = filter.created_from {
            query = query.filter(Column::CreatedAt.gte(from));
        }
        if let Some(until) = filter.created_until {
            // 終了日はその日全体を含む（翌日0時を排他上限とする）
            query = query.filter(Column::CreatedAt.lt(until));
        }

        Ok(query.order_by_asc(Column::Id).all(&self.db).await?)
    }

    /// 会社スコープの合計値（ダッシュボード用）
    pub async fn totals(&self, company_id: Option<i32>) -> AppResult<ReportTotals> {
        let mut query = Entity::find().select_only();

        if let Some(company_id) = company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }

        let totals = query
            .column_as(Column::TotalClicks.sum(), "total_clicks")
            .column_as(Column::TotalSales.sum(), "total_sales")
            .column_as(Column::BrandCommissionAmount.sum(), "total_commission")
            .into_model::<ReportTotals>()
            .one(&self.db)
            .await?;

        Ok(totals.unwrap_or(ReportTotals {
            total_clicks: None,
            total_sales: None,
            total_commission: None,
        }))
    }
}
