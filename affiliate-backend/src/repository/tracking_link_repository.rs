// affiliate-backend/src/repository/tracking_link_repository.rs

use crate::db::DbPool;
use crate::domain::tracking_link_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;

#[derive(Clone)]
pub struct TrackingLinkRepository {
    db: DbPool,
}

impl TrackingLinkRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_token<C: ConnectionTrait>(
        &self,
        conn: &C,
        token: &str,
    ) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Token.eq(token))
            .one(conn)
            .await?)
    }

    /// 発行前の既存リンクチェック（プール接続で実行）
    pub async fn find_existing(
        &self,
        influencer_id: i32,
        campaign_id: i32,
        company_id: Option<i32>,
    ) -> AppResult<Option<Model>> {
        self.find_by_triple(&self.db, influencer_id, campaign_id, company_id)
            .await
    }

    /// (influencer, campaign, company) の自然キーで既存リンクを引く
    pub async fn find_by_triple<C: ConnectionTrait>(
        &self,
        conn: &C,
        influencer_id: i32,
        campaign_id: i32,
        company_id: Option<i32>,
    ) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::InfluencerId.eq(influencer_id))
            .filter(Column::CampaignId.eq(campaign_id))
            .filter(match company_id {
                Some(company_id) => Column::CompanyId.eq(company_id),
                None => Column::CompanyId.is_null(),
            })
            .one(conn)
            .await?)
    }

    /// 新規リンクを挿入する。自然キーの一意制約に衝突した場合は
    /// Noneを返す（同時発行レースの敗者は既存行を再取得して使う）
    pub async fn insert_if_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        link: ActiveModel,
    ) -> AppResult<Option<Model>> {
        let result = Entity::insert(link)
            .on_conflict(
                OnConflict::columns([Column::InfluencerId, Column::CampaignId, Column::CompanyId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_with_returning(conn)
            .await;

        match result {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotInserted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 集約クリックカウンタをアトミックにインクリメント
    pub async fn increment_click_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        link_id: i32,
    ) -> AppResult<u64> {
        let result = Entity::update_many()
            .col_expr(
                Column::ClickCount,
                Expr::col(Column::ClickCount).add(1),
            )
            .filter(Column::Id.eq(link_id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }
}
