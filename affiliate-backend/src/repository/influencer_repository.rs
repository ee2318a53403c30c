// affiliate-backend/src/repository/influencer_repository.rs

use crate::db::DbPool;
use crate::domain::influencer_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::*;

#[derive(Clone)]
pub struct InfluencerRepository {
    db: DbPool,
}

impl InfluencerRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    /// ログインユーザーIDからインフルエンサープロフィールを引く
    pub async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// メールアドレスで大文字小文字を無視して検索
    pub async fn find_by_email_ilike(&self, email: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Email.is_not_null())
            .filter(Expr::col(Column::Email).ilike(email))
            .one(&self.db)
            .await?)
    }

    /// ユーザー名の部分一致で一覧（ID昇順）
    pub async fn find_with_name_filter(&self, name: Option<&str>) -> AppResult<Vec<Model>> {
        let mut query = Entity::find();

        if let Some(name) = name {
            query = query.filter(Expr::col(Column::Username).ilike(format!("%{}%", name)));
        }

        Ok(query.order_by_asc(Column::Id).all(&self.db).await?)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Model>> {
        Ok(Entity::find().order_by_asc(Column::Id).all(&self.db).await?)
    }

    /// キャンペーンに紐づくインフルエンサーを取得（多対多）
    pub async fn find_by_campaign(
        &self,
        campaign: &crate::domain::campaign_model::Model,
    ) -> AppResult<Vec<Model>> {
        Ok(campaign
            .find_related(Entity)
            .order_by_asc(Column::Id)
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

    /// インフルエンサープロフィールを作成。トランザクション内からも呼べる
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        influencer: ActiveModel,
    ) -> AppResult<Model> {
        Ok(influencer.insert(conn).await?)
    }

    pub async fn update(&self, influencer: ActiveModel) -> AppResult<Model> {
        Ok(influencer.update(&self.db).await?)
    }
}
