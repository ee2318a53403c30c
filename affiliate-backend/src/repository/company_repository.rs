// affiliate-backend/src/repository/company_repository.rs

use crate::db::DbPool;
use crate::domain::company_model::{ActiveModel, Column, Entity, Model};
use crate::error::AppResult;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::*;

/// 会社検索用フィルタ
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub telefon: Option<String>,
}

#[derive(Clone)]
pub struct CompanyRepository {
    db: DbPool,
}

impl CompanyRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// 名前が衝突する別の会社が存在するか（更新時の一意性チェック用）
    pub async fn find_conflicting_name(
        &self,
        name: &str,
        exclude_id: i32,
    ) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Name.eq(name))
            .filter(Column::Id.ne(exclude_id))
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

    /// フィルタ付き一覧（ID昇順）
    pub async fn find_with_filters(&self, filter: CompanyFilter) -> AppResult<Vec<Model>> {
        let mut query = Entity::find();

        if let Some(name) = filter.name {
            query = query.filter(Expr::col(Column::Name).ilike(format!("%{}%", name)));
        }
        if let Some(email) = filter.email {
            query = query.filter(Expr::col(Column::Email).ilike(format!("%{}%", email)));
        }
        if let Some(telefon) = filter.telefon {
            query = query.filter(Expr::col(Column::Telefon).ilike(format!("%{}%", telefon)));
        }

        Ok(query.order_by_asc(Column::Id).all(&self.db).await?)
    }

    /// 会社を作成。トランザクション内からも呼べる
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        company: ActiveModel,
    ) -> AppResult<Model> {
        Ok(company.insert(conn).await?)
    }

    pub async fn update(&self, company: ActiveModel) -> AppResult<Model> {
        Ok(company.update(&self.db).await?)
    }
}
