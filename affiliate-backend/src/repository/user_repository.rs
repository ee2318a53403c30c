// affiliate-backend/src/repository/user_repository.rs

use crate::db::DbPool;
use crate::domain::user_model::{ActiveModel, Column, Entity, Model, UserRole};
use crate::error::AppResult;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::*;

#[derive(Clone)]
pub struct UserRepository {
    db: DbPool,
}

impl UserRepository {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    /// ユーザー名をメールアドレスとして大文字小文字を無視して照合
    /// （パスワード再設定のフォールバック検索用）
    pub async fn find_by_username_ilike(&self, value: &str) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Expr::col(Column::Username).ilike(value))
            .one(&self.db)
            .await?)
    }

    /// 会社に紐づく最初のログインユーザーを取得
    pub async fn find_first_by_company_id(&self, company_id: i32) -> AppResult<Option<Model>> {
        Ok(Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await?)
    }

    /// ログインユーザーを作成。トランザクション内からも呼べる
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
        password_hash: &str,
        role: UserRole,
        company_id: Option<i32>,
    ) -> AppResult<Model> {
        let user = ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            company_id: Set(company_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        Ok(user.insert(conn).await?)
    }

    pub async fn update_password(&self, user_id: i32, password_hash: &str) -> AppResult<()> {
        Entity::update_many()
            .col_expr(Column::PasswordHash, Expr::value(password_hash))
            .filter(Column::Id.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
