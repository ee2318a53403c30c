// affiliate-backend/src/service/company_service.rs

use std::sync::Arc;

use sea_orm::{IntoActiveModel, Set, TransactionTrait};
use tracing::info;
use validator::Validate;

use crate::api::dto::company_dto::{
    CompanyCreate, CompanyListQuery, CompanyOut, CompanyUpdate, UserCreate,
};
use crate::db::DbPool;
use crate::domain::company_model;
use crate::domain::user_model::UserRole;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::repository::company_repository::{CompanyFilter, CompanyRepository};
use crate::repository::user_repository::UserRepository;
use crate::utils::password::hash_password;

#[derive(Clone)]
pub struct CompanyService {
    db: DbPool,
    company_repo: Arc<CompanyRepository>,
    user_repo: Arc<UserRepository>,
}

impl CompanyService {
    pub fn new(
        db: DbPool,
        company_repo: Arc<CompanyRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            db,
            company_repo,
            user_repo,
        }
    }

    /// 会社とそのログインユーザーを同一ユニットオブワークで作成
    pub async fn create_company(
        &self,
        auth: &AuthenticatedUser,
        company_in: CompanyCreate,
    ) -> AppResult<CompanyOut> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden(
                "Only admins can create companies".to_string(),
            ));
        }

        company_in.validate()?;

        if self
            .company_repo
            .find_by_name(&company_in.name)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(
                "Company with this name already exists".to_string(),
            ));
        }

        let username = company_in
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::ValidationError("username is required".to_string()))?;
        let password = company_in
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::ValidationError("password is required".to_string()))?;

        let password_hash =
            hash_password(password).map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let new_company = company_model::ActiveModel {
            name: Set(company_in.name.clone()),
            adres: Set(company_in.adres.clone()),
            telefon: Set(company_in.telefon.clone()),
            gsm: Set(company_in.gsm.clone()),
            faks: Set(company_in.faks.clone()),
            vergi_dairesi: Set(company_in.vergi_dairesi.clone()),
            vergi_numarasi: Set(company_in.vergi_numarasi.clone()),
            email: Set(company_in.email.clone()),
            aktiflik_durumu: Set(company_in.aktiflik_durumu),
            yetkili_adi: Set(company_in.yetkili_adi.clone()),
            yetkili_soyadi: Set(company_in.yetkili_soyadi.clone()),
            yetkili_gsm: Set(company_in.yetkili_gsm.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let txn = self.db.begin().await?;

        let company = self.company_repo.create(&txn, new_company).await?;
        self.user_repo
            .create(
                &txn,
                username,
                &password_hash,
                UserRole::Company,
                Some(company.id),
            )
            .await?;

        txn.commit().await?;

        info!(company_id = company.id, "Company created");

        Ok(CompanyOut::from(company))
    }

    /// 会社一覧（管理者のみ、任意のilikeフィルタ付き）
    pub async fn list_companies(
        &self,
        auth: &AuthenticatedUser,
        query: CompanyListQuery,
    ) -> AppResult<Vec<CompanyOut>> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden(
                "You do not have permission to view companies".to_string(),
            ));
        }

        let companies = self
            .company_repo
            .find_with_filters(CompanyFilter {
                name: query.name,
                email: query.email,
                telefon: query.telefon,
            })
            .await?;

        Ok(companies.into_iter().map(CompanyOut::from).collect())
    }

    pub async fn get_company(&self, auth: &AuthenticatedUser, id: i32) -> AppResult<CompanyOut> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let company = self
            .company_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        Ok(CompanyOut::from(company))
    }

    /// 会社情報の更新。名前は正規化と一意性チェックを通す
    pub async fn update_company(
        &self,
        auth: &AuthenticatedUser,
        id: i32,
        update: CompanyUpdate,
    ) -> AppResult<CompanyOut> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let company = self
            .company_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        let mut active = company.into_active_model();

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::BadRequest(
                    "Company name cannot be empty".to_string(),
                ));
            }
            if self
                .company_repo
                .find_conflicting_name(&name, id)
                .await?
                .is_some()
            {
                return Err(AppError::BadRequest(
                    "Company with this name already exists".to_string(),
                ));
            }
            active.name = Set(name);
        }

        if let Some(adres) = update.adres {
            active.adres = Set(Some(adres));
        }
        if let Some(telefon) = update.telefon {
            active.telefon = Set(Some(telefon));
        }
        if let Some(gsm) = update.gsm {
            active.gsm = Set(Some(gsm));
        }
        if let Some(faks) = update.faks {
            active.faks = Set(Some(faks));
        }
        if let Some(vergi_dairesi) = update.vergi_dairesi {
            active.vergi_dairesi = Set(Some(vergi_dairesi));
        }
        if let Some(vergi_numarasi) = update.vergi_numarasi {
            active.vergi_numarasi = Set(Some(vergi_numarasi));
        }
        if let Some(email) = update.email {
            active.email = Set(Some(email));
        }
        if let Some(aktiflik_durumu) = update.aktiflik_durumu {
            active.aktiflik_durumu = Set(aktiflik_durumu);
        }
        if let Some(yetkili_adi) = update.yetkili_adi {
            active.yetkili_adi = Set(Some(yetkili_adi));
        }
        if let Some(yetkili_soyadi) = update.yetkili_soyadi {
            active.yetkili_soyadi = Set(Some(yetkili_soyadi));
        }
        if let Some(yetkili_gsm) = update.yetkili_gsm {
            active.yetkili_gsm = Set(Some(yetkili_gsm));
        }

        let updated = self.company_repo.update(active).await?;

        Ok(CompanyOut::from(updated))
    }

    /// 会社ロールのログインユーザーを追加
    pub async fn add_company_user(
        &self,
        auth: &AuthenticatedUser,
        company_id: i32,
        user_in: UserCreate,
    ) -> AppResult<()> {
        if !auth.is_admin() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        user_in.validate()?;

        if self
            .user_repo
            .find_by_username(&user_in.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        let password_hash = hash_password(&user_in.password)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        self.user_repo
            .create(
                &self.db,
                &user_in.username,
                &password_hash,
                UserRole::Company,
                Some(company_id),
            )
            .await?;

        Ok(())
    }
}
