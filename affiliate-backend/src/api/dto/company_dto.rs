// affiliate-backend/src/api/dto/company_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::company_model;

/// 会社作成リクエスト
///
/// 同じトランザクションで作成する companyロールの
/// ログインユーザーの資格情報も受け取る
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyCreate {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,
    pub adres: Option<String>,
    pub telefon: Option<String>,
    pub gsm: Option<String>,
    pub faks: Option<String>,
    pub vergi_dairesi: Option<String>,
    pub vergi_numarasi: Option<String>,
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub aktiflik_durumu: bool,
    pub yetkili_adi: Option<String>,
    pub yetkili_soyadi: Option<String>,
    pub yetkili_gsm: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn default_true() -> bool {
    true
}

/// 会社更新リクエスト
///
/// 可変フィールドを明示的に列挙したオプショナル構造。
/// 未指定のフィールドは変更しない
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub adres: Option<String>,
    pub telefon: Option<String>,
    pub gsm: Option<String>,
    pub faks: Option<String>,
    pub vergi_dairesi: Option<String>,
    pub vergi_numarasi: Option<String>,
    pub email: Option<String>,
    pub aktiflik_durumu: Option<bool>,
    pub yetkili_adi: Option<String>,
    pub yetkili_soyadi: Option<String>,
    pub yetkili_gsm: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyOut {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub adres: Option<String>,
    pub telefon: Option<String>,
    pub gsm: Option<String>,
    pub faks: Option<String>,
    pub vergi_dairesi: Option<String>,
    pub vergi_numarasi: Option<String>,
    pub email: Option<String>,
    pub aktiflik_durumu: bool,
    pub yetkili_adi: Option<String>,
    pub yetkili_soyadi: Option<String>,
    pub yetkili_gsm: Option<String>,
}

impl From<company_model::Model> for CompanyOut {
    fn from(company: company_model::Model) -> Self {
        Self {
            id: company.id,
            name: company.name,
            created_at: company.created_at,
            adres: company.adres,
            telefon: company.telefon,
            gsm: company.gsm,
            faks: company.faks,
            vergi_dairesi: company.vergi_dairesi,
            vergi_numarasi: company.vergi_numarasi,
            email: company.email,
            aktiflik_durumu: company.aktiflik_durumu,
            yetkili_adi: company.yetkili_adi,
            yetkili_soyadi: company.yetkili_soyadi,
            yetkili_gsm: company.yetkili_gsm,
        }
    }
}

/// 会社一覧クエリパラメータ
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyListQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub telefon: Option<String>,
}

/// 会社ユーザー追加のクエリパラメータ
#[derive(Debug, Clone, Deserialize)]
pub struct AddCompanyUserQuery {
    pub company_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 3, max = 255, message = "Username must be 3-255 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}
