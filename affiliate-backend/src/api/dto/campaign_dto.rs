// affiliate-backend/src/api/dto/campaign_dto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{campaign_model, product_model};

/// キャンペーン作成リクエスト（管理者のローカル登録用）
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCreate {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: String,
    pub brief: Option<String>,
    pub brand_commission_rate: Decimal,
    pub influencer_commission_rate: Decimal,
    pub other_costs_rate: Option<Decimal>,
    pub end_date: DateTime<Utc>,
    pub branding_image: Option<String>,
    #[serde(rename = "company_id")]
    pub company_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductOut {
    pub name: String,
    pub image: Option<String>,
}

impl From<product_model::Model> for ProductOut {
    fn from(product: product_model::Model) -> Self {
        Self {
            name: product.name,
            image: product.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOut {
    pub id: i32,
    pub name: String,
    pub brand_commission_rate: Option<Decimal>,
    pub influencer_commission_rate: Option<Decimal>,
    pub other_costs_rate: Option<Decimal>,
    pub end_date: Option<DateTime<Utc>>,
    pub products: Vec<ProductOut>,
    pub branding_image: Option<String>,
}

impl CampaignOut {
    pub fn from_model(
        campaign: campaign_model::Model,
        products: Vec<product_model::Model>,
    ) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            brand_commission_rate: campaign.brand_commission_rate,
            influencer_commission_rate: campaign.influencer_commission_rate,
            other_costs_rate: campaign.other_costs_rate,
            end_date: campaign.end_date,
            products: products.into_iter().map(ProductOut::from).collect(),
            branding_image: campaign.branding_image,
        }
    }
}

/// キャンペーン一覧クエリパラメータ
///
/// 日付は `DD.MM.YYYY`、end_date に対する境界として解釈する
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignQuery {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<String>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<String>,
    pub company_id: Option<i32>,
}
