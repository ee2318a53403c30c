// affiliate-backend/src/api/dto/import_dto.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// リコンシリエーションのリクエストボディ
///
/// 各要素は型付けされた `MlinkCampaignItem` として解釈するが、
/// 生のJSONスナップショットも provenance として保存するため
/// Value のまま受ける
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MlinkProductItem {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// 外部フィードのキャンペーンレコード
#[derive(Debug, Clone, Deserialize)]
pub struct MlinkCampaignItem {
    /// 外部側では数値のことも文字列のこともある
    pub id: Option<Value>,
    pub name: Option<String>,
    pub brief: Option<String>,
    #[serde(rename = "brandCampaignCommissionRate")]
    pub brand_campaign_commission_rate: Option<Decimal>,
    #[serde(rename = "influencerCommissionRate")]
    pub influencer_commission_rate: Option<Decimal>,
    #[serde(rename = "otherCostsRate")]
    pub other_costs_rate: Option<Decimal>,
    /// `DD.MM.YYYY`。パース不能は欠損として扱う
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "brandingImage")]
    pub branding_image: Option<String>,
    #[serde(default)]
    pub products: Vec<MlinkProductItem>,
}

impl MlinkCampaignItem {
    /// マージキーとなる外部ID。欠損・空文字はNone
    pub fn external_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// インポートのクエリパラメータ（adminのみ指定可）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportQuery {
    pub company_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResultData {
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_id_accepts_string_and_number() {
        let item: MlinkCampaignItem =
            serde_json::from_value(serde_json::json!({"id": "ext-1"})).unwrap();
        assert_eq!(item.external_id().as_deref(), Some("ext-1"));

        let item: MlinkCampaignItem =
            serde_json::from_value(serde_json::json!({"id": 42})).unwrap();
        assert_eq!(item.external_id().as_deref(), Some("42"));
    }

    #[test]
    fn test_external_id_missing_or_empty() {
        let item: MlinkCampaignItem = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(item.external_id().is_none());

        let item: MlinkCampaignItem =
            serde_json::from_value(serde_json::json!({"id": ""})).unwrap();
        assert!(item.external_id().is_none());

        let item: MlinkCampaignItem =
            serde_json::from_value(serde_json::json!({"id": null})).unwrap();
        assert!(item.external_id().is_none());
    }

    #[test]
    fn test_campaign_item_field_names() {
        let item: MlinkCampaignItem = serde_json::from_value(serde_json::json!({
            "id": "ext-1",
            "name": "Summer",
            "brandCampaignCommissionRate": "10.00",
            "influencerCommissionRate": "5.00",
            "endDate": "31.12.2025",
            "products": [{"name": "Shirt", "image": "a.png"}]
        }))
        .unwrap();

        assert_eq!(item.name.as_deref(), Some("Summer"));
        assert_eq!(
            item.brand_campaign_commission_rate,
            Some(Decimal::new(1000, 2))
        );
        assert_eq!(item.end_date.as_deref(), Some("31.12.2025"));
        assert_eq!(item.products.len(), 1);
        assert_eq!(item.products[0].name.as_deref(), Some("Shirt"));
    }
}
