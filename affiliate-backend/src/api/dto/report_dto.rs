// affiliate-backend/src/api/dto/report_dto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::report_model;

/// レポート作成リクエスト
///
/// 金額はコミッション計算済みの値を呼び出し側が与える。
/// エンジン側で再計算はしない
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreate {
    #[serde(rename = "influencer_id", default)]
    pub influencer_id: Option<i32>,
    pub campaign_id: i32,
    pub total_clicks: i32,
    pub total_sales: i32,

    pub brand_commission_rate: Decimal,
    pub brand_commission_amount: Decimal,
    pub influencer_commission_rate: Decimal,
    pub influencer_commission_amount: Decimal,
    pub other_costs_rate: Decimal,

    pub mimeda_commission_rate: Decimal,
    pub mimeda_commission_amount: Decimal,
    pub agency_commission_rate: Decimal,
    pub agency_commission_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOut {
    pub id: i32,
    #[serde(rename = "influencer_id")]
    pub influencer_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub total_clicks: i32,
    pub total_sales: i32,
    pub created_at: DateTime<Utc>,

    pub brand_commission_rate: Option<Decimal>,
    pub brand_commission_amount: Option<Decimal>,
    pub influencer_commission_rate: Option<Decimal>,
    pub influencer_commission_amount: Option<Decimal>,
    pub other_costs_rate: Option<Decimal>,

    pub mimeda_commission_rate: Option<Decimal>,
    pub mimeda_commission_amount: Option<Decimal>,
    pub agency_commission_rate: Option<Decimal>,
    pub agency_commission_amount: Option<Decimal>,

    /// 保存せず所有関係から導出する表示名
    pub influencer_name: Option<String>,
    pub campaign_name: Option<String>,
}

impl ReportOut {
    pub fn from_model(
        report: report_model::Model,
        influencer_name: Option<String>,
        campaign_name: Option<String>,
    ) -> Self {
        Self {
            id: report.id,
            influencer_id: report.influencer_id,
            campaign_id: report.campaign_id,
            total_clicks: report.total_clicks,
            total_sales: report.total_sales,
            created_at: report.created_at,
            brand_commission_rate: report.brand_commission_rate,
            brand_commission_amount: report.brand_commission_amount,
            influencer_commission_rate: report.influencer_commission_rate,
            influencer_commission_amount: report.influencer_commission_amount,
            other_costs_rate: report.other_costs_rate,
            mimeda_commission_rate: report.mimeda_commission_rate,
            mimeda_commission_amount: report.mimeda_commission_amount,
            agency_commission_rate: report.agency_commission_rate,
            agency_commission_amount: report.agency_commission_amount,
            influencer_name,
            campaign_name,
        }
    }
}

/// レポート一覧のエンベロープ
///
/// 共通エンベロープに集計フィールドを足した形
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub data: Vec<ReportOut>,
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(rename = "activeInfluencers")]
    pub active_influencers: Option<i64>,
    #[serde(rename = "totalInfluencerCommission")]
    pub total_influencer_commission: Option<Decimal>,
}

impl ReportListResponse {
    pub fn ok(
        data: Vec<ReportOut>,
        active_influencers: i64,
        total_influencer_commission: Decimal,
    ) -> Self {
        Self {
            data,
            is_success: true,
            message: None,
            kind: 0,
            active_influencers: Some(active_influencers),
            total_influencer_commission: Some(total_influencer_commission),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            is_success: false,
            message: Some(message.into()),
            kind: 1,
            active_influencers: None,
            total_influencer_commission: None,
        }
    }
}

/// レポート検索クエリパラメータ
///
/// 外部API互換の大文字始まりパラメータ名。日付は `DD.MM.YYYY`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "InfluencerID")]
    pub influencer_id: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<String>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<String>,
    pub company_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_create_field_names() {
        let body = serde_json::json!({
            "influencer_id": 7,
            "campaignId": 3,
            "totalClicks": 120,
            "totalSales": 4,
            "brandCommissionRate": "10.00",
            "brandCommissionAmount": "100.00",
            "influencerCommissionRate": "5.00",
            "influencerCommissionAmount": "50.00",
            "otherCostsRate": "1.00",
            "mimedaCommissionRate": "2.00",
            "mimedaCommissionAmount": "20.00",
            "agencyCommissionRate": "3.00",
            "agencyCommissionAmount": "30.00"
        });
        let report: ReportCreate = serde_json::from_value(body).unwrap();

        assert_eq!(report.influencer_id, Some(7));
        assert_eq!(report.campaign_id, 3);
        assert_eq!(report.total_clicks, 120);
        assert_eq!(report.brand_commission_amount, Decimal::new(10000, 2));
    }

    #[test]
    fn test_report_list_response_summary_fields() {
        let response = ReportListResponse::ok(Vec::new(), 2, Decimal::new(15050, 2));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], true);
        assert_eq!(json["type"], 0);
        assert_eq!(json["activeInfluencers"], 2);
        assert_eq!(json["totalInfluencerCommission"], "150.50");
    }

    #[test]
    fn test_report_list_failure() {
        let response = ReportListResponse::failure("Invalid StartDate");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["isSuccess"], false);
        assert_eq!(json["type"], 1);
        assert_eq!(json["data"], serde_json::json!([]));
        assert!(json["activeInfluencers"].is_null());
    }
}
