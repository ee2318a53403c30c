// tests/envelope_contract_tests.rs

//! レガシー互換のワイヤフォーマット検証
//!
//! フロントエンドと外部連携が依存しているフィールド名を固定する

mod common;

use affiliate_backend::api::dto::common::ApiEnvelope;
use affiliate_backend::api::dto::report_dto::{ReportOut, ReportQuery};
use affiliate_backend::domain::report_model;
use chrono::Utc;

fn report() -> report_model::Model {
    report_model::Model {
        id: 1,
        influencer_id: Some(7),
        campaign_id: Some(3),
        company_id: Some(5),
        total_clicks: 120,
        total_sales: 4,
        brand_commission_rate: Some("10.00".parse().unwrap()),
        brand_commission_amount: Some("100.00".parse().unwrap()),
        influencer_commission_rate: Some("5.00".parse().unwrap()),
        influencer_commission_amount: Some("50.00".parse().unwrap()),
        other_costs_rate: Some("1.00".parse().unwrap()),
        mimeda_commission_rate: Some("2.00".parse().unwrap()),
        mimeda_commission_amount: Some("20.00".parse().unwrap()),
        agency_commission_rate: Some("3.00".parse().unwrap()),
        agency_commission_amount: Some("30.00".parse().unwrap()),
        mlink_id: None,
        source: "mlink".to_string(),
        source_payload_json: None,
        last_synced_at: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_report_out_uses_legacy_field_names() {
    common::init_test_env();

    let out = ReportOut::from_model(
        report(),
        Some("Jane Doe".to_string()),
        Some("Summer".to_string()),
    );
    let json = serde_json::to_value(&out).unwrap();

    // 歴史的経緯で influencer_id だけスネークケース
    assert!(json.get("influencer_id").is_some());
    assert!(json.get("campaignId").is_some());
    assert!(json.get("totalClicks").is_some());
    assert!(json.get("totalSales").is_some());
    assert!(json.get("createdAt").is_some());
    assert!(json.get("brandCommissionRate").is_some());
    assert!(json.get("mimedaCommissionAmount").is_some());
    assert!(json.get("agencyCommissionAmount").is_some());
    assert_eq!(json["influencerName"], "Jane Doe");
    assert_eq!(json["campaignName"], "Summer");
}

#[test]
fn test_report_round_trip_preserves_rate_amount_pairs() {
    common::init_test_env();

    let out = ReportOut::from_model(report(), None, None);
    let json = serde_json::to_string(&out).unwrap();
    let back: ReportOut = serde_json::from_str(&json).unwrap();

    assert_eq!(back.brand_commission_rate, Some("10.00".parse().unwrap()));
    assert_eq!(back.brand_commission_amount, Some("100.00".parse().unwrap()));
    assert_eq!(
        back.influencer_commission_amount,
        Some("50.00".parse().unwrap())
    );
    assert_eq!(back.mimeda_commission_rate, Some("2.00".parse().unwrap()));
    assert_eq!(back.agency_commission_amount, Some("30.00".parse().unwrap()));
}

#[test]
fn test_report_query_accepts_legacy_parameter_names() {
    common::init_test_env();

    let query: ReportQuery = serde_json::from_value(serde_json::json!({
        "InfluencerID": "ml-123",
        "StartDate": "01.01.2025",
        "EndDate": "31.12.2025",
        "company_id": 5
    }))
    .unwrap();

    assert_eq!(query.influencer_id.as_deref(), Some("ml-123"));
    assert_eq!(query.start_date.as_deref(), Some("01.01.2025"));
    assert_eq!(query.end_date.as_deref(), Some("31.12.2025"));
    assert_eq!(query.company_id, Some(5));
}

#[test]
fn test_envelope_field_names() {
    common::init_test_env();

    let envelope = ApiEnvelope::ok(42);
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["isSuccess"], true);
    assert_eq!(json["type"], 0);
    assert_eq!(json["data"], 42);
    assert!(json["message"].is_null());
}
