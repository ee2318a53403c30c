// tests/link_flow_tests.rs

//! リンク発行の冪等性とクリック集計のシナリオテスト
//!
//! ストアはSeaORMのモックで代替し、発行されたステートメントから
//! 書き込みの回数と対象を検証する

mod common;

use std::sync::Arc;

use affiliate_backend::api::dto::link_dto::GenerateLinkRequest;
use affiliate_backend::domain::user_model::UserRole;
use affiliate_backend::domain::{campaign_model, tracking_link_model};
use affiliate_backend::middleware::auth::AuthenticatedUser;
use affiliate_backend::repository::activity_log_repository::ActivityLogRepository;
use affiliate_backend::repository::campaign_repository::CampaignRepository;
use affiliate_backend::repository::influencer_repository::InfluencerRepository;
use affiliate_backend::repository::link_clicks_daily_repository::LinkClicksDailyRepository;
use affiliate_backend::repository::tracking_link_repository::TrackingLinkRepository;
use affiliate_backend::repository::user_repository::UserRepository;
use affiliate_backend::service::link_service::LinkService;
use affiliate_backend::utils::jwt::{AccessTokenClaims, JwtManager};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

fn link_service(db: DatabaseConnection) -> LinkService {
    LinkService::new(
        db.clone(),
        Arc::new(CampaignRepository::new(db.clone())),
        Arc::new(TrackingLinkRepository::new(db.clone())),
        Arc::new(LinkClicksDailyRepository::new(db.clone())),
        Arc::new(ActivityLogRepository::new(db.clone())),
        Arc::new(UserRepository::new(db.clone())),
        Arc::new(InfluencerRepository::new(db)),
        Arc::new(JwtManager::new("link-flow-test-secret")),
        "http://localhost:5173".to_string(),
    )
}

fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new(
        1,
        UserRole::Admin,
        AccessTokenClaims {
            sub: "1".to_string(),
            role: "admin".to_string(),
            purpose: None,
            iat: 0,
            exp: i64::MAX,
            jti: "test".to_string(),
        },
    )
}

fn campaign() -> campaign_model::Model {
    campaign_model::Model {
        id: 3,
        company_id: Some(5),
        name: "Summer Fashion 2024".to_string(),
        brief: None,
        brand_commission_rate: None,
        influencer_commission_rate: None,
        other_costs_rate: None,
        start_date: Utc::now(),
        end_date: None,
        branding_image: None,
        mlink_id: None,
        source: "mlink".to_string(),
        source_payload_json: None,
        last_synced_at: None,
        created_at: Utc::now(),
    }
}

fn link(token: &str) -> tracking_link_model::Model {
    tracking_link_model::Model {
        id: 10,
        influencer_id: Some(7),
        campaign_id: Some(3),
        company_id: Some(5),
        influencer_name: Some("jane_doe".to_string()),
        token: token.to_string(),
        generated_url: format!("http://localhost:5173/track?token={}", token),
        landing_url: Some("https://ibb.co/tTRQrDfj".to_string()),
        status: "active".to_string(),
        source: "local".to_string(),
        mlink_id: None,
        mlink_url: None,
        click_count: 0,
        created_at: Utc::now(),
    }
}

fn request() -> GenerateLinkRequest {
    serde_json::from_value(serde_json::json!({
        "influencerID": "7",
        "influencerName": "jane_doe",
        "campaignID": 3
    }))
    .unwrap()
}

/// 同一引数での2回目の発行は同じURLを返し、アクティビティログも
/// リンクも追加で書かれない
#[tokio::test]
async fn test_generate_link_twice_is_idempotent() {
    common::init_test_env();

    let issued = link("issued-token");
    let activity = affiliate_backend::domain::activity_log_model::Model {
        id: 1,
        company_id: 5,
        activity_type: "Link generated".to_string(),
        label: "jane_doe".to_string(),
        timestamp: Utc::now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // 1回目: キャンペーン、既存なし、INSERT、アクティビティログ
        .append_query_results([vec![campaign()]])
        .append_query_results([Vec::<tracking_link_model::Model>::new()])
        .append_query_results([vec![issued.clone()]])
        .append_query_results([vec![activity]])
        // 2回目: キャンペーン、既存リンクにヒット
        .append_query_results([vec![campaign()]])
        .append_query_results([vec![issued]])
        .into_connection();

    let service = link_service(db.clone());

    let first = service.generate_link(&admin(), request()).await.unwrap();
    let second = service.generate_link(&admin(), request()).await.unwrap();

    assert!(first.is_success);
    assert!(second.is_success);
    assert_eq!(
        first.data.unwrap().url,
        second.data.unwrap().url,
        "issuing twice must return the same URL"
    );
    assert_eq!(
        second.message.as_deref(),
        Some("Tracking link already exists.")
    );

    let statements = format!("{:?}", db.into_transaction_log());
    // リンクとログのINSERTは1回目の1度きり
    assert_eq!(statements.matches("INSERT").count(), 2);
    assert_eq!(statements.matches("activity_log").count(), 1);
}

/// 同日に3回クリックすると、集約カウンタの更新と日次ロールアップの
/// upsert がそれぞれ3回ずつ発行される
#[tokio::test]
async fn test_three_clicks_update_both_counters_three_times() {
    common::init_test_env();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![link("t")]])
        .append_query_results([vec![link("t")]])
        .append_query_results([vec![link("t")]])
        .append_exec_results([
            MockExecResult { last_insert_id: 0, rows_affected: 1 },
            MockExecResult { last_insert_id: 1, rows_affected: 1 },
            MockExecResult { last_insert_id: 0, rows_affected: 1 },
            MockExecResult { last_insert_id: 1, rows_affected: 1 },
            MockExecResult { last_insert_id: 0, rows_affected: 1 },
            MockExecResult { last_insert_id: 1, rows_affected: 1 },
        ])
        .into_connection();

    let service = link_service(db.clone());

    for _ in 0..3 {
        let envelope = service.track_click("t").await.unwrap();
        assert!(envelope.is_success);
    }

    let statements = format!("{:?}", db.into_transaction_log());
    // 日次ロールアップへの insert-or-increment が3回
    assert_eq!(statements.matches("link_clicks_daily").count(), 3);
    assert_eq!(statements.matches("ON CONFLICT").count(), 3);
}
