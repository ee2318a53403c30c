// affiliate-backend/src/main.rs
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use affiliate_backend::api::handlers::{
    admin_handler::admin_router, auth_handler::auth_router, campaign_handler::campaign_router,
    dashboard_handler::dashboard_router, link_handler::link_router, mlink_handler::mlink_router,
    report_handler::report_router,
};
use affiliate_backend::api::AppState;
use affiliate_backend::config::AppConfig;
use affiliate_backend::db::create_db_pool;
use affiliate_backend::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "affiliate_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting affiliate backend server...");

    // 設定を読み込む
    let app_config = Arc::new(AppConfig::from_env().expect("Failed to load configuration"));
    tracing::info!(environment = %app_config.environment, "Configuration loaded");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    // アプリケーション状態の構築
    let app_state = AppState::new(db_pool, app_config.clone()).expect("Failed to build app state");

    // ルーターの設定
    let app_router = Router::new()
        .merge(auth_router(app_state.clone()))
        .merge(link_router(app_state.clone()))
        .merge(report_router(app_state.clone()))
        .merge(campaign_router(app_state.clone()))
        .merge(admin_router(app_state.clone()))
        .merge(dashboard_router(app_state.clone()))
        .merge(mlink_router(app_state.clone()))
        .layer(from_fn_with_state(app_state.clone(), auth_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // サーバーの起動
    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
