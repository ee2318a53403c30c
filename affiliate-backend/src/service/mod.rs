// affiliate-backend/src/service/mod.rs
pub mod auth_service;
pub mod campaign_service;
pub mod company_service;
pub mod dashboard_service;
pub mod import_service;
pub mod influencer_service;
pub mod link_service;
pub mod mlink_client;
pub mod report_service;
