// affiliate-backend/src/api/mod.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::repository::activity_log_repository::ActivityLogRepository;
use crate::repository::campaign_repository::CampaignRepository;
use crate::repository::company_repository::CompanyRepository;
use crate::repository::influencer_repository::InfluencerRepository;
use crate::repository::link_clicks_daily_repository::LinkClicksDailyRepository;
use crate::repository::report_repository::ReportRepository;
use crate::repository::tracking_link_repository::TrackingLinkRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::auth_service::AuthService;
use crate::service::campaign_service::CampaignService;
use crate::service::company_service::CompanyService;
use crate::service::dashboard_service::DashboardService;
use crate::service::import_service::ImportService;
use crate::service::influencer_service::InfluencerService;
use crate::service::link_service::LinkService;
use crate::service::mlink_client::MlinkClient;
use crate::service::report_service::ReportService;
use crate::utils::jwt::JwtManager;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService>,
    pub report_service: Arc<ReportService>,
    pub import_service: Arc<ImportService>,
    pub campaign_service: Arc<CampaignService>,
    pub company_service: Arc<CompanyService>,
    pub influencer_service: Arc<InfluencerService>,
    pub dashboard_service: Arc<DashboardService>,
    pub influencer_repo: Arc<InfluencerRepository>,
    pub mlink_client: Arc<MlinkClient>,
    pub jwt_manager: Arc<JwtManager>,
    pub db: DbPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, config: Arc<AppConfig>) -> AppResult<Self> {
        let jwt_manager = Arc::new(JwtManager::new(&config.jwt_secret));

        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let company_repo = Arc::new(CompanyRepository::new(db.clone()));
        let influencer_repo = Arc::new(InfluencerRepository::new(db.clone()));
        let campaign_repo = Arc::new(CampaignRepository::new(db.clone()));
        let link_repo = Arc::new(TrackingLinkRepository::new(db.clone()));
        let daily_repo = Arc::new(LinkClicksDailyRepository::new(db.clone()));
        let report_repo = Arc::new(ReportRepository::new(db.clone()));
        let activity_log_repo = Arc::new(ActivityLogRepository::new(db.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            company_repo.clone(),
            influencer_repo.clone(),
            jwt_manager.clone(),
            config.smtp.clone(),
            config.frontend_url.clone(),
        ));
        let link_service = Arc::new(LinkService::new(
            db.clone(),
            campaign_repo.clone(),
            link_repo.clone(),
            daily_repo.clone(),
            activity_log_repo.clone(),
            user_repo.clone(),
            influencer_repo.clone(),
            jwt_manager.clone(),
            config.frontend_url.clone(),
        ));
        let report_service = Arc::new(ReportService::new(
            db.clone(),
            report_repo.clone(),
            campaign_repo.clone(),
            influencer_repo.clone(),
            activity_log_repo.clone(),
            user_repo.clone(),
        ));
        let import_service = Arc::new(ImportService::new(
            db.clone(),
            campaign_repo.clone(),
            user_repo.clone(),
        ));
        let campaign_service = Arc::new(CampaignService::new(
            db.clone(),
            campaign_repo.clone(),
            activity_log_repo.clone(),
            user_repo.clone(),
        ));
        let company_service = Arc::new(CompanyService::new(
            db.clone(),
            company_repo.clone(),
            user_repo.clone(),
        ));
        let influencer_service = Arc::new(InfluencerService::new(
            db.clone(),
            influencer_repo.clone(),
            user_repo.clone(),
            campaign_repo.clone(),
            jwt_manager.clone(),
            config.smtp.clone(),
            config.frontend_url.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            report_repo.clone(),
            campaign_repo.clone(),
            activity_log_repo.clone(),
            user_repo.clone(),
        ));
        let mlink_client = Arc::new(MlinkClient::new(config.mlink.clone())?);

        Ok(Self {
            auth_service,
            link_service,
            report_service,
            import_service,
            campaign_service,
            company_service,
            influencer_service,
            dashboard_service,
            influencer_repo,
            mlink_client,
            jwt_manager,
            db,
            config,
        })
    }
}
