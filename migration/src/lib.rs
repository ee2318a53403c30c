// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// マイグレーションモジュール
mod m20250705_000001_create_companies_table;
mod m20250705_000002_create_users_table;
mod m20250705_000003_create_influencers_table;
mod m20250705_000004_create_campaigns_table;
mod m20250705_000005_create_campaign_influencers_table;
mod m20250705_000006_create_products_table;
mod m20250705_000007_create_tracking_links_table;
mod m20250705_000008_create_link_clicks_daily_table;
mod m20250705_000009_create_reports_table;
mod m20250705_000010_create_activity_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250705_000001_create_companies_table::Migration),
            Box::new(m20250705_000002_create_users_table::Migration),
            Box::new(m20250705_000003_create_influencers_table::Migration),
            Box::new(m20250705_000004_create_campaigns_table::Migration),
            Box::new(m20250705_000005_create_campaign_influencers_table::Migration),
            Box::new(m20250705_000006_create_products_table::Migration),
            Box::new(m20250705_000007_create_tracking_links_table::Migration),
            Box::new(m20250705_000008_create_link_clicks_daily_table::Migration),
            Box::new(m20250705_000009_create_reports_table::Migration),
            Box::new(m20250705_000010_create_activity_log_table::Migration),
        ]
    }
}
