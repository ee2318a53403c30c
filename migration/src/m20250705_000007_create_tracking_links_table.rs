use sea_orm_migration::prelude::*;

use crate::m20250705_000001_create_companies_table::Companies;
use crate::m20250705_000003_create_influencers_table::Influencers;
use crate::m20250705_000004_create_campaigns_table::Campaigns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // tracking_linksテーブル作成
        manager
            .create_table(
                Table::create()
                    .table(TrackingLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackingLinks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrackingLinks::InfluencerId).integer().null())
                    .col(ColumnDef::new(TrackingLinks::CampaignId).integer().null())
                    .col(ColumnDef::new(TrackingLinks::CompanyId).integer().null())
                    .col(
                        ColumnDef::new(TrackingLinks::InfluencerName)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::Token)
                            .string_len(512)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::GeneratedUrl)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::LandingUrl)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::Source)
                            .string_len(16)
                            .not_null()
                            .default("local"),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::MlinkId)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::MlinkUrl)
                            .string_len(512)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::ClickCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TrackingLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracking_links_influencer_id")
                            .from(TrackingLinks::Table, TrackingLinks::InfluencerId)
                            .to(Influencers::Table, Influencers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracking_links_campaign_id")
                            .from(TrackingLinks::Table, TrackingLinks::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tracking_links_company_id")
                            .from(TrackingLinks::Table, TrackingLinks::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (influencer, campaign, company) の一意性はストア層が最終防衛線。
        // アプリ側の存在チェックは最適化にすぎない
        manager
            .create_index(
                Index::create()
                    .name("uq_tracking_links_influencer_campaign_company")
                    .table(TrackingLinks::Table)
                    .col(TrackingLinks::InfluencerId)
                    .col(TrackingLinks::CampaignId)
                    .col(TrackingLinks::CompanyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracking_links_token")
                    .table(TrackingLinks::Table)
                    .col(TrackingLinks::Token)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrackingLinks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TrackingLinks {
    Table,
    Id,
    InfluencerId,
    CampaignId,
    CompanyId,
    InfluencerName,
    Token,
    GeneratedUrl,
    LandingUrl,
    Status,
    Source,
    MlinkId,
    MlinkUrl,
    ClickCount,
    CreatedAt,
}
