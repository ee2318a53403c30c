use sea_orm_migration::prelude::*;

use crate::m20250705_000001_create_companies_table::Companies;
use crate::m20250705_000003_create_influencers_table::Influencers;
use crate::m20250705_000004_create_campaigns_table::Campaigns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // reportsテーブル作成（コミッション分配の履歴レコード、作成後は不変）
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::InfluencerId).integer().null())
                    .col(ColumnDef::new(Reports::CampaignId).integer().null())
                    .col(ColumnDef::new(Reports::CompanyId).integer().null())
                    .col(
                        ColumnDef::new(Reports::TotalClicks)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reports::TotalSales)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reports::BrandCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::BrandCommissionAmount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::InfluencerCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::InfluencerCommissionAmount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::OtherCostsRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::MimedaCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::MimedaCommissionAmount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::AgencyCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::AgencyCommissionAmount)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::MlinkId)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Reports::Source)
                            .string_len(16)
                            .not_null()
                            .default("mlink"),
                    )
                    .col(ColumnDef::new(Reports::SourcePayloadJson).json().null())
                    .col(
                        ColumnDef::new(Reports::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_influencer_id")
                            .from(Reports::Table, Reports::InfluencerId)
                            .to(Influencers::Table, Influencers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_campaign_id")
                            .from(Reports::Table, Reports::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_company_id")
                            .from(Reports::Table, Reports::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_company_id")
                    .table(Reports::Table)
                    .col(Reports::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_influencer_id")
                    .table(Reports::Table)
                    .col(Reports::InfluencerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reports_created_at")
                    .table(Reports::Table)
                    .col(Reports::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reports {
    Table,
    Id,
    InfluencerId,
    CampaignId,
    CompanyId,
    TotalClicks,
    TotalSales,
    BrandCommissionRate,
    BrandCommissionAmount,
    InfluencerCommissionRate,
    InfluencerCommissionAmount,
    OtherCostsRate,
    MimedaCommissionRate,
    MimedaCommissionAmount,
    AgencyCommissionRate,
    AgencyCommissionAmount,
    MlinkId,
    Source,
    SourcePayloadJson,
    LastSyncedAt,
    CreatedAt,
}
