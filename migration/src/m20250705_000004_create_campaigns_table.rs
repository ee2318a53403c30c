use sea_orm_migration::prelude::*;

use crate::m20250705_000001_create_companies_table::Companies;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // campaignsテーブル作成
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::CompanyId).integer().null())
                    .col(ColumnDef::new(Campaigns::Name).string().not_null())
                    .col(ColumnDef::new(Campaigns::Brief).text().null())
                    .col(
                        ColumnDef::new(Campaigns::BrandCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::InfluencerCommissionRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::OtherCostsRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::StartDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Campaigns::EndDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Campaigns::BrandingImage).text().null())
                    // 外部連携（MLink）の出所情報
                    .col(
                        ColumnDef::new(Campaigns::MlinkId)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::Source)
                            .string_len(16)
                            .not_null()
                            .default("mlink"),
                    )
                    .col(ColumnDef::new(Campaigns::SourcePayloadJson).json().null())
                    .col(
                        ColumnDef::new(Campaigns::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaigns_company_id")
                            .from(Campaigns::Table, Campaigns::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_campaigns_company_id")
                    .table(Campaigns::Table)
                    .col(Campaigns::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Campaigns {
    Table,
    Id,
    CompanyId,
    Name,
    Brief,
    BrandCommissionRate,
    InfluencerCommissionRate,
    OtherCostsRate,
    StartDate,
    EndDate,
    BrandingImage,
    MlinkId,
    Source,
    SourcePayloadJson,
    LastSyncedAt,
    CreatedAt,
}
