use sea_orm_migration::prelude::*;

use crate::m20250705_000003_create_influencers_table::Influencers;
use crate::m20250705_000004_create_campaigns_table::Campaigns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // campaign_influencers中間テーブル作成（多対多）
        manager
            .create_table(
                Table::create()
                    .table(CampaignInfluencers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignInfluencers::CampaignId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CampaignInfluencers::InfluencerId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CampaignInfluencers::CampaignId)
                            .col(CampaignInfluencers::InfluencerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_influencers_campaign_id")
                            .from(CampaignInfluencers::Table, CampaignInfluencers::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_influencers_influencer_id")
                            .from(
                                CampaignInfluencers::Table,
                                CampaignInfluencers::InfluencerId,
                            )
                            .to(Influencers::Table, Influencers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignInfluencers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CampaignInfluencers {
    Table,
    CampaignId,
    InfluencerId,
}
