use sea_orm_migration::prelude::*;

use crate::m20250705_000007_create_tracking_links_table::TrackingLinks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // link_clicks_dailyテーブル作成（クリックイベントの日次ロールアップ）
        manager
            .create_table(
                Table::create()
                    .table(LinkClicksDaily::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LinkClicksDaily::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LinkClicksDaily::LinkId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LinkClicksDaily::Date).date().not_null())
                    .col(
                        ColumnDef::new(LinkClicksDaily::Clicks)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LinkClicksDaily::UniqueClicks)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_link_clicks_daily_link_id")
                            .from(LinkClicksDaily::Table, LinkClicksDaily::LinkId)
                            .to(TrackingLinks::Table, TrackingLinks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // (link, date) 一意。アトミックな insert-or-increment の衝突先
        manager
            .create_index(
                Index::create()
                    .name("uq_link_clicks_daily_link_date")
                    .table(LinkClicksDaily::Table)
                    .col(LinkClicksDaily::LinkId)
                    .col(LinkClicksDaily::Date)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LinkClicksDaily::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LinkClicksDaily {
    Table,
    Id,
    LinkId,
    Date,
    Clicks,
    UniqueClicks,
}
