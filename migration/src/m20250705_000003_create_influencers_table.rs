use sea_orm_migration::prelude::*;

use crate::m20250705_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // influencersテーブル作成
        manager
            .create_table(
                Table::create()
                    .table(Influencers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Influencers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // 外部連携用ID（MLink同期、文字列で保持）
                    .col(
                        ColumnDef::new(Influencers::MlinkId)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Influencers::UserId).integer().null())
                    .col(
                        ColumnDef::new(Influencers::DisplayName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Influencers::Username)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Influencers::Email).string_len(255).null())
                    .col(ColumnDef::new(Influencers::Phone).string_len(50).null())
                    .col(ColumnDef::new(Influencers::ProfileImage).text().null())
                    .col(
                        ColumnDef::new(Influencers::FollowerCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Influencers::EngagementRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Influencers::InstagramUrl).text().null())
                    .col(ColumnDef::new(Influencers::TiktokUrl).text().null())
                    .col(ColumnDef::new(Influencers::YoutubeUrl).text().null())
                    .col(ColumnDef::new(Influencers::SocialLinksJson).json().null())
                    .col(
                        ColumnDef::new(Influencers::SourcePayloadJson)
                            .json()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Influencers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Influencers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Influencers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_influencers_user_id")
                            .from(Influencers::Table, Influencers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_influencers_user_id")
                    .table(Influencers::Table)
                    .col(Influencers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Influencers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Influencers {
    Table,
    Id,
    MlinkId,
    UserId,
    DisplayName,
    Username,
    Email,
    Phone,
    ProfileImage,
    FollowerCount,
    EngagementRate,
    InstagramUrl,
    TiktokUrl,
    YoutubeUrl,
    SocialLinksJson,
    SourcePayloadJson,
    Active,
    CreatedAt,
    UpdatedAt,
}
