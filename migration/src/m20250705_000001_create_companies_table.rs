use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // companiesテーブル作成
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Companies::Adres).text().null())
                    .col(ColumnDef::new(Companies::Telefon).string_len(20).null())
                    .col(ColumnDef::new(Companies::Gsm).string_len(20).null())
                    .col(ColumnDef::new(Companies::Faks).string_len(20).null())
                    .col(
                        ColumnDef::new(Companies::VergiDairesi)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Companies::VergiNumarasi)
                            .string_len(20)
                            .null(),
                    )
                    .col(ColumnDef::new(Companies::Email).string_len(255).null())
                    .col(
                        ColumnDef::new(Companies::AktiflikDurumu)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Companies::YetkiliAdi).string_len(100).null())
                    .col(
                        ColumnDef::new(Companies::YetkiliSoyadi)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(Companies::YetkiliGsm).string_len(20).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Companies {
    Table,
    Id,
    Name,
    CreatedAt,
    Adres,
    Telefon,
    Gsm,
    Faks,
    VergiDairesi,
    VergiNumarasi,
    Email,
    AktiflikDurumu,
    YetkiliAdi,
    YetkiliSoyadi,
    YetkiliGsm,
}
