use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReiatsuConfig::Table)
                    .if_not_exists()
                    .col(big_integer(ReiatsuConfig::GuildId).primary_key())
                    .col(big_integer_null(ReiatsuConfig::ChannelId))
                    .col(string(ReiatsuConfig::SpawnSpeed))
                    .col(big_integer(ReiatsuConfig::SpawnDelay))
                    .col(timestamp_null(ReiatsuConfig::LastSpawnAt))
                    .col(boolean(ReiatsuConfig::PendingReal).default(false))
                    .col(big_integer_null(ReiatsuConfig::SpawnMessageId))
                    .col(boolean(ReiatsuConfig::PendingDecoy).default(false))
                    .col(timestamp(ReiatsuConfig::CreatedAt))
                    .col(timestamp(ReiatsuConfig::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReiatsuConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReiatsuConfig {
    Table,
    GuildId,
    ChannelId,
    SpawnSpeed,
    SpawnDelay,
    LastSpawnAt,
    PendingReal,
    SpawnMessageId,
    PendingDecoy,
    CreatedAt,
    UpdatedAt,
}
