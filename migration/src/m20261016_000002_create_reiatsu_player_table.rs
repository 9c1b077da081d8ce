use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReiatsuPlayer::Table)
                    .if_not_exists()
                    .col(big_integer(ReiatsuPlayer::UserId).primary_key())
                    .col(big_integer(ReiatsuPlayer::Balance).default(0))
                    .col(string(ReiatsuPlayer::Class))
                    .col(integer(ReiatsuPlayer::Streak).default(0))
                    .col(timestamp_null(ReiatsuPlayer::LastSkillAt))
                    .col(big_integer(ReiatsuPlayer::SkillCooldownSecs).default(0))
                    .col(timestamp_null(ReiatsuPlayer::LastStealAt))
                    .col(text_null(ReiatsuPlayer::ActiveSkill))
                    .col(timestamp(ReiatsuPlayer::CreatedAt))
                    .col(timestamp(ReiatsuPlayer::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Decoy lookups scan only players holding a skill payload
        manager
            .create_index(
                Index::create()
                    .name("idx_reiatsu_player_active_skill")
                    .table(ReiatsuPlayer::Table)
                    .col(ReiatsuPlayer::ActiveSkill)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reiatsu_player_active_skill")
                    .table(ReiatsuPlayer::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ReiatsuPlayer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReiatsuPlayer {
    Table,
    UserId,
    Balance,
    Class,
    Streak,
    LastSkillAt,
    SkillCooldownSecs,
    LastStealAt,
    ActiveSkill,
    CreatedAt,
    UpdatedAt,
}
