use crate::{
    data::reiatsu_config::ReiatsuConfigRepository, error::AppError,
    model::reiatsu_config::UpsertReiatsuChannelParam,
};
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory::reiatsu_config::ReiatsuConfigFactory};

mod get_configured;
mod mark_real_spawned;
mod resolve_real;
mod set_pending_flags;
mod unset_channel;
mod update_spawn_speed;
mod upsert_channel;
