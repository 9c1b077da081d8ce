use crate::{
    data::reiatsu_player::ReiatsuPlayerRepository,
    error::AppError,
    model::reiatsu_player::{ActiveSkill, DecoySkill, PlayerClass},
};
use chrono::Utc;
use sea_orm::EntityTrait;
use test_utils::{
    builder::TestBuilder,
    factory::{helpers::decoy_payload, reiatsu_player::ReiatsuPlayerFactory},
};

mod activate_skill;
mod add_balance;
mod apply_capture;
mod get_by_user_id;
mod get_decoys;
mod get_or_create;
mod set_balance;
mod withdraw_posted_decoys;
