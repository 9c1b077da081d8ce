use super::*;
use crate::{
    model::reiatsu_player::ActiveSkill,
    service::{capture::CaptureService, spawn::SpawnService},
};

/// Tests the full cycle: tier "normal", last spawn 4000s ago, then two claims.
///
/// Expected: tick emits one real marker, the first claim wins, the second is ignored
#[tokio::test]
async fn due_spawn_then_first_claim_wins() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    let community = ReiatsuConfigFactory::new(db)
        .spawn_speed("normal")
        .spawn_delay(3000)
        .last_spawn_at(Some(Utc::now() - Duration::seconds(4000)))
        .build()
        .await?;
    let guild_id = community.guild_id as u64;
    let channel_id = community.channel_id.unwrap() as u64;

    SpawnService::new(db, &channel, &config, &locks)
        .tick(Utc::now())
        .await?;

    let posted = channel.posted();
    assert_eq!(posted.len(), 1);
    let (posted_channel, message_id, kind) = posted[0];
    assert_eq!(posted_channel, channel_id);
    assert_eq!(kind, MarkerKind::Real);

    let stored = ReiatsuConfigRepository::new(db)
        .get_by_guild_id(guild_id)
        .await?
        .unwrap();
    assert!(stored.is_pending_real(message_id));

    let capture = CaptureService::new(db, &channel, &config, &locks);
    let first = capture
        .handle_claim(claim(guild_id, channel_id, message_id, 1))
        .await?;
    let second = capture
        .handle_claim(claim(guild_id, channel_id, message_id, 2))
        .await?;

    assert!(matches!(first, ClaimOutcome::Captured { user_id: 1, .. }));
    assert_eq!(second, ClaimOutcome::Ignored);

    let stored = ReiatsuConfigRepository::new(db)
        .get_by_guild_id(guild_id)
        .await?
        .unwrap();
    assert!(!stored.pending_real);
    assert!((1800..=3600).contains(&stored.spawn_delay));

    Ok(())
}

/// Tests that a pending marker blocks further real spawns.
///
/// Expected: second tick posts nothing
#[tokio::test]
async fn pending_marker_blocks_next_spawn() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    ReiatsuConfigFactory::new(db).build().await?;

    let service = SpawnService::new(db, &channel, &config, &locks);
    service.tick(Utc::now()).await?;
    service
        .tick(Utc::now() + Duration::seconds(100_000))
        .await?;

    assert_eq!(channel.posted().len(), 1);

    Ok(())
}

/// Tests communities that must not spawn.
///
/// Expected: nothing posted while the delay has not elapsed or no channel is set
#[tokio::test]
async fn skips_not_due_and_unconfigured() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    ReiatsuConfigFactory::new(db)
        .spawn_delay(1800)
        .last_spawn_at(Some(Utc::now() - Duration::seconds(100)))
        .build()
        .await?;
    ReiatsuConfigFactory::new(db).channel_id(None).build().await?;

    SpawnService::new(db, &channel, &config, &locks)
        .tick(Utc::now())
        .await?;

    assert!(channel.posted().is_empty());

    Ok(())
}

/// Tests a stored delay outside its tier bounds.
///
/// Expected: delay re-rolled into the tier and persisted
#[tokio::test]
async fn out_of_bounds_delay_is_rerolled() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    let community = ReiatsuConfigFactory::new(db)
        .spawn_speed("fast")
        .spawn_delay(5000)
        .last_spawn_at(Some(Utc::now()))
        .build()
        .await?;

    SpawnService::new(db, &channel, &config, &locks)
        .tick(Utc::now())
        .await?;

    let stored = ReiatsuConfigRepository::new(db)
        .get_by_guild_id(community.guild_id as u64)
        .await?
        .unwrap();
    assert!((600..=1200).contains(&stored.spawn_delay));
    assert!(channel.posted().is_empty());

    Ok(())
}

/// Tests that a failing channel leaves the community untouched.
///
/// Expected: nothing pending, the next tick can spawn
#[tokio::test]
async fn post_failure_leaves_state_unchanged() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    let community = ReiatsuConfigFactory::new(db).build().await?;
    let guild_id = community.guild_id as u64;

    let service = SpawnService::new(db, &channel, &config, &locks);
    channel.fail_post(true);
    service.tick(Utc::now()).await?;

    let stored = ReiatsuConfigRepository::new(db)
        .get_by_guild_id(guild_id)
        .await?
        .unwrap();
    assert!(!stored.pending_real);
    assert_eq!(stored.last_spawn_at, None);

    channel.fail_post(false);
    service.tick(Utc::now()).await?;
    assert_eq!(channel.posted().len(), 1);

    Ok(())
}

/// Tests posting an activated decoy.
///
/// Expected: one decoy marker, its reference stored in the payload, pending decoy set,
/// not posted again on the next tick
#[tokio::test]
async fn posts_activated_decoy_once() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    let community = ReiatsuConfigFactory::new(db)
        .last_spawn_at(Some(Utc::now()))
        .build()
        .await?;
    let guild_id = community.guild_id as u64;
    let other = ReiatsuConfigFactory::new(db)
        .last_spawn_at(Some(Utc::now()))
        .build()
        .await?;

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .class("illusionist")
        .active_skill(decoy_payload(1, guild_id, None))
        .build()
        .await?;

    let service = SpawnService::new(db, &channel, &config, &locks);
    service.tick(Utc::now()).await?;
    service.tick(Utc::now()).await?;

    let posted = channel.posted();
    assert_eq!(posted.len(), 1);
    let (posted_channel, message_id, kind) = posted[0];
    assert_eq!(kind, MarkerKind::Decoy);
    assert_eq!(posted_channel, community.channel_id.unwrap() as u64);

    let owner = ReiatsuPlayerRepository::new(db)
        .get_by_user_id(1)
        .await?
        .unwrap();
    let decoy = owner
        .active_skill
        .as_ref()
        .and_then(ActiveSkill::as_decoy)
        .unwrap();
    assert_eq!(decoy.spawn_ref, Some(message_id));

    let config_repo = ReiatsuConfigRepository::new(db);
    assert!(config_repo.get_by_guild_id(guild_id).await?.unwrap().pending_decoy);
    assert!(
        !config_repo
            .get_by_guild_id(other.guild_id as u64)
            .await?
            .unwrap()
            .pending_decoy
    );

    Ok(())
}

/// Tests the forced spawn admin operation.
///
/// Expected: posts immediately, then refuses while pending; unknown community NotFound
#[tokio::test]
async fn force_spawn_ignores_cadence() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let channel = MockChannel::new();
    let config = game_config();
    let locks = GuildLocks::new();

    let community = ReiatsuConfigFactory::new(db)
        .last_spawn_at(Some(Utc::now()))
        .build()
        .await?;
    let guild_id = community.guild_id as u64;

    let service = SpawnService::new(db, &channel, &config, &locks);
    let message_id = service.force_spawn(guild_id).await?;

    let stored = ReiatsuConfigRepository::new(db)
        .get_by_guild_id(guild_id)
        .await?
        .unwrap();
    assert!(stored.is_pending_real(message_id));

    assert!(matches!(
        service.force_spawn(guild_id).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        service.force_spawn(guild_id + 1_000_000).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(channel.posted().len(), 1);

    Ok(())
}
