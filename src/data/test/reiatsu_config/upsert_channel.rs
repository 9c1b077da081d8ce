use super::*;

/// Tests configuring a community for the first time.
///
/// Expected: Ok with a fresh config whose cadence starts now and nothing pending
#[tokio::test]
async fn creates_config() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();

    let repo = ReiatsuConfigRepository::new(db);
    let config = repo
        .upsert_channel(
            UpsertReiatsuChannelParam {
                guild_id: 1,
                channel_id: 10,
                spawn_speed: "fast".to_string(),
                spawn_delay: 900,
            },
            now,
        )
        .await?;

    assert_eq!(config.guild_id, 1);
    assert_eq!(config.channel_id, Some(10));
    assert_eq!(config.spawn_speed, "fast");
    assert_eq!(config.spawn_delay, 900);
    assert!(!config.pending_real);
    assert!(!config.pending_decoy);
    assert!(config.last_spawn_at.is_some());

    Ok(())
}

/// Tests reconfiguring a community with a pending marker.
///
/// Expected: pending state cleared, created_at preserved
#[tokio::test]
async fn resets_pending_state() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = ReiatsuConfigFactory::new(db)
        .guild_id(1)
        .pending_real(Some(55))
        .pending_decoy(true)
        .build()
        .await?;

    let repo = ReiatsuConfigRepository::new(db);
    let config = repo
        .upsert_channel(
            UpsertReiatsuChannelParam {
                guild_id: 1,
                channel_id: 20,
                spawn_speed: "normal".to_string(),
                spawn_delay: 2000,
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(config.channel_id, Some(20));
    assert!(!config.pending_real);
    assert_eq!(config.spawn_message_id, None);
    assert!(!config.pending_decoy);
    assert_eq!(config.created_at, existing.created_at);

    let count = entity::prelude::ReiatsuConfig::find().all(db).await?.len();
    assert_eq!(count, 1);

    Ok(())
}
