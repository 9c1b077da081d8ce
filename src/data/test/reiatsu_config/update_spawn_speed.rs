use super::*;

/// Tests changing the cadence tier and replacing the delay.
///
/// Expected: tier and delay stored; missing community reports false
#[tokio::test]
async fn stores_tier_and_delay() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db)
        .guild_id(1)
        .last_spawn_at(Some(Utc::now() - Duration::hours(1)))
        .build()
        .await?;

    let repo = ReiatsuConfigRepository::new(db);
    let now = Utc::now();
    assert!(repo.update_spawn_speed(1, "slow", 8000, now).await?);
    assert!(repo.update_spawn_delay(1, 8100, now).await?);
    assert!(!repo.update_spawn_speed(2, "slow", 8000, now).await?);

    let config = repo.get_by_guild_id(1).await?.unwrap();
    assert_eq!(config.spawn_speed, "slow");
    assert_eq!(config.spawn_delay, 8100);

    Ok(())
}
