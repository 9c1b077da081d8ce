use super::*;

/// Tests that only one real marker can be recorded at a time.
///
/// Expected: first mark wins, second is refused and leaves the message ID untouched
#[tokio::test]
async fn records_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db).guild_id(1).build().await?;

    let repo = ReiatsuConfigRepository::new(db);
    let now = Utc::now();
    assert!(repo.mark_real_spawned(1, 100, now).await?);
    assert!(!repo.mark_real_spawned(1, 200, now).await?);

    let config = repo.get_by_guild_id(1).await?.unwrap();
    assert!(config.pending_real);
    assert_eq!(config.spawn_message_id, Some(100));
    assert!(config.last_spawn_at.is_some());

    Ok(())
}
