use super::*;

/// Tests resolving the pending real marker.
///
/// Expected: wrong message refused, right message resolves once and stores the next delay
#[tokio::test]
async fn resolves_matching_message_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db)
        .guild_id(1)
        .pending_real(Some(100))
        .build()
        .await?;

    let repo = ReiatsuConfigRepository::new(db);
    let now = Utc::now();
    assert!(!repo.resolve_real(1, 999, 2500, now).await?);
    assert!(repo.resolve_real(1, 100, 2500, now).await?);
    assert!(!repo.resolve_real(1, 100, 3000, now).await?);

    let config = repo.get_by_guild_id(1).await?.unwrap();
    assert!(!config.pending_real);
    assert_eq!(config.spawn_message_id, None);
    assert_eq!(config.spawn_delay, 2500);

    Ok(())
}
