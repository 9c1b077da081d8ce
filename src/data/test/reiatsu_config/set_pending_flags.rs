use super::*;

/// Tests flipping the pending decoy flag and clearing the pending real marker.
///
/// Expected: each change reports true only for the call that made it
#[tokio::test]
async fn flags_change_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db)
        .guild_id(1)
        .pending_real(Some(5))
        .build()
        .await?;

    let repo = ReiatsuConfigRepository::new(db);
    let now = Utc::now();
    assert!(repo.set_pending_decoy(1, true, now).await?);
    assert!(!repo.set_pending_decoy(1, true, now).await?);
    assert!(repo.clear_pending_real(1, now).await?);
    assert!(!repo.clear_pending_real(1, now).await?);

    let config = repo.get_by_guild_id(1).await?.unwrap();
    assert!(config.pending_decoy);
    assert!(!config.pending_real);
    assert_eq!(config.spawn_message_id, None);

    Ok(())
}
