use super::*;

/// Tests that unsetting the channel clears marker state.
///
/// Expected: channel None, nothing pending; missing community reports false
#[tokio::test]
async fn clears_state() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db)
        .guild_id(1)
        .pending_real(Some(9))
        .pending_decoy(true)
        .build()
        .await?;

    let repo = ReiatsuConfigRepository::new(db);
    assert!(repo.unset_channel(1, Utc::now()).await?);
    assert!(!repo.unset_channel(2, Utc::now()).await?);

    let config = repo.get_by_guild_id(1).await?.unwrap();
    assert_eq!(config.channel_id, None);
    assert!(!config.pending_real);
    assert!(!config.pending_decoy);

    Ok(())
}
