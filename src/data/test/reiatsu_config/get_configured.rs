use super::*;

/// Tests listing configured communities.
///
/// Expected: communities without a channel are excluded, order by guild ID
#[tokio::test]
async fn skips_unset_channels() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuConfigFactory::new(db).guild_id(3).build().await?;
    ReiatsuConfigFactory::new(db)
        .guild_id(2)
        .channel_id(None)
        .build()
        .await?;
    ReiatsuConfigFactory::new(db).guild_id(1).build().await?;

    let repo = ReiatsuConfigRepository::new(db);
    let configured = repo.get_configured().await?;
    let all = repo.get_all().await?;

    let ids: Vec<u64> = configured.iter().map(|c| c.guild_id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(all.len(), 3);

    Ok(())
}
