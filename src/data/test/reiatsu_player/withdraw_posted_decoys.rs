use super::*;

/// Tests withdrawing the posted decoys of one community.
///
/// Expected: posted decoys of the community lose their marker reference and keep their
/// owner; unposted decoys and other communities are untouched
#[tokio::test]
async fn unposts_only_the_community() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .active_skill(decoy_payload(1, 100, Some(600)))
        .build()
        .await?;
    ReiatsuPlayerFactory::new(db)
        .user_id(2)
        .active_skill(decoy_payload(2, 100, None))
        .build()
        .await?;
    ReiatsuPlayerFactory::new(db)
        .user_id(3)
        .active_skill(decoy_payload(3, 200, Some(700)))
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let withdrawn = repo.withdraw_posted_decoys(100, Utc::now()).await?;
    assert_eq!(withdrawn, vec![600]);

    let decoys = repo.get_decoys().await?;
    let refs: Vec<(u64, Option<u64>)> = decoys
        .iter()
        .map(|(holder, decoy)| (*holder, decoy.spawn_ref))
        .collect();
    assert_eq!(refs, vec![(1, None), (2, None), (3, Some(700))]);
    assert_eq!(decoys[0].1.owner_id, 1);

    assert!(repo.withdraw_posted_decoys(100, Utc::now()).await?.is_empty());

    Ok(())
}
