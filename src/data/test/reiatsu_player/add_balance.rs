use super::*;

/// Tests crediting a balance directly.
///
/// Expected: amount added, capped at i64::MAX; missing player reports false
#[tokio::test]
async fn adds_and_saturates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(10)
        .build()
        .await?;
    ReiatsuPlayerFactory::new(db)
        .user_id(2)
        .balance(i64::MAX)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let now = Utc::now();
    assert!(repo.add_balance(1, 10, now).await?);
    assert!(repo.add_balance(2, 10, now).await?);
    assert!(!repo.add_balance(3, 10, now).await?);

    assert_eq!(repo.get_by_user_id(1).await?.unwrap().balance, 20);
    assert_eq!(repo.get_by_user_id(2).await?.unwrap().balance, i64::MAX as u64);

    Ok(())
}
