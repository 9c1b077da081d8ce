use super::*;

/// Tests overwriting balance and class.
#[tokio::test]
async fn overwrites_balance_and_class() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(10)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    assert!(repo.set_balance(1, 500, Utc::now()).await?);
    assert!(repo.set_class(1, PlayerClass::Gambler, Utc::now()).await?);

    let player = repo.get_by_user_id(1).await?.unwrap();
    assert_eq!(player.balance, 500);
    assert_eq!(player.class, PlayerClass::Gambler);

    Ok(())
}

/// Tests storing a balance above the storable range.
///
/// Expected: Err(AppError::InternalErr), stored balance unchanged
#[tokio::test]
async fn rejects_balance_above_storable_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(10)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let result = repo.set_balance(1, u64::MAX, Utc::now()).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));
    assert_eq!(repo.get_by_user_id(1).await?.unwrap().balance, 10);

    Ok(())
}
