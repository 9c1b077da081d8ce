use super::*;

/// Tests crediting a capture.
///
/// Expected: gain added to the balance, streak replaced
#[tokio::test]
async fn adds_gain_and_sets_streak() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(10)
        .streak(3)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    assert!(repo.apply_capture(1, 5, 4, Utc::now()).await?);
    assert!(!repo.apply_capture(2, 5, 1, Utc::now()).await?);

    let player = repo.get_by_user_id(1).await?.unwrap();
    assert_eq!(player.balance, 15);
    assert_eq!(player.streak, 4);

    Ok(())
}

/// Tests a capture that would overflow the stored balance.
///
/// Expected: balance capped at i64::MAX and still readable
#[tokio::test]
async fn saturates_at_max_balance() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(i64::MAX - 2)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    assert!(repo.apply_capture(1, 100, 1, Utc::now()).await?);

    let player = repo.get_by_user_id(1).await?.unwrap();
    assert_eq!(player.balance, i64::MAX as u64);

    Ok(())
}

/// Tests a gain that does not fit a stored balance.
///
/// Expected: Err(AppError::InternalErr), balance untouched
#[tokio::test]
async fn rejects_gain_above_storable_range() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(50)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let result = repo.apply_capture(1, u64::MAX, 1, Utc::now()).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));
    assert_eq!(repo.get_by_user_id(1).await?.unwrap().balance, 50);

    Ok(())
}
