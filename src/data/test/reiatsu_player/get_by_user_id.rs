use super::*;

/// Tests that a negative stored balance is reported instead of wrapped.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_negative_balance() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .balance(-3)
        .build()
        .await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let result = repo.get_by_user_id(1).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
