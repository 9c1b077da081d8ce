use super::*;

/// Tests lazy creation of a player.
///
/// Expected: default state on first call, same row on the second
#[tokio::test]
async fn inserts_defaults_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReiatsuPlayerRepository::new(db);
    assert!(repo.get_by_user_id(42).await?.is_none());

    let created = repo.get_or_create(42, Utc::now()).await?;
    assert_eq!(created.balance, 0);
    assert_eq!(created.class, PlayerClass::Worker);
    assert_eq!(created.streak, 0);

    repo.add_balance(42, 7, Utc::now()).await?;
    let again = repo.get_or_create(42, Utc::now()).await?;
    assert_eq!(again.balance, 7);
    assert_eq!(again.created_at, created.created_at);

    Ok(())
}
