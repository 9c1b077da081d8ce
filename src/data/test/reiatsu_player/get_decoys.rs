use super::*;

/// Tests listing decoy payloads.
///
/// Expected: decoys returned with their holder, unknown payload kinds skipped
#[tokio::test]
async fn skips_unknown_kinds() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .active_skill(decoy_payload(1, 100, Some(555)))
        .build()
        .await?;
    ReiatsuPlayerFactory::new(db)
        .user_id(2)
        .active_skill(r#"{"kind":"guaranteed_steal"}"#)
        .build()
        .await?;
    ReiatsuPlayerFactory::new(db).user_id(3).build().await?;

    let repo = ReiatsuPlayerRepository::new(db);
    let decoys = repo.get_decoys().await?;

    assert_eq!(decoys.len(), 1);
    let (holder, decoy) = &decoys[0];
    assert_eq!(*holder, 1);
    assert_eq!(decoy.guild_id, 100);
    assert_eq!(decoy.spawn_ref, Some(555));

    let unknown = entity::prelude::ReiatsuPlayer::find_by_id(2i64)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(unknown.active_skill.as_deref(), Some(r#"{"kind":"guaranteed_steal"}"#));

    Ok(())
}
