use super::*;

/// Tests activating, updating and clearing a skill payload.
///
/// Expected: activation refused while any payload is held; clear succeeds once
#[tokio::test]
async fn payload_lifecycle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_reiatsu_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    ReiatsuPlayerFactory::new(db)
        .user_id(1)
        .class("illusionist")
        .build()
        .await?;

    let now = Utc::now();
    let mut decoy = DecoySkill {
        owner_id: 1,
        guild_id: 100,
        spawn_ref: None,
        created_at: now,
    };

    let repo = ReiatsuPlayerRepository::new(db);
    assert!(
        repo.activate_skill(1, &ActiveSkill::Decoy(decoy.clone()), 28800, now)
            .await?
    );
    assert!(
        !repo
            .activate_skill(1, &ActiveSkill::Decoy(decoy.clone()), 28800, now)
            .await?
    );

    decoy.spawn_ref = Some(777);
    assert!(
        repo.update_active_skill(1, &ActiveSkill::Decoy(decoy.clone()), now)
            .await?
    );

    let player = repo.get_by_user_id(1).await?.unwrap();
    assert_eq!(player.active_skill, Some(ActiveSkill::Decoy(decoy)));
    assert!(player.last_skill_at.is_some());
    assert_eq!(player.skill_cooldown_secs, 28800);

    assert!(repo.clear_active_skill(1, now).await?);
    assert!(!repo.clear_active_skill(1, now).await?);
    let player = repo.get_by_user_id(1).await?.unwrap();
    assert!(!player.has_skill_payload);

    Ok(())
}
