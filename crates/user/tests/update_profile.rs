use larder_user::{Command, Query, UpdateProfileInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update_profile() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());
    let query = Query(state.read_db.clone());

    let id = helpers::register(&command, "ana").await?;

    command
        .update_profile(UpdateProfileInput {
            id: id.to_owned(),
            name: "ana maria".to_owned(),
            email: "ana.maria@larder.localhost".to_owned(),
        })
        .await?;

    let loaded = command.load(&id).await?.unwrap();
    assert_eq!(loaded.name, "ana maria");
    assert_eq!(loaded.email, "ana.maria@larder.localhost");

    let found = query.find(&id).await?.unwrap();
    assert_eq!(found.email, "ana.maria@larder.localhost");

    Ok(())
}

#[tokio::test]
async fn test_update_profile_email_conflict() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    helpers::register(&command, "ana").await?;
    let other = helpers::register(&command, "bruno").await?;

    let result = command
        .update_profile(UpdateProfileInput {
            id: other,
            name: "bruno".to_owned(),
            email: "ana@larder.localhost".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(larder_shared::Error::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn test_delete_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());
    let query = Query(state.read_db.clone());

    let ana = helpers::register(&command, "ana").await?;
    let bruno = helpers::register(&command, "bruno").await?;

    command.delete(ana.to_owned()).await?;

    assert!(command.load(&ana).await?.is_none());
    assert!(query.find(&ana).await?.is_none());

    let remaining = query.list().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bruno);

    Ok(())
}
