use larder_ingredient::{Command, UpdateInput};
use larder_shared::ingredient::Unit;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update_name_and_unit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    let id = helpers::register(&command, "Flour", Unit::G).await?;

    command
        .update(UpdateInput {
            id: id.to_owned(),
            name: "Whole wheat flour".to_owned(),
            unit: Unit::Kg,
        })
        .await?;

    let loaded = command.load(&id).await?.unwrap();
    assert_eq!(loaded.name, "Whole wheat flour");
    assert_eq!(loaded.unit, Unit::Kg);

    Ok(())
}

#[tokio::test]
async fn test_update_rename_to_taken_name_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    helpers::register(&command, "Flour", Unit::G).await?;
    let id = helpers::register(&command, "Sugar", Unit::G).await?;

    let result = command
        .update(UpdateInput {
            id,
            name: "FLOUR".to_owned(),
            unit: Unit::G,
        })
        .await;

    assert!(matches!(result, Err(larder_shared::Error::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn test_update_same_values_is_a_noop() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    let id = helpers::register(&command, "Flour", Unit::G).await?;

    command
        .update(UpdateInput {
            id: id.to_owned(),
            name: "Flour".to_owned(),
            unit: Unit::G,
        })
        .await?;

    let loaded = command.load(&id).await?.unwrap();
    assert_eq!(loaded.name, "Flour");

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_ingredient() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    let result = command
        .update(UpdateInput {
            id: "does-not-exist".to_owned(),
            name: "Flour".to_owned(),
            unit: Unit::G,
        })
        .await;

    assert!(matches!(result, Err(larder_shared::Error::NotFound(_))));

    Ok(())
}
