use larder_recipe::{Command, CreateInput};
use larder_shared::recipe::Category;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());

    let flour = helpers::register_ingredient(&state, "Flour").await?;

    let id = helpers::create_recipe(&command, "Bread", helpers::lines(&[(&flour, 500.0)])).await?;

    let loaded = command.load(&id).await?.unwrap();
    assert_eq!(loaded.author_id, "author-1");
    assert!(!loaded.basic_information_hash.is_empty());
    assert!(!loaded.ingredients_hash.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_create_with_unknown_ingredient_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    let result = command
        .create(
            CreateInput {
                name: "Bread".to_owned(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients: helpers::lines(&[("missing-ingredient", 1.0)]),
            },
            "author-1",
        )
        .await;

    assert!(matches!(result, Err(larder_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_non_positive_quantity() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());

    let flour = helpers::register_ingredient(&state, "Flour").await?;

    let result = command
        .create(
            CreateInput {
                name: "Bread".to_owned(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients: helpers::lines(&[(&flour, 0.0)]),
            },
            "author-1",
        )
        .await;

    assert!(matches!(result, Err(larder_shared::Error::Validate(_))));

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_empty_line_set() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state);

    let result = command
        .create(
            CreateInput {
                name: "Bread".to_owned(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients: vec![],
            },
            "author-1",
        )
        .await;

    assert!(matches!(result, Err(larder_shared::Error::Validate(_))));

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_duplicate_lines() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let command = Command::new(state.clone());

    let flour = helpers::register_ingredient(&state, "Flour").await?;

    let result = command
        .create(
            CreateInput {
                name: "Bread".to_owned(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients: helpers::lines(&[(&flour, 1.0), (&flour, 2.0)]),
            },
            "author-1",
        )
        .await;

    assert!(matches!(result, Err(larder_shared::Error::Conflict(_))));

    Ok(())
}
