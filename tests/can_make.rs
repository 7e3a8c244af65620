use axum::http::StatusCode;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_can_make_ranks_recipes_by_missing_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let user = app.create_user("ana").await?;
    let flour = app.create_ingredient("Flour").await?;
    let sugar = app.create_ingredient("Sugar").await?;

    let recipe_a = app
        .create_recipe("Recipe A", &user, &[(&flour, 2.0), (&sugar, 1.0)])
        .await?;
    let recipe_b = app.create_recipe("Recipe B", &user, &[(&flour, 1.0)]).await?;

    app.add_stock(&user, &flour, 1.0, "2027-01-01").await?;
    app.add_stock(&user, &sugar, 1.0, "2027-01-01").await?;
    app.sync().await?;

    let (status, body) = app
        .request("GET", &format!("/api/recipes/can-make/{user}"), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let makeable = body["makeable"].as_array().unwrap();
    assert_eq!(makeable.len(), 1);
    assert_eq!(makeable[0]["id"], serde_json::json!(recipe_b));

    let almost = body["almost_makeable"].as_array().unwrap();
    assert_eq!(almost.len(), 1);
    assert_eq!(almost[0]["id"], serde_json::json!(recipe_a));
    assert_eq!(almost[0]["missing_count"], serde_json::json!(1));

    let missing = almost[0]["missing"].as_array().unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0]["ingredient_id"], serde_json::json!(flour));
    assert_eq!(missing[0]["required"], serde_json::json!(2.0));
    assert_eq!(missing[0]["available"], serde_json::json!(1.0));
    assert_eq!(missing[0]["needed"], serde_json::json!(1.0));

    let available = almost[0]["available"].as_array().unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0]["ingredient_id"], serde_json::json!(sugar));

    Ok(())
}

#[tokio::test]
async fn test_making_a_recipe_consumes_stock_atomically() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let user = app.create_user("ana").await?;
    let flour = app.create_ingredient("Flour").await?;
    let sugar = app.create_ingredient("Sugar").await?;

    let recipe_a = app
        .create_recipe("Recipe A", &user, &[(&flour, 2.0), (&sugar, 1.0)])
        .await?;
    let recipe_b = app.create_recipe("Recipe B", &user, &[(&flour, 1.0)]).await?;

    app.add_stock(&user, &flour, 1.0, "2027-01-01").await?;
    app.add_stock(&user, &sugar, 1.0, "2027-01-01").await?;
    app.sync().await?;

    // recipe A is short on flour: nothing may be consumed
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/recipes/{recipe_a}/make"),
            Some(serde_json::json!({ "user_id": user })),
        )
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["ingredient_id"], serde_json::json!(flour));
    assert_eq!(body["available"], serde_json::json!(1.0));
    assert_eq!(body["requested"], serde_json::json!(2.0));

    app.sync().await?;
    let (_, body) = app
        .request("GET", &format!("/api/stock/{user}"), None)
        .await?;
    assert_eq!(body["summary"]["total"], serde_json::json!(2));

    // recipe B fits and drains the flour lot to zero, which removes it
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/recipes/{recipe_b}/make"),
            Some(serde_json::json!({ "user_id": user })),
        )
        .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    app.sync().await?;
    let (_, body) = app
        .request("GET", &format!("/api/stock/{user}"), None)
        .await?;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ingredient_id"], serde_json::json!(sugar));

    Ok(())
}

#[tokio::test]
async fn test_can_make_for_unknown_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let (status, _) = app
        .request("GET", "/api/recipes/can-make/nobody", None)
        .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
