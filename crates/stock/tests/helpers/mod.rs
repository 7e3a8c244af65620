use std::{path::PathBuf, str::FromStr};

use evento::{
    Sqlite,
    migrator::{Migrate, Plan},
};
use larder_shared::{State, ingredient::Unit, recipe::Category};
use larder_stock::AddInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use time::Date;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State<Sqlite>> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        executor: pool.clone().into(),
        read_db: pool.clone(),
        write_db: pool,
    })
}

pub async fn register_user(state: &State<Sqlite>, name: &str) -> anyhow::Result<String> {
    let command = larder_user::Command::new(state.clone());

    Ok(command
        .register(larder_user::RegisterInput {
            name: name.to_owned(),
            email: format!("{name}@larder.localhost"),
        })
        .await?)
}

pub async fn register_ingredient(
    state: &State<Sqlite>,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let command = larder_ingredient::Command::new(state.clone());

    Ok(command
        .register(larder_ingredient::RegisterInput {
            name: name.into(),
            unit: Unit::G,
        })
        .await?)
}

#[allow(dead_code)]
pub async fn create_recipe(
    state: &State<Sqlite>,
    name: &str,
    lines: &[(&str, f64)],
) -> anyhow::Result<String> {
    let command = larder_recipe::Command::new(state.clone());

    let id = command
        .create(
            larder_recipe::CreateInput {
                name: name.to_owned(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients: lines
                    .iter()
                    .map(|(ingredient_id, quantity)| larder_recipe::RecipeLineInput {
                        ingredient_id: (*ingredient_id).to_owned(),
                        quantity: *quantity,
                    })
                    .collect(),
            },
            "author-1",
        )
        .await?;

    // make_recipe reads the lines from the recipe read model
    larder_recipe::subscribe_list()
        .data(state.read_db.clone())
        .unretry_oneshot(&state.executor)
        .await?;

    Ok(id)
}

#[allow(dead_code)]
pub async fn add(
    command: &larder_stock::Command<Sqlite>,
    user_id: &str,
    ingredient_id: &str,
    quantity: f64,
    expires_on: Date,
) -> anyhow::Result<()> {
    command
        .add(AddInput {
            user_id: user_id.to_owned(),
            ingredient_id: ingredient_id.to_owned(),
            quantity,
            expires_on,
        })
        .await?;

    Ok(())
}
