use std::{path::PathBuf, str::FromStr};

use evento::{
    Sqlite,
    migrator::{Migrate, Plan},
};
use larder_recipe::{CreateInput, RecipeLineInput};
use larder_shared::{State, ingredient::Unit, recipe::Category};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

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

#[allow(dead_code)]
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
pub fn lines(pairs: &[(&str, f64)]) -> Vec<RecipeLineInput> {
    pairs
        .iter()
        .map(|(ingredient_id, quantity)| RecipeLineInput {
            ingredient_id: (*ingredient_id).to_owned(),
            quantity: *quantity,
        })
        .collect()
}

#[allow(dead_code)]
pub async fn create_recipe(
    command: &larder_recipe::Command<Sqlite>,
    name: impl Into<String>,
    ingredients: Vec<RecipeLineInput>,
) -> anyhow::Result<String> {
    Ok(command
        .create(
            CreateInput {
                name: name.into(),
                instructions: "Mix everything and bake.".to_owned(),
                category: Category::MainCourse,
                ingredients,
            },
            "author-1",
        )
        .await?)
}
