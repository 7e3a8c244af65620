use std::{path::PathBuf, str::FromStr};

use evento::{
    Sqlite,
    migrator::{Migrate, Plan},
};
use larder_ingredient::RegisterInput;
use larder_shared::{State, ingredient::Unit};
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
pub async fn register(
    cmd: &larder_ingredient::Command<Sqlite>,
    name: impl Into<String>,
    unit: Unit,
) -> anyhow::Result<String> {
    Ok(cmd
        .register(RegisterInput {
            name: name.into(),
            unit,
        })
        .await?)
}

#[allow(dead_code)]
pub async fn register_all(
    cmd: &larder_ingredient::Command<Sqlite>,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<String>> {
    let mut ids = vec![];

    for name in names.into_iter() {
        ids.push(register(cmd, name, Unit::G).await?);
    }

    Ok(ids)
}
