use std::{path::PathBuf, str::FromStr};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use evento::{
    Sqlite,
    migrator::{Migrate, Plan},
};
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub executor: Sqlite,
}

pub async fn setup_test_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    larder_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let executor: Sqlite = pool.clone().into();
    let app = larder::create_app(pool.clone(), executor.clone()).await?;

    Ok(TestApp {
        app,
        pool,
        executor,
    })
}

impl TestApp {
    /// Advance every read-model subscription once, like the running server
    /// does continuously.
    pub async fn sync(&self) -> anyhow::Result<()> {
        larder_ingredient::subscribe_list()
            .data(self.pool.clone())
            .unretry_oneshot(&self.executor)
            .await?;

        larder_recipe::subscribe_list()
            .data(self.pool.clone())
            .unretry_oneshot(&self.executor)
            .await?;

        larder_stock::subscribe_list()
            .data(self.pool.clone())
            .unretry_oneshot(&self.executor)
            .await?;

        Ok(())
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    #[allow(dead_code)]
    pub async fn create_user(&self, name: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                "POST",
                "/api/users",
                Some(serde_json::json!({
                    "name": name,
                    "email": format!("{name}@larder.localhost"),
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "user not created: {body}");

        Ok(body["id"].as_str().unwrap().to_owned())
    }

    #[allow(dead_code)]
    pub async fn create_ingredient(&self, name: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                "POST",
                "/api/ingredients",
                Some(serde_json::json!({ "name": name, "unit": "G" })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "ingredient not created: {body}");

        Ok(body["id"].as_str().unwrap().to_owned())
    }

    #[allow(dead_code)]
    pub async fn create_recipe(
        &self,
        name: &str,
        author_id: &str,
        lines: &[(&str, f64)],
    ) -> anyhow::Result<String> {
        let ingredients = lines
            .iter()
            .map(|(ingredient_id, quantity)| {
                serde_json::json!({ "ingredient_id": ingredient_id, "quantity": quantity })
            })
            .collect::<Vec<_>>();

        let (status, body) = self
            .request(
                "POST",
                "/api/recipes",
                Some(serde_json::json!({
                    "name": name,
                    "instructions": "Mix everything and bake.",
                    "category": "MainCourse",
                    "author_id": author_id,
                    "ingredients": ingredients,
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "recipe not created: {body}");

        Ok(body["id"].as_str().unwrap().to_owned())
    }

    #[allow(dead_code)]
    pub async fn add_stock(
        &self,
        user_id: &str,
        ingredient_id: &str,
        quantity: f64,
        expires_on: &str,
    ) -> anyhow::Result<()> {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/stock/{user_id}"),
                Some(serde_json::json!({
                    "ingredient_id": ingredient_id,
                    "quantity": quantity,
                    "expires_on": expires_on,
                })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "stock not added: {body}");

        Ok(())
    }
}
