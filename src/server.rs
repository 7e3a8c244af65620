use sqlx::sqlite::SqlitePoolOptions;

use crate::config::Config;

/// Start the web server: database pool, read-model subscriptions, router.
#[tracing::instrument(skip(config))]
pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> anyhow::Result<()> {
    tracing::info!("Starting larder server...");

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    let executor: evento::Sqlite = db_pool.clone().into();

    larder_ingredient::subscribe_list::<evento::Sqlite>()
        .data(db_pool.clone())
        .run(&executor)
        .await?;
    tracing::info!("subscription 'ingredient-list' started");

    larder_recipe::subscribe_list::<evento::Sqlite>()
        .data(db_pool.clone())
        .run(&executor)
        .await?;
    tracing::info!("subscription 'recipe-list' started");

    larder_stock::subscribe_list::<evento::Sqlite>()
        .data(db_pool.clone())
        .run(&executor)
        .await?;
    tracing::info!("subscription 'stock-list' started");

    let app = crate::create_app(db_pool, executor).await?;

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
