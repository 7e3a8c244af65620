pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod server;

pub use routes::AppState;

/// Create the app router without starting subscriptions or a listener.
///
/// Integration tests drive this router directly and advance the read-model
/// subscriptions by hand between requests.
pub async fn create_app(
    db_pool: sqlx::SqlitePool,
    executor: evento::Sqlite,
) -> anyhow::Result<axum::Router> {
    let state = larder_shared::State {
        executor,
        read_db: db_pool.clone(),
        write_db: db_pool,
    };

    Ok(routes::create_router(AppState::new(state)))
}
