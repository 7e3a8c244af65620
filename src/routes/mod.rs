use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

mod health;
mod ingredients;
mod recipes;
mod stock;
mod users;

pub use health::*;
pub use ingredients::*;
pub use recipes::*;
pub use stock::*;
pub use users::*;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub ingredient: larder_ingredient::Command<evento::Sqlite>,
    pub ingredient_query: larder_ingredient::Query,
    pub recipe: larder_recipe::Command<evento::Sqlite>,
    pub recipe_query: larder_recipe::Query,
    pub stock: larder_stock::Command<evento::Sqlite>,
    pub stock_query: larder_stock::Query,
    pub user: larder_user::Command<evento::Sqlite>,
    pub user_query: larder_user::Query,
}

impl AppState {
    pub fn new(state: larder_shared::State<evento::Sqlite>) -> Self {
        Self {
            db: state.read_db.clone(),
            ingredient: larder_ingredient::Command::new(state.clone()),
            ingredient_query: larder_ingredient::Query(state.read_db.clone()),
            recipe: larder_recipe::Command::new(state.clone()),
            recipe_query: larder_recipe::Query(state.read_db.clone()),
            stock: larder_stock::Command::new(state.clone()),
            stock_query: larder_stock::Query(state.read_db.clone()),
            user: larder_user::Command::new(state.clone()),
            user_query: larder_user::Query(state.read_db.clone()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route(
            "/api/ingredients",
            get(list_ingredients).post(create_ingredient),
        )
        .route("/api/ingredients/stats", get(ingredient_stats))
        .route(
            "/api/ingredients/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/can-make/{user_id}", get(can_make))
        .route("/api/recipes/category/{category}", get(recipes_by_category))
        .route(
            "/api/recipes/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/api/recipes/{id}/make", post(make_recipe))
        .route("/api/stock/{user_id}", get(get_stock).post(add_to_stock))
        .route("/api/stock/{user_id}/expiring", get(expiring_stock))
        .route(
            "/api/stock/{user_id}/{ingredient_id}",
            axum::routing::put(update_stock_item).delete(remove_stock_item),
        )
        .route(
            "/api/stock/{user_id}/{ingredient_id}/consume",
            patch(consume_stock),
        )
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/recipes", get(user_recipes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
