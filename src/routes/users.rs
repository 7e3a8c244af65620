use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use evento::cursor::Args;
use larder_recipe::FilterQuery;
use larder_user::{RegisterInput, UpdateProfileInput, UserRow};
use serde::{Deserialize, Serialize};

use super::{AppState, CreatedResponse, ListResponse, RecipeView};
use crate::error::AppResult;

#[derive(Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserRow> for UserView {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<UserView>>> {
    let items = state
        .user_query
        .list()
        .await?
        .into_iter()
        .map(UserView::from)
        .collect::<Vec<_>>();

    Ok(Json(ListResponse {
        total: items.len(),
        items,
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserView>> {
    let Some(user) = state.user_query.find(&id).await? else {
        return Err(larder_shared::Error::NotFound(format!("user {id}")).into());
    };

    Ok(Json(user.into()))
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state
        .user
        .register(RegisterInput {
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<StatusCode> {
    state
        .user
        .update_profile(UpdateProfileInput {
            id,
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.user.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_recipes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ListResponse<RecipeView>>> {
    if state.user_query.find(&id).await?.is_none() {
        return Err(larder_shared::Error::NotFound(format!("user {id}")).into());
    }

    let result = state
        .recipe_query
        .filter(FilterQuery {
            category: None,
            author_id: Some(id),
            args: Args::forward(50, None),
        })
        .await?;

    let items = result
        .edges
        .into_iter()
        .map(|edge| RecipeView {
            id: edge.node.id,
            author_id: edge.node.author_id,
            name: edge.node.name,
            category: edge.node.category.0,
            ingredient_count: edge.node.ingredient_count,
        })
        .collect::<Vec<_>>();

    Ok(Json(ListResponse {
        total: items.len(),
        items,
    }))
}
