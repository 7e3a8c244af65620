use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use evento::cursor::Args;
use larder_ingredient::{FilterQuery, IngredientRow, IngredientStat, RegisterInput, UpdateInput};
use larder_shared::ingredient::Unit;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::AppResult;

#[derive(Deserialize)]
pub struct ListIngredientsParams {
    pub q: Option<String>,
    pub first: Option<u16>,
    pub after: Option<String>,
}

#[derive(Serialize)]
pub struct IngredientView {
    pub id: String,
    pub name: String,
    pub unit: Unit,
}

impl From<IngredientRow> for IngredientView {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            unit: row.unit.0,
        }
    }
}

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub total: usize,
    pub items: Vec<T>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<ListIngredientsParams>,
) -> AppResult<Json<ListResponse<IngredientView>>> {
    let result = state
        .ingredient_query
        .filter(FilterQuery {
            q: params.q,
            args: Args::forward(params.first.unwrap_or(50), params.after),
        })
        .await?;

    let items = result
        .edges
        .into_iter()
        .map(|edge| edge.node.into())
        .collect::<Vec<IngredientView>>();

    Ok(Json(ListResponse {
        total: items.len(),
        items,
    }))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<IngredientView>> {
    let Some(row) = state.ingredient_query.find(&id).await? else {
        return Err(larder_shared::Error::NotFound(format!("ingredient {id}")).into());
    };

    Ok(Json(row.into()))
}

#[derive(Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    pub unit: Unit,
}

pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(request): Json<CreateIngredientRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let id = state
        .ingredient
        .register(RegisterInput {
            name: request.name,
            unit: request.unit,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateIngredientRequest>,
) -> AppResult<StatusCode> {
    state
        .ingredient
        .update(UpdateInput {
            id,
            name: request.name,
            unit: request.unit,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ingredient.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct IngredientStatView {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub recipe_count: i64,
    pub stock_count: i64,
}

impl From<IngredientStat> for IngredientStatView {
    fn from(stat: IngredientStat) -> Self {
        Self {
            id: stat.id,
            name: stat.name,
            unit: stat.unit.0,
            recipe_count: stat.recipe_count,
            stock_count: stat.stock_count,
        }
    }
}

pub async fn ingredient_stats(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<IngredientStatView>>> {
    let items = state
        .ingredient_query
        .stats()
        .await?
        .into_iter()
        .map(IngredientStatView::from)
        .collect::<Vec<_>>();

    Ok(Json(ListResponse {
        total: items.len(),
        items,
    }))
}
