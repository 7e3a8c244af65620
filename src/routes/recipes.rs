use std::collections::{HashMap, HashSet};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use evento::cursor::Args;
use larder_recipe::{
    CreateInput, FilterQuery, RecipeLineInput, UpdateInput,
    feasibility::{self, CatalogEntry},
};
use larder_shared::ingredient::Unit;
use larder_shared::recipe::{Category, RecipeLine};
use larder_stock::MakeRecipeInput;
use larder_stock::classifier::{self, StockSummary};
use serde::{Deserialize, Serialize};

use super::{AppState, CreatedResponse, ListResponse};
use crate::error::AppResult;

#[derive(Deserialize)]
pub struct ListRecipesParams {
    pub category: Option<Category>,
    pub author: Option<String>,
    pub first: Option<u16>,
    pub after: Option<String>,
}

#[derive(Serialize)]
pub struct RecipeView {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub category: Category,
    pub ingredient_count: i64,
}

#[derive(Serialize)]
pub struct RecipeLineView {
    pub ingredient_id: String,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub quantity: f64,
}

#[derive(Serialize)]
pub struct RecipeDetailView {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub category: Category,
    pub instructions: String,
    pub ingredients: Vec<RecipeLineView>,
}

#[derive(Deserialize)]
pub struct RecipeLineRequest {
    pub ingredient_id: String,
    pub quantity: f64,
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub instructions: String,
    pub category: Category,
    pub author_id: String,
    pub ingredients: Vec<RecipeLineRequest>,
}

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub name: String,
    pub instructions: String,
    pub category: Category,
    pub ingredients: Vec<RecipeLineRequest>,
}

#[derive(Deserialize)]
pub struct MakeRecipeRequest {
    pub user_id: String,
}

fn line_inputs(lines: Vec<RecipeLineRequest>) -> Vec<RecipeLineInput> {
    lines
        .into_iter()
        .map(|line| RecipeLineInput {
            ingredient_id: line.ingredient_id,
            quantity: line.quantity,
        })
        .collect()
}

/// id -> (name, unit) of the whole ingredient catalog, for hydrating views.
async fn ingredient_names(state: &AppState) -> AppResult<HashMap<String, (String, Unit)>> {
    Ok(state
        .ingredient_query
        .all()
        .await?
        .into_iter()
        .map(|row| (row.id, (row.name, row.unit.0)))
        .collect())
}

fn line_view(
    names: &HashMap<String, (String, Unit)>,
    ingredient_id: &str,
    quantity: f64,
) -> RecipeLineView {
    let found = names.get(ingredient_id);

    RecipeLineView {
        ingredient_id: ingredient_id.to_owned(),
        name: found.map(|(name, _)| name.to_owned()),
        unit: found.map(|(_, unit)| unit.to_owned()),
        quantity,
    }
}

pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> AppResult<Json<ListResponse<RecipeView>>> {
    let result = state
        .recipe_query
        .filter(FilterQuery {
            category: params.category,
            author_id: params.author,
            args: Args::forward(params.first.unwrap_or(50), params.after),
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

pub async fn recipes_by_category(
    State(state): State<AppState>,
    Path(category): Path<Category>,
) -> AppResult<Json<ListResponse<RecipeView>>> {
    let result = state
        .recipe_query
        .filter(FilterQuery {
            category: Some(category),
            author_id: None,
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

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RecipeDetailView>> {
    let Some(recipe) = state.recipe_query.find(&id).await? else {
        return Err(larder_shared::Error::NotFound(format!("recipe {id}")).into());
    };

    let names = ingredient_names(&state).await?;

    Ok(Json(RecipeDetailView {
        id: recipe.id,
        author_id: recipe.author_id,
        name: recipe.name,
        category: recipe.category,
        instructions: recipe.instructions,
        ingredients: recipe
            .lines
            .iter()
            .map(|line| line_view(&names, &line.ingredient_id, line.quantity))
            .collect(),
    }))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    if state.user_query.find(&request.author_id).await?.is_none() {
        return Err(
            larder_shared::Error::NotFound(format!("user {}", request.author_id)).into(),
        );
    }

    let id = state
        .recipe
        .create(
            CreateInput {
                name: request.name,
                instructions: request.instructions,
                category: request.category,
                ingredients: line_inputs(request.ingredients),
            },
            request.author_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecipeRequest>,
) -> AppResult<StatusCode> {
    state
        .recipe
        .update(UpdateInput {
            id,
            name: request.name,
            instructions: request.instructions,
            category: request.category,
            ingredients: line_inputs(request.ingredients),
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.recipe.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct AvailableLineView {
    pub ingredient_id: String,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub required: f64,
    pub available: f64,
}

#[derive(Serialize)]
pub struct MissingLineView {
    pub ingredient_id: String,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub required: f64,
    pub available: f64,
    pub needed: f64,
}

#[derive(Serialize)]
pub struct AlmostMakeableView {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub missing_count: usize,
    pub available: Vec<AvailableLineView>,
    pub missing: Vec<MissingLineView>,
}

#[derive(Serialize)]
pub struct CanMakeResponse {
    pub makeable: Vec<RecipeView>,
    pub almost_makeable: Vec<AlmostMakeableView>,
    pub stock_summary: StockSummary,
}

/// Stock classification feeding recipe feasibility: which recipes the user
/// can cook right now, and which are a short shopping list away.
pub async fn can_make(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<CanMakeResponse>> {
    if state.user_query.find(&user_id).await?.is_none() {
        return Err(larder_shared::Error::NotFound(format!("user {user_id}")).into());
    }

    let items = super::stock::stock_items(state.stock_query.for_user(&user_id).await?)?;
    let quantities = classifier::available_quantities(&items);
    let stock_summary = classifier::classify(items, larder_shared::today()).summary();

    let catalog = state.recipe_query.catalog().await?;
    let entries = catalog
        .iter()
        .map(|recipe| CatalogEntry {
            recipe_id: recipe.id.to_owned(),
            lines: recipe
                .lines
                .iter()
                .map(|line| RecipeLine {
                    ingredient_id: line.ingredient_id.to_owned(),
                    quantity: line.quantity,
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    let makeable_ids = feasibility::makeable(&entries, &quantities);
    let makeable_set = makeable_ids.iter().cloned().collect::<HashSet<_>>();
    let almost = feasibility::almost_makeable(
        &entries,
        &makeable_set,
        &quantities,
        feasibility::DEFAULT_MAX_MISSING,
    );

    let by_id = catalog
        .iter()
        .map(|recipe| (recipe.id.as_str(), recipe))
        .collect::<HashMap<_, _>>();
    let names = ingredient_names(&state).await?;

    let makeable = makeable_ids
        .iter()
        .filter_map(|id| by_id.get(id.as_str()))
        .map(|recipe| RecipeView {
            id: recipe.id.to_owned(),
            author_id: recipe.author_id.to_owned(),
            name: recipe.name.to_owned(),
            category: recipe.category.to_owned(),
            ingredient_count: recipe.lines.len() as i64,
        })
        .collect();

    let almost_makeable = almost
        .into_iter()
        .filter_map(|entry| {
            let recipe = by_id.get(entry.recipe_id.as_str())?;

            Some(AlmostMakeableView {
                id: recipe.id.to_owned(),
                name: recipe.name.to_owned(),
                category: recipe.category.to_owned(),
                missing_count: entry.missing_count,
                available: entry
                    .available
                    .iter()
                    .map(|line| {
                        let view = line_view(&names, &line.ingredient_id, line.required);
                        AvailableLineView {
                            ingredient_id: view.ingredient_id,
                            name: view.name,
                            unit: view.unit,
                            required: line.required,
                            available: line.available,
                        }
                    })
                    .collect(),
                missing: entry
                    .missing
                    .iter()
                    .map(|line| {
                        let view = line_view(&names, &line.ingredient_id, line.required);
                        MissingLineView {
                            ingredient_id: view.ingredient_id,
                            name: view.name,
                            unit: view.unit,
                            required: line.required,
                            available: line.available,
                            needed: line.needed,
                        }
                    })
                    .collect(),
            })
        })
        .collect();

    Ok(Json(CanMakeResponse {
        makeable,
        almost_makeable,
        stock_summary,
    }))
}

/// Making a recipe consumes its ingredient lines from the user's stock as
/// one atomic group.
pub async fn make_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MakeRecipeRequest>,
) -> AppResult<StatusCode> {
    state
        .stock
        .make_recipe(MakeRecipeInput {
            user_id: request.user_id,
            recipe_id: id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
