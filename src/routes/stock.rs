use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use larder_stock::{
    AddInput, AdjustInput, ConsumeLine, RemoveInput, StockLotRow,
    classifier::{self, ClassifiedStock, StockItem, StockSummary},
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use super::{AppState, UserView};
use crate::error::AppResult;

pub(crate) fn stock_items(rows: Vec<StockLotRow>) -> anyhow::Result<Vec<StockItem>> {
    rows.into_iter()
        .map(|row| {
            Ok(StockItem {
                expires_on: row.expires_on()?,
                ingredient_id: row.ingredient_id,
                ingredient_name: row.name,
                unit: row.unit.0,
                quantity: row.quantity,
            })
        })
        .collect()
}

#[derive(Serialize)]
pub struct StockResponse {
    pub user: UserView,
    pub summary: StockSummary,
    pub items: Vec<StockItem>,
    pub stock: ClassifiedStock,
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<StockResponse>> {
    let Some(user) = state.user_query.find(&user_id).await? else {
        return Err(larder_shared::Error::NotFound(format!("user {user_id}")).into());
    };

    let items = stock_items(state.stock_query.for_user(&user_id).await?)?;
    let classified = classifier::classify(items.clone(), larder_shared::today());

    Ok(Json(StockResponse {
        user: user.into(),
        summary: classified.summary(),
        items,
        stock: classified,
    }))
}

#[derive(Deserialize)]
pub struct AddToStockRequest {
    pub ingredient_id: String,
    pub quantity: f64,
    pub expires_on: Date,
}

pub async fn add_to_stock(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddToStockRequest>,
) -> AppResult<StatusCode> {
    state
        .stock
        .add(AddInput {
            user_id,
            ingredient_id: request.ingredient_id,
            quantity: request.quantity,
            expires_on: request.expires_on,
        })
        .await?;

    Ok(StatusCode::CREATED)
}

#[derive(Deserialize)]
pub struct UpdateStockItemRequest {
    pub quantity: f64,
    pub expires_on: Date,
    pub new_expires_on: Option<Date>,
}

pub async fn update_stock_item(
    State(state): State<AppState>,
    Path((user_id, ingredient_id)): Path<(String, String)>,
    Json(request): Json<UpdateStockItemRequest>,
) -> AppResult<StatusCode> {
    state
        .stock
        .adjust(AdjustInput {
            user_id,
            ingredient_id,
            expires_on: request.expires_on,
            quantity: request.quantity,
            new_expires_on: request.new_expires_on,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RemoveStockItemParams {
    pub expires_on: Option<Date>,
}

pub async fn remove_stock_item(
    State(state): State<AppState>,
    Path((user_id, ingredient_id)): Path<(String, String)>,
    Query(params): Query<RemoveStockItemParams>,
) -> AppResult<StatusCode> {
    state
        .stock
        .remove(RemoveInput {
            user_id,
            ingredient_id,
            expires_on: params.expires_on,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ConsumeStockRequest {
    pub quantity: f64,
}

pub async fn consume_stock(
    State(state): State<AppState>,
    Path((user_id, ingredient_id)): Path<(String, String)>,
    Json(request): Json<ConsumeStockRequest>,
) -> AppResult<StatusCode> {
    state
        .stock
        .consume(
            user_id,
            vec![ConsumeLine {
                ingredient_id,
                quantity: request.quantity,
            }],
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ExpiringParams {
    pub days: Option<i64>,
}

#[derive(Serialize)]
pub struct ExpiringResponse {
    pub alert_days: i64,
    pub total: usize,
    pub items: Vec<StockItem>,
}

pub async fn expiring_stock(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ExpiringParams>,
) -> AppResult<Json<ExpiringResponse>> {
    if state.user_query.find(&user_id).await?.is_none() {
        return Err(larder_shared::Error::NotFound(format!("user {user_id}")).into());
    }

    let days = params.days.unwrap_or(classifier::EXPIRING_SOON_DAYS);
    let until = larder_shared::today() + Duration::days(days);
    let items = stock_items(state.stock_query.expiring(&user_id, until).await?)?;

    Ok(Json(ExpiringResponse {
        alert_days: days,
        total: items.len(),
        items,
    }))
}
