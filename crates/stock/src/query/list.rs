use evento::{Executor, SubscribeBuilder, metadata::Event};
use larder_db::table::{IngredientList, Pantry as PantryTable, StockLot};
use larder_shared::ingredient::Unit;
use larder_shared::stock::{Consumed, LotAdded, LotAdjusted, LotRemoved, Pantry};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use time::Date;

#[derive(Debug, FromRow)]
pub struct StockLotRow {
    pub ingredient_id: String,
    pub name: String,
    pub unit: sqlx::types::Text<Unit>,
    pub quantity: f64,
    pub expires_on: i32,
}

impl StockLotRow {
    pub fn expires_on(&self) -> anyhow::Result<Date> {
        Ok(Date::from_julian_day(self.expires_on)?)
    }
}

impl super::Query {
    /// Every lot of a user, soonest expiration first.
    pub async fn for_user(&self, user_id: impl Into<String>) -> anyhow::Result<Vec<StockLotRow>> {
        self.fetch(user_id, None).await
    }

    /// Lots expiring on or before `until`, soonest first.
    pub async fn expiring(
        &self,
        user_id: impl Into<String>,
        until: Date,
    ) -> anyhow::Result<Vec<StockLotRow>> {
        self.fetch(user_id, Some(until)).await
    }

    async fn fetch(
        &self,
        user_id: impl Into<String>,
        until: Option<Date>,
    ) -> anyhow::Result<Vec<StockLotRow>> {
        let mut statement = Query::select()
            .column((StockLot::Table, StockLot::IngredientId))
            .column((IngredientList::Table, IngredientList::Name))
            .column((IngredientList::Table, IngredientList::Unit))
            .column((StockLot::Table, StockLot::Quantity))
            .column((StockLot::Table, StockLot::ExpiresOn))
            .from(StockLot::Table)
            .inner_join(
                PantryTable::Table,
                Expr::col((StockLot::Table, StockLot::PantryId))
                    .equals((PantryTable::Table, PantryTable::Id)),
            )
            .inner_join(
                IngredientList::Table,
                Expr::col((StockLot::Table, StockLot::IngredientId))
                    .equals((IngredientList::Table, IngredientList::Id)),
            )
            .and_where(Expr::col((PantryTable::Table, PantryTable::UserId)).eq(user_id.into()))
            .order_by((StockLot::Table, StockLot::ExpiresOn), Order::Asc)
            .order_by((StockLot::Table, StockLot::IngredientId), Order::Asc)
            .to_owned();

        if let Some(until) = until {
            statement.and_where(
                Expr::col((StockLot::Table, StockLot::ExpiresOn)).lte(until.to_julian_day()),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, StockLotRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

pub fn subscribe_list<E: Executor + Clone>() -> SubscribeBuilder<E> {
    evento::subscribe("stock-list")
        .handler(handle_lot_added())
        .handler(handle_lot_adjusted())
        .handler(handle_lot_removed())
        .handler(handle_consumed())
        .handler_check_off()
}

#[evento::handler(Pantry)]
async fn handle_lot_added<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<LotAdded>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::insert()
        .into_table(StockLot::Table)
        .columns([
            StockLot::PantryId,
            StockLot::IngredientId,
            StockLot::ExpiresOn,
            StockLot::Quantity,
            StockLot::CreatedAt,
        ])
        .values_panic([
            event.aggregator_id.to_owned().into(),
            event.data.ingredient_id.to_owned().into(),
            event.data.expires_on.into(),
            event.data.quantity.into(),
            event.timestamp.into(),
        ])
        .on_conflict(
            OnConflict::columns([
                StockLot::PantryId,
                StockLot::IngredientId,
                StockLot::ExpiresOn,
            ])
            .value(
                StockLot::Quantity,
                Expr::col(StockLot::Quantity).add(event.data.quantity),
            )
            .value(StockLot::UpdatedAt, event.timestamp)
            .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Pantry)]
async fn handle_lot_adjusted<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<LotAdjusted>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();

    let statement = Query::delete()
        .from_table(StockLot::Table)
        .and_where(Expr::col(StockLot::PantryId).eq(&event.aggregator_id))
        .and_where(Expr::col(StockLot::IngredientId).eq(&event.data.ingredient_id))
        .and_where(Expr::col(StockLot::ExpiresOn).eq(event.data.expires_on))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    let statement = Query::insert()
        .into_table(StockLot::Table)
        .columns([
            StockLot::PantryId,
            StockLot::IngredientId,
            StockLot::ExpiresOn,
            StockLot::Quantity,
            StockLot::CreatedAt,
        ])
        .values_panic([
            event.aggregator_id.to_owned().into(),
            event.data.ingredient_id.to_owned().into(),
            event.data.new_expires_on.into(),
            event.data.quantity.into(),
            event.timestamp.into(),
        ])
        .on_conflict(
            OnConflict::columns([
                StockLot::PantryId,
                StockLot::IngredientId,
                StockLot::ExpiresOn,
            ])
            .value(
                StockLot::Quantity,
                Expr::col(StockLot::Quantity).add(event.data.quantity),
            )
            .value(StockLot::UpdatedAt, event.timestamp)
            .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Pantry)]
async fn handle_lot_removed<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<LotRemoved>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::delete()
        .from_table(StockLot::Table)
        .and_where(Expr::col(StockLot::PantryId).eq(&event.aggregator_id))
        .and_where(Expr::col(StockLot::IngredientId).eq(&event.data.ingredient_id))
        .and_where(Expr::col(StockLot::ExpiresOn).eq(event.data.expires_on))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Pantry)]
async fn handle_consumed<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Consumed>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();

    for drain in &event.data.drains {
        let statement = Query::update()
            .table(StockLot::Table)
            .value(
                StockLot::Quantity,
                Expr::col(StockLot::Quantity).sub(drain.quantity),
            )
            .value(StockLot::UpdatedAt, event.timestamp)
            .and_where(Expr::col(StockLot::PantryId).eq(&event.aggregator_id))
            .and_where(Expr::col(StockLot::IngredientId).eq(&drain.ingredient_id))
            .and_where(Expr::col(StockLot::ExpiresOn).eq(drain.expires_on))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&pool).await?;
    }

    let statement = Query::delete()
        .from_table(StockLot::Table)
        .and_where(Expr::col(StockLot::PantryId).eq(&event.aggregator_id))
        .and_where(Expr::col(StockLot::Quantity).lte(0.0))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}
