use bitcode::{Decode, Encode};
use evento::{
    Executor, SubscribeBuilder,
    cursor::{Args, ReadResult},
    metadata::Event,
    sql::Reader,
};
use larder_db::table::IngredientList;
use larder_shared::ingredient::{Deleted, Ingredient, Registered, Renamed, Unit, UnitChanged};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Encode, Decode)]
pub struct IngredientQueryCursor {
    pub i: String,
    pub v: i64,
}

#[derive(Debug, Default, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub unit: sqlx::types::Text<Unit>,
    pub created_at: i64,
}

impl evento::cursor::Cursor for IngredientRow {
    type T = IngredientQueryCursor;

    fn serialize(&self) -> Self::T {
        Self::T {
            i: self.id.to_owned(),
            v: self.created_at,
        }
    }
}

impl evento::sql::Bind for IngredientRow {
    type T = IngredientList;
    type I = [Self::T; 2];
    type V = [Expr; 2];
    type Cursor = Self;

    fn columns() -> Self::I {
        [IngredientList::CreatedAt, IngredientList::Id]
    }

    fn values(
        cursor: <<Self as evento::sql::Bind>::Cursor as evento::cursor::Cursor>::T,
    ) -> Self::V {
        [cursor.v.into(), cursor.i.into()]
    }
}

pub struct FilterQuery {
    pub q: Option<String>,
    pub args: Args,
}

impl super::Query {
    pub async fn filter(&self, input: FilterQuery) -> anyhow::Result<ReadResult<IngredientRow>> {
        let mut statement = sea_query::Query::select()
            .columns([
                IngredientList::Id,
                IngredientList::Name,
                IngredientList::Unit,
                IngredientList::CreatedAt,
            ])
            .from(IngredientList::Table)
            .to_owned();

        if let Some(q) = input.q {
            statement.and_where(Expr::col(IngredientList::Name).like(format!("%{q}%")));
        }

        let mut reader = Reader::new(statement);

        Ok(reader
            .args(input.args)
            .execute::<_, IngredientRow, _>(&self.0)
            .await?)
    }

    /// The whole catalog, name-ordered. Used to hydrate ingredient names
    /// into recipe and stock views.
    pub async fn all(&self) -> anyhow::Result<Vec<IngredientRow>> {
        let statement = sea_query::Query::select()
            .columns([
                IngredientList::Id,
                IngredientList::Name,
                IngredientList::Unit,
                IngredientList::CreatedAt,
            ])
            .from(IngredientList::Table)
            .order_by(IngredientList::Name, sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<IngredientRow>> {
        let statement = sea_query::Query::select()
            .columns([
                IngredientList::Id,
                IngredientList::Name,
                IngredientList::Unit,
                IngredientList::CreatedAt,
            ])
            .from(IngredientList::Table)
            .and_where(Expr::col(IngredientList::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}

pub fn subscribe_list<E: Executor + Clone>() -> SubscribeBuilder<E> {
    evento::subscribe("ingredient-list")
        .handler(handle_registered())
        .handler(handle_renamed())
        .handler(handle_unit_changed())
        .handler(handle_deleted())
        .handler_check_off()
}

#[evento::handler(Ingredient)]
async fn handle_registered<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Registered>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::insert()
        .into_table(IngredientList::Table)
        .columns([
            IngredientList::Id,
            IngredientList::Name,
            IngredientList::Unit,
            IngredientList::CreatedAt,
        ])
        .values_panic([
            event.aggregator_id.to_owned().into(),
            event.data.name.to_owned().into(),
            event.data.unit.to_string().into(),
            event.timestamp.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Ingredient)]
async fn handle_renamed<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Renamed>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::update()
        .table(IngredientList::Table)
        .values([
            (IngredientList::Name, event.data.name.to_owned().into()),
            (IngredientList::UpdatedAt, event.timestamp.into()),
        ])
        .and_where(Expr::col(IngredientList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Ingredient)]
async fn handle_unit_changed<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<UnitChanged>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::update()
        .table(IngredientList::Table)
        .values([
            (IngredientList::Unit, event.data.unit.to_string().into()),
            (IngredientList::UpdatedAt, event.timestamp.into()),
        ])
        .and_where(Expr::col(IngredientList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Ingredient)]
async fn handle_deleted<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Deleted>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::delete()
        .from_table(IngredientList::Table)
        .and_where(Expr::col(IngredientList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}
