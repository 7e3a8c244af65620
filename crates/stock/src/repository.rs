use larder_db::table::{IngredientName, Pantry, RecipeIngredient, RecipeList, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(FromRow)]
pub struct PantryRow {
    pub id: String,
    pub user_id: String,
}

pub(crate) async fn find_by_user(
    pool: &SqlitePool,
    user_id: impl Into<String>,
) -> larder_shared::Result<Option<PantryRow>> {
    let statement = Query::select()
        .columns([Pantry::Id, Pantry::UserId])
        .from(Pantry::Table)
        .and_where(Expr::col(Pantry::UserId).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, PantryRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn create(
    pool: &SqlitePool,
    id: String,
    user_id: String,
) -> larder_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Pantry::Table)
        .columns([Pantry::Id, Pantry::UserId, Pantry::CreatedAt])
        .values_panic([id.into(), user_id.into(), now.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn user_exists(
    pool: &SqlitePool,
    user_id: impl Into<String>,
) -> larder_shared::Result<bool> {
    let statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(user_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

pub(crate) async fn ingredient_exists(
    pool: &SqlitePool,
    ingredient_id: impl Into<String>,
) -> larder_shared::Result<bool> {
    let statement = Query::select()
        .column(IngredientName::Id)
        .from(IngredientName::Table)
        .and_where(Expr::col(IngredientName::Id).eq(ingredient_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_some())
}

/// The (ingredient, quantity) lines of a recipe, or `None` when the recipe
/// itself is unknown.
pub(crate) async fn recipe_lines(
    pool: &SqlitePool,
    recipe_id: impl Into<String>,
) -> larder_shared::Result<Option<Vec<(String, f64)>>> {
    let recipe_id = recipe_id.into();

    let statement = Query::select()
        .column(RecipeList::Id)
        .from(RecipeList::Table)
        .and_where(Expr::col(RecipeList::Id).eq(&recipe_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    if sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .is_none()
    {
        return Ok(None);
    }

    let statement = Query::select()
        .columns([RecipeIngredient::IngredientId, RecipeIngredient::Quantity])
        .from(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(&recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(Some(
        sqlx::query_as_with::<_, (String, f64), _>(&sql, values)
            .fetch_all(pool)
            .await?,
    ))
}
