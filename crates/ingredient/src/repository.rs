use larder_db::table::IngredientName;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(FromRow)]
pub struct IngredientNameRow {
    pub id: String,
    pub name_key: String,
}

pub(crate) async fn find_by_name_key(
    pool: &SqlitePool,
    name_key: impl Into<String>,
) -> larder_shared::Result<Option<IngredientNameRow>> {
    let statement = Query::select()
        .columns([IngredientName::Id, IngredientName::NameKey])
        .from(IngredientName::Table)
        .and_where(Expr::col(IngredientName::NameKey).eq(name_key.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientNameRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn create(
    pool: &SqlitePool,
    id: String,
    name_key: String,
) -> larder_shared::Result<()> {
    let statement = Query::insert()
        .into_table(IngredientName::Table)
        .columns([IngredientName::Id, IngredientName::NameKey])
        .values_panic([id.into(), name_key.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn update(
    pool: &SqlitePool,
    id: impl Into<String>,
    name_key: String,
) -> larder_shared::Result<()> {
    let statement = Query::update()
        .table(IngredientName::Table)
        .values([(IngredientName::NameKey, name_key.into())])
        .and_where(Expr::col(IngredientName::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn delete(pool: &SqlitePool, id: impl Into<String>) -> larder_shared::Result<()> {
    let statement = Query::delete()
        .from_table(IngredientName::Table)
        .and_where(Expr::col(IngredientName::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
