use larder_db::table::User;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: i64,
}

pub enum FindType {
    Id(String),
    Email(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> larder_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([User::Id, User::Name, User::Email, User::CreatedAt])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn list(pool: &SqlitePool) -> larder_shared::Result<Vec<UserRow>> {
    let statement = Query::select()
        .columns([User::Id, User::Name, User::Email, User::CreatedAt])
        .from(User::Table)
        .order_by(User::CreatedAt, Order::Asc)
        .order_by(User::Id, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) async fn create(
    pool: &SqlitePool,
    id: String,
    name: String,
    email: String,
) -> larder_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([User::Id, User::Name, User::Email, User::CreatedAt])
        .values_panic([id.into(), name.into(), email.into(), now.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn update(
    pool: &SqlitePool,
    id: impl Into<String>,
    name: String,
    email: String,
) -> larder_shared::Result<()> {
    let statement = Query::update()
        .table(User::Table)
        .values([(User::Name, name.into()), (User::Email, email.into())])
        .and_where(Expr::col(User::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn delete(pool: &SqlitePool, id: impl Into<String>) -> larder_shared::Result<()> {
    let statement = Query::delete()
        .from_table(User::Table)
        .and_where(Expr::col(User::Id).eq(id.into()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
