use bitcode::{Decode, Encode};
use evento::{
    Executor, SubscribeBuilder,
    cursor::{Args, ReadResult},
    metadata::Event,
    sql::Reader,
};
use larder_db::table::{RecipeIngredient, RecipeList};
use larder_shared::recipe::{
    BasicInformationChanged, Category, Created, Deleted, IngredientsReplaced, Recipe, RecipeLine,
};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Encode, Decode)]
pub struct RecipeQueryCursor {
    pub i: String,
    pub v: i64,
}

#[derive(Debug, Default, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub category: sqlx::types::Text<Category>,
    pub ingredient_count: i64,
    pub created_at: i64,
}

impl evento::cursor::Cursor for RecipeRow {
    type T = RecipeQueryCursor;

    fn serialize(&self) -> Self::T {
        Self::T {
            i: self.id.to_owned(),
            v: self.created_at,
        }
    }
}

impl evento::sql::Bind for RecipeRow {
    type T = RecipeList;
    type I = [Self::T; 2];
    type V = [Expr; 2];
    type Cursor = Self;

    fn columns() -> Self::I {
        [RecipeList::CreatedAt, RecipeList::Id]
    }

    fn values(
        cursor: <<Self as evento::sql::Bind>::Cursor as evento::cursor::Cursor>::T,
    ) -> Self::V {
        [cursor.v.into(), cursor.i.into()]
    }
}

#[derive(Debug, Default, FromRow)]
pub struct RecipeLineRow {
    pub recipe_id: String,
    pub ingredient_id: String,
    pub quantity: f64,
}

#[derive(Debug, Default)]
pub struct RecipeDetail {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub category: Category,
    pub instructions: String,
    pub created_at: i64,
    pub lines: Vec<RecipeLineRow>,
}

/// One catalog entry as fed into the feasibility engine, in creation order.
#[derive(Debug, Default)]
pub struct CatalogRecipe {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub category: Category,
    pub lines: Vec<RecipeLineRow>,
}

pub struct FilterQuery {
    pub category: Option<Category>,
    pub author_id: Option<String>,
    pub args: Args,
}

impl super::Query {
    pub async fn filter(&self, input: FilterQuery) -> anyhow::Result<ReadResult<RecipeRow>> {
        let mut statement = sea_query::Query::select()
            .columns([
                RecipeList::Id,
                RecipeList::AuthorId,
                RecipeList::Name,
                RecipeList::Category,
                RecipeList::IngredientCount,
                RecipeList::CreatedAt,
            ])
            .from(RecipeList::Table)
            .to_owned();

        if let Some(category) = input.category {
            statement.and_where(Expr::col(RecipeList::Category).eq(category.to_string()));
        }

        if let Some(author_id) = input.author_id {
            statement.and_where(Expr::col(RecipeList::AuthorId).eq(author_id));
        }

        let mut reader = Reader::new(statement);

        Ok(reader
            .args(input.args)
            .execute::<_, RecipeRow, _>(&self.0)
            .await?)
    }

    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<RecipeDetail>> {
        let id = id.into();

        let statement = sea_query::Query::select()
            .columns([
                RecipeList::Id,
                RecipeList::AuthorId,
                RecipeList::Name,
                RecipeList::Category,
                RecipeList::Instructions,
                RecipeList::CreatedAt,
            ])
            .from(RecipeList::Table)
            .and_where(Expr::col(RecipeList::Id).eq(&id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<
            _,
            (String, String, String, sqlx::types::Text<Category>, String, i64),
            _,
        >(&sql, values)
        .fetch_optional(&self.0)
        .await?
        else {
            return Ok(None);
        };

        let statement = sea_query::Query::select()
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientId,
                RecipeIngredient::Quantity,
            ])
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(&id))
            .order_by(RecipeIngredient::IngredientId, sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let lines = sqlx::query_as_with::<_, RecipeLineRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let (id, author_id, name, category, instructions, created_at) = row;

        Ok(Some(RecipeDetail {
            id,
            author_id,
            name,
            category: category.0,
            instructions,
            created_at,
            lines,
        }))
    }

    /// The whole catalog with its lines, in creation order. Input of the
    /// feasibility engine.
    pub async fn catalog(&self) -> anyhow::Result<Vec<CatalogRecipe>> {
        let statement = sea_query::Query::select()
            .columns([
                RecipeList::Id,
                RecipeList::AuthorId,
                RecipeList::Name,
                RecipeList::Category,
            ])
            .from(RecipeList::Table)
            .order_by(RecipeList::CreatedAt, sea_query::Order::Asc)
            .order_by(RecipeList::Id, sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<
            _,
            (String, String, String, sqlx::types::Text<Category>),
            _,
        >(&sql, values)
        .fetch_all(&self.0)
        .await?;

        let statement = sea_query::Query::select()
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientId,
                RecipeIngredient::Quantity,
            ])
            .from(RecipeIngredient::Table)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut lines_by_recipe = std::collections::HashMap::<String, Vec<RecipeLineRow>>::new();

        for line in sqlx::query_as_with::<_, RecipeLineRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
        {
            lines_by_recipe
                .entry(line.recipe_id.to_owned())
                .or_default()
                .push(line);
        }

        Ok(rows
            .into_iter()
            .map(|(id, author_id, name, category)| CatalogRecipe {
                lines: lines_by_recipe.remove(&id).unwrap_or_default(),
                id,
                author_id,
                name,
                category: category.0,
            })
            .collect())
    }
}

pub fn subscribe_list<E: Executor + Clone>() -> SubscribeBuilder<E> {
    evento::subscribe("recipe-list")
        .handler(handle_created())
        .handler(handle_basic_information_changed())
        .handler(handle_ingredients_replaced())
        .handler(handle_deleted())
        .handler_check_off()
}

async fn replace_lines(
    pool: &sqlx::SqlitePool,
    recipe_id: &str,
    lines: &[RecipeLine],
) -> anyhow::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    if lines.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Quantity,
        ])
        .to_owned();

    for line in lines {
        statement.values_panic([
            recipe_id.into(),
            line.ingredient_id.to_owned().into(),
            line.quantity.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

#[evento::handler(Recipe)]
async fn handle_created<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Created>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::insert()
        .into_table(RecipeList::Table)
        .columns([
            RecipeList::Id,
            RecipeList::AuthorId,
            RecipeList::Name,
            RecipeList::Category,
            RecipeList::Instructions,
            RecipeList::IngredientCount,
            RecipeList::CreatedAt,
        ])
        .values_panic([
            event.aggregator_id.to_owned().into(),
            event.metadata.requested_by()?.into(),
            event.data.name.to_owned().into(),
            event.data.category.to_string().into(),
            event.data.instructions.to_owned().into(),
            (event.data.ingredients.len() as i64).into(),
            event.timestamp.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    replace_lines(&pool, &event.aggregator_id, &event.data.ingredients).await?;

    Ok(())
}

#[evento::handler(Recipe)]
async fn handle_basic_information_changed<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<BasicInformationChanged>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::update()
        .table(RecipeList::Table)
        .values([
            (RecipeList::Name, event.data.name.to_owned().into()),
            (
                RecipeList::Category,
                event.data.category.to_string().into(),
            ),
            (
                RecipeList::Instructions,
                event.data.instructions.to_owned().into(),
            ),
            (RecipeList::UpdatedAt, event.timestamp.into()),
        ])
        .and_where(Expr::col(RecipeList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    Ok(())
}

#[evento::handler(Recipe)]
async fn handle_ingredients_replaced<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<IngredientsReplaced>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::update()
        .table(RecipeList::Table)
        .values([
            (
                RecipeList::IngredientCount,
                (event.data.ingredients.len() as i64).into(),
            ),
            (RecipeList::UpdatedAt, event.timestamp.into()),
        ])
        .and_where(Expr::col(RecipeList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    replace_lines(&pool, &event.aggregator_id, &event.data.ingredients).await?;

    Ok(())
}

#[evento::handler(Recipe)]
async fn handle_deleted<E: Executor>(
    context: &evento::Context<'_, E>,
    event: Event<Deleted>,
) -> anyhow::Result<()> {
    let pool = context.extract::<sqlx::SqlitePool>();
    let statement = Query::delete()
        .from_table(RecipeList::Table)
        .and_where(Expr::col(RecipeList::Id).eq(&event.aggregator_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&pool).await?;

    replace_lines(&pool, &event.aggregator_id, &[]).await?;

    Ok(())
}
